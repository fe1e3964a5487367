// crates/covergen-core/src/template/placeholder.rs
//
// `${name}` placeholders inside WordprocessingML parts.
//
// Word freely splits text into runs, so a placeholder typed as `${school}`
// may be stored as `${sch</w:t></w:r><w:r><w:t>ool}`. Scanning walks the
// visible characters and steps over tags, with two limits:
// - a placeholder never crosses a paragraph tag (`<w:p>`, `</w:p>`);
// - name characters are [A-Za-z0-9_.-].
//
// Substitution writes the value at the `$` and keeps every tag that sat
// inside the placeholder, so the XML stays balanced.
//
// Markup is skipped whole: comments, processing instructions and CDATA run
// to their own terminators, and a `>` inside a quoted attribute value does
// not close a tag.

use std::collections::BTreeMap;

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Byte span of one placeholder: `xml[start..end]`, `xml[start] == b'$'`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    name: String,
}

const DELIMITED: [(&[u8], &[u8]); 3] = [
    (b"<!--", b"-->"),
    (b"<![CDATA[", b"]]>"),
    (b"<?", b"?>"),
];

fn find(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}

/// Index of the `>` closing the markup that starts at `xml[open] == b'<'`.
fn tag_end(xml: &[u8], open: usize) -> Option<usize> {
    let rest = &xml[open..];
    for (start, stop) in DELIMITED {
        if rest.starts_with(start) {
            let body = open + start.len();
            return find(&xml[body..], stop).map(|p| body + p + stop.len() - 1);
        }
    }

    let mut quote: Option<u8> = None;
    for (i, &b) in rest.iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(open + i),
            None => {}
        }
    }
    None
}

/// `<w:p>`, `<w:p attr>`, `</w:p>`, `<w:p/>`
fn is_paragraph_tag(tag: &[u8]) -> bool {
    let inner = tag.strip_prefix(b"<").unwrap_or(tag);
    let inner = inner.strip_prefix(b"/").unwrap_or(inner);
    let name_len = inner
        .iter()
        .position(|b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>')
        .unwrap_or(inner.len());
    &inner[..name_len] == b"w:p"
}

fn parse_at(xml: &[u8], start: usize) -> Option<Span> {
    let mut i = start + 1;
    let mut opened = false;
    let mut name = String::new();

    while i < xml.len() {
        match xml[i] {
            b'<' => {
                let close = tag_end(xml, i)?;
                if is_paragraph_tag(&xml[i..=close]) {
                    return None;
                }
                i = close + 1;
            }
            b'{' if !opened => {
                opened = true;
                i += 1;
            }
            b'}' if opened && !name.is_empty() => {
                return Some(Span {
                    start,
                    end: i + 1,
                    name,
                });
            }
            b if opened && is_name_char(b as char) => {
                name.push(b as char);
                i += 1;
            }
            _ => return None,
        }
    }
    None
}

fn spans(xml: &str) -> Vec<Span> {
    let bytes = xml.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => match tag_end(bytes, i) {
                Some(close) => i = close + 1,
                None => break,
            },
            b'$' => match parse_at(bytes, i) {
                Some(span) => {
                    i = span.end;
                    out.push(span);
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    out
}

/// Placeholder names in document order, first occurrence only.
pub fn scan_placeholders(xml: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for s in spans(xml) {
        if !names.contains(&s.name) {
            names.push(s.name);
        }
    }
    names
}

/// `${name}` occurrences in plain text, first occurrence order.
///
/// Used on paragraph text that has already been extracted from the markup.
pub fn scan_text(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find("${") {
        let after = &rest[at + 2..];
        let len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());
        if len > 0 && after[len..].starts_with('}') {
            let name = &after[..len];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &after[len + 1..];
        } else {
            rest = after;
        }
    }
    names
}

/// Replace every placeholder that has a value; others are left as-is.
pub fn substitute(xml: &str, values: &BTreeMap<String, String>) -> String {
    let bytes = xml.as_bytes();
    let mut out = String::with_capacity(xml.len());
    let mut last = 0usize;

    for span in spans(xml) {
        let Some(value) = values.get(&span.name) else {
            continue;
        };
        out.push_str(&xml[last..span.start]);
        out.push_str(&escape_xml_text(value));

        // keep tags inside the span, drop the placeholder characters
        let mut i = span.start;
        while i < span.end {
            if bytes[i] == b'<' {
                // spans() only yields placeholders whose tags are closed
                let close = tag_end(bytes, i).unwrap_or(span.end - 1);
                out.push_str(&xml[i..=close]);
                i = close + 1;
            } else {
                i += 1;
            }
        }
        last = span.end;
    }
    out.push_str(&xml[last..]);
    out
}

pub fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
