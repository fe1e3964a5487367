// crates/covergen-core/src/template/mod.rs

pub mod docx_text;
pub mod placeholder;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use tracing::warn;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::TemplateSpec;
use crate::error::{CoverError, Result};
use crate::record::Record;

const MAIN_PART: &str = "word/document.xml";

/// Upper bound on one decompressed archive entry. The size in the zip
/// header is not trusted.
pub const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

/// Parts whose text may carry placeholders.
fn is_text_part(name: &str) -> bool {
    name == MAIN_PART
        || ((name.starts_with("word/header") || name.starts_with("word/footer"))
            && name.ends_with(".xml"))
}

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// A loaded `.docx` template: every archive entry, in archive order.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    id: String,
    entries: Vec<Entry>,
    /// Body placeholders as `docx-rs` reads them; `None` if it could not
    /// parse the file.
    reader_names: Option<Vec<String>>,
}

/// A filled-in document ready to be saved.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    entries: Vec<Entry>,
}

fn blake3_16(bytes: &[u8]) -> [u8; 16] {
    let hash = blake3::hash(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash.as_bytes()[0..16]);
    out
}

fn hex16(b: &[u8; 16]) -> String {
    b.iter().map(|x| format!("{x:02x}")).collect()
}

impl Template {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, &bytes)
    }

    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let entries = read_entries(&name, bytes, MAX_PART_BYTES)?;

        if !entries.iter().any(|e| e.name == MAIN_PART) {
            return Err(CoverError::Template(format!(
                "{name}: not a .docx (no {MAIN_PART})"
            )));
        }

        let reader_names = match docx_text::paragraph_texts(bytes) {
            Ok(paragraphs) => {
                let mut names: Vec<String> = Vec::new();
                for n in paragraphs.iter().flat_map(|p| placeholder::scan_text(p)) {
                    if !names.contains(&n) {
                        names.push(n);
                    }
                }
                Some(names)
            }
            Err(e) => {
                warn!(template = %name, error = %e, "body not readable by docx-rs");
                None
            }
        };

        Ok(Self {
            id: hex16(&blake3_16(bytes)),
            name,
            entries,
            reader_names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// blake3 of the template file, first 16 bytes as hex.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn text_parts(&self) -> impl Iterator<Item = Result<(&str, &str)>> {
        self.entries
            .iter()
            .filter(|e| !e.is_dir && is_text_part(&e.name))
            .map(|e| {
                std::str::from_utf8(&e.data)
                    .map(|xml| (e.name.as_str(), xml))
                    .map_err(|_| {
                        CoverError::Template(format!("{}: {} is not UTF-8", self.name, e.name))
                    })
            })
    }

    /// Every placeholder name across all text parts, first occurrence order.
    ///
    /// Names only `docx-rs` sees in the body are appended, so a template the
    /// two readers disagree on still fails the placeholder checks in `bind`.
    pub fn placeholders(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for part in self.text_parts() {
            let (_, xml) = part?;
            for n in placeholder::scan_placeholders(xml) {
                if !names.contains(&n) {
                    names.push(n);
                }
            }
        }
        for n in self.reader_names.iter().flatten() {
            if !names.contains(n) {
                warn!(template = %self.name, placeholder = %n, "placeholder seen only by docx-rs");
                names.push(n.clone());
            }
        }
        Ok(names)
    }

    /// Body placeholders as read through `docx-rs`, if it could parse the file.
    pub fn reader_placeholders(&self) -> Option<&[String]> {
        self.reader_names.as_deref()
    }

    /// Build the replacement map for `record`.
    ///
    /// Placeholders in the template must be declared in `spec`, and every
    /// declared placeholder must be a field of the record.
    pub fn bind(&self, spec: &TemplateSpec, record: &Record) -> Result<BTreeMap<String, String>> {
        let found = self.placeholders()?;

        if let Some(unknown) = found.iter().find(|n| !spec.placeholders.contains(*n)) {
            return Err(CoverError::UnknownPlaceholder {
                template: self.name.clone(),
                name: unknown.clone(),
            });
        }

        let mut values = BTreeMap::new();
        for p in &spec.placeholders {
            let v = record.get(p).ok_or_else(|| CoverError::MissingField {
                line: record.line(),
                field: p.clone(),
            })?;
            if !found.contains(p) {
                warn!(
                    template = %self.name,
                    placeholder = %p,
                    "declared placeholder not used by template"
                );
            }
            values.insert(p.clone(), v.to_string());
        }
        Ok(values)
    }

    pub fn render(&self, values: &BTreeMap<String, String>) -> Result<RenderedDocument> {
        let mut entries = self.entries.clone();
        for e in entries.iter_mut().filter(|e| !e.is_dir && is_text_part(&e.name)) {
            let xml = std::str::from_utf8(&e.data).map_err(|_| {
                CoverError::Template(format!("{}: {} is not UTF-8", self.name, e.name))
            })?;
            e.data = placeholder::substitute(xml, values).into_bytes();
        }
        Ok(RenderedDocument { entries })
    }
}

/// Every entry of the archive, each read through a `limit`-byte cap.
fn read_entries(name: &str, bytes: &[u8], limit: u64) -> Result<Vec<Entry>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut f = archive.by_index(i)?;
        let mut data = Vec::new();
        f.by_ref().take(limit + 1).read_to_end(&mut data)?;
        if data.len() as u64 > limit {
            return Err(CoverError::Template(format!(
                "{name}: {} is larger than {limit} bytes",
                f.name()
            )));
        }
        entries.push(Entry {
            name: f.name().to_string(),
            compression: f.compression(),
            is_dir: f.is_dir(),
            data,
        });
    }
    Ok(entries)
}

impl RenderedDocument {
    pub fn write_to<W: Write + Seek>(&self, w: W) -> Result<()> {
        let mut zip = ZipWriter::new(w);
        for e in &self.entries {
            // only deflate is compiled in; anything else is re-deflated
            let method = match e.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = FileOptions::default().compression_method(method);
            if e.is_dir {
                zip.add_directory(e.name.clone(), options)?;
            } else {
                zip.start_file(e.name.clone(), options)?;
                zip.write_all(&e.data)?;
            }
        }
        zip.finish()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write_to(&mut buf)?;
        Ok(buf.into_inner())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Text of a named part, for inspection.
    pub fn part_text(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| std::str::from_utf8(&e.data).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));
            for (name, data) in entries {
                zip.start_file(*name, FileOptions::default()).unwrap();
                zip.write_all(data).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn entry_over_limit_is_rejected() {
        let bytes = archive(&[("word/document.xml", &[b'a'; 100][..])]);
        let err = read_entries("big.docx", &bytes, 16).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"), "{err}");
    }

    #[test]
    fn entry_at_limit_is_kept_whole() {
        let bytes = archive(&[("word/document.xml", &[b'a'; 16][..])]);
        let entries = read_entries("ok.docx", &bytes, 16).unwrap();
        assert_eq!(entries[0].data.len(), 16);
    }
}
