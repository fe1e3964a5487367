// crates/covergen-core/src/normalize.rs
//
// CSV row normalization.
//
// Rules:
// - Header row is line 1; data rows are numbered from 2.
// - Every header name and every value is whitespace-trimmed.
// - The identifier field must be non-empty on every row.
// - Unique mode renames the Nth occurrence of `x` to `x_N`.
// - Strict mode fails on the first repeated identifier.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{CoverError, Result};
use crate::record::Record;

pub const DEFAULT_IDENTIFIER_FIELD: &str = "slug";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    identifier_field: String,
    make_unique: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            identifier_field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            make_unique: true,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier_field(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = field.into();
        self
    }

    /// `false` selects strict mode (fail on duplicates instead of renaming).
    pub fn make_unique(mut self, make_unique: bool) -> Self {
        self.make_unique = make_unique;
        self
    }

    pub fn field(&self) -> &str {
        &self.identifier_field
    }

    pub fn is_unique_mode(&self) -> bool {
        self.make_unique
    }
}

/// Normalized rows plus the trimmed header row they came from.
///
/// `headers` is kept even when `records` is empty, so a header-only input
/// can be written back out unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Normalize the CSV file at `path`.
pub fn normalize_path(path: &Path, opts: &NormalizeOptions) -> Result<Vec<Record>> {
    Ok(normalize_table_path(path, opts)?.records)
}

/// Normalize CSV read from any reader (in-memory input, stdin).
pub fn normalize_reader<R: Read>(reader: R, opts: &NormalizeOptions) -> Result<Vec<Record>> {
    Ok(normalize_table_reader(reader, opts)?.records)
}

/// [`normalize_path`], keeping the header row.
pub fn normalize_table_path(path: &Path, opts: &NormalizeOptions) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    normalize_bytes(&bytes, opts)
}

/// [`normalize_reader`], keeping the header row.
pub fn normalize_table_reader<R: Read>(mut reader: R, opts: &NormalizeOptions) -> Result<Table> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    normalize_bytes(&bytes, opts)
}

fn normalize_bytes(bytes: &[u8], opts: &NormalizeOptions) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let id_idx = headers
        .iter()
        .position(|h| h == opts.field())
        .ok_or_else(|| CoverError::MissingColumn {
            field: opts.field().to_string(),
        })?;

    let mut ids = Identifiers::new(opts.is_unique_mode());
    let mut out = Vec::new();

    for (i, row) in rdr.records().enumerate() {
        let line = i as u64 + 2;
        let row = row.map_err(|e| row_error(line, e))?;

        let mut record = Record::new(line, trimmed_fields(&headers, &row));

        let base = record.values().nth(id_idx).unwrap_or_default().to_string();
        if base.is_empty() {
            return Err(CoverError::EmptyIdentifier {
                line,
                field: opts.field().to_string(),
            });
        }

        let id = ids.admit(base.clone(), line)?;
        if id != base {
            debug!(line, from = %base, to = %id, "renamed duplicate identifier");
            record.set(opts.field(), id);
        }
        out.push(record);
    }

    debug!(rows = out.len(), field = opts.field(), "normalized csv");
    Ok(Table {
        headers,
        records: out,
    })
}

fn trimmed_fields(headers: &[String], row: &StringRecord) -> Vec<(String, String)> {
    headers
        .iter()
        .zip(row.iter())
        .map(|(h, v)| (h.clone(), v.trim().to_string()))
        .collect()
}

fn row_error(line: u64, e: csv::Error) -> CoverError {
    let reason = match e.kind() {
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        ErrorKind::Utf8 { .. } => "invalid UTF-8".to_string(),
        _ => return CoverError::Csv(e),
    };
    CoverError::MalformedRow { line, reason }
}

/// Identifier bookkeeping for one normalization pass.
enum Identifiers {
    /// base -> occurrence count, plus every identifier handed out so far.
    Unique {
        counts: HashMap<String, u32>,
        emitted: HashSet<String>,
    },
    /// identifier -> line where it was first seen.
    Strict { first_seen: HashMap<String, u64> },
}

impl Identifiers {
    fn new(make_unique: bool) -> Self {
        if make_unique {
            Identifiers::Unique {
                counts: HashMap::new(),
                emitted: HashSet::new(),
            }
        } else {
            Identifiers::Strict {
                first_seen: HashMap::new(),
            }
        }
    }

    fn admit(&mut self, base: String, line: u64) -> Result<String> {
        match self {
            Identifiers::Unique { counts, emitted } => {
                let count = counts.entry(base.clone()).or_insert(0);
                *count += 1;
                let mut id = if *count == 1 {
                    base.clone()
                } else {
                    format!("{base}_{count}")
                };
                // A literal `x_2` earlier in the file must not be handed out twice.
                while emitted.contains(&id) {
                    *count += 1;
                    id = format!("{base}_{count}");
                }
                emitted.insert(id.clone());
                Ok(id)
            }
            Identifiers::Strict { first_seen } => {
                if let Some(&first_line) = first_seen.get(&base) {
                    return Err(CoverError::DuplicateIdentifier {
                        id: base,
                        first_line,
                        line,
                    });
                }
                first_seen.insert(base.clone(), line);
                Ok(base)
            }
        }
    }
}
