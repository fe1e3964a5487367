// crates/covergen-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoverError>;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown environment '{name}' (known: {known})")]
    UnknownEnvironment { name: String, known: String },

    #[error("csv header has no '{field}' column")]
    MissingColumn { field: String },

    #[error("line {line}: empty '{field}' value")]
    EmptyIdentifier { line: u64, field: String },

    #[error("duplicate identifier '{id}' on line {line} (first seen on line {first_line})")]
    DuplicateIdentifier { id: String, first_line: u64, line: u64 },

    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("invalid slug: {0}")]
    InvalidSlug(String),

    #[error("template '{template}' uses undeclared placeholder '{name}'")]
    UnknownPlaceholder { template: String, name: String },

    #[error("line {line}: record has no value for placeholder '{field}'")]
    MissingField { line: u64, field: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
