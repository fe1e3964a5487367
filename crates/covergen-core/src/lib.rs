pub mod error;
pub mod validate;

pub mod config;
pub mod letter;
pub mod normalize;
pub mod record;
pub mod slug;
pub mod template;

pub use crate::config::{Config, PathSet, TemplateSpec};
pub use crate::error::{CoverError, Result};
pub use crate::letter::{customize, LetterContext, Outcome};
pub use crate::normalize::{
    normalize_path, normalize_reader, normalize_table_path, normalize_table_reader,
    NormalizeOptions, Table,
};
pub use crate::record::Record;
pub use crate::template::Template;
