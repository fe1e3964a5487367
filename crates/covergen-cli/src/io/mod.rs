// crates/covergen-cli/src/io/mod.rs

pub mod config_file;
pub mod csv_out;
