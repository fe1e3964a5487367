// crates/covergen-cli/src/cmd/normalize.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use covergen_core::{normalize_table_path, NormalizeOptions};
use tracing::info;

use crate::io::csv_out;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Input CSV path (header row required)
    #[arg(long)]
    pub csv: PathBuf,

    /// Column holding the per-application identifier
    #[arg(long, default_value = "slug")]
    pub identifier_field: String,

    /// Fail on duplicate identifiers instead of renaming them to x_2, x_3, ...
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    let opts = NormalizeOptions::new()
        .identifier_field(args.identifier_field)
        .make_unique(!args.strict);

    let table = normalize_table_path(&args.csv, &opts)
        .with_context(|| format!("normalize {}", args.csv.display()))?;

    csv_out::write_table(std::io::stdout().lock(), &table)?;
    info!(rows = table.records.len(), "normalize ok: {}", args.csv.display());
    Ok(())
}
