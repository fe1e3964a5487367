// crates/covergen-cli/src/io/csv_out.rs

use std::io::Write;

use anyhow::{Context, Result};
use covergen_core::Table;

/// Write a normalized table as CSV. The header row is written even when there
/// are no records.
pub fn write_table<W: Write>(w: W, table: &Table) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(&table.headers).context("write csv header")?;
    for r in &table.records {
        wtr.write_record(r.values())
            .with_context(|| format!("write csv row (source line {})", r.line()))?;
    }
    wtr.flush().context("flush csv output")?;
    Ok(())
}
