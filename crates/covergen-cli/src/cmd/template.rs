// crates/covergen-cli/src/cmd/template.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use covergen_core::Template;

#[derive(Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub cmd: TemplateCmd,
}

#[derive(Subcommand)]
pub enum TemplateCmd {
    /// Print the template id and every ${placeholder} it contains
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Template path (.docx)
    #[arg(long)]
    pub file: PathBuf,
}

pub fn run(args: TemplateArgs) -> anyhow::Result<()> {
    match args.cmd {
        TemplateCmd::Inspect(a) => cmd_inspect(a),
    }
}

fn cmd_inspect(a: InspectArgs) -> anyhow::Result<()> {
    let t = Template::open(&a.file).with_context(|| format!("open template {}", a.file.display()))?;
    let names = t.placeholders()?;

    println!("template_path = {}", a.file.display());
    println!("template_id   = {}", t.id());
    println!(
        "docx_rs_read  = {}",
        if t.reader_placeholders().is_some() {
            "ok"
        } else {
            "failed"
        }
    );
    println!("placeholders  = {}", names.len());
    for n in &names {
        println!("  ${{{n}}}");
    }
    Ok(())
}
