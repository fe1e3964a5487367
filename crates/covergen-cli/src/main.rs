// crates/covergen-cli/src/main.rs

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "covergen")]
#[command(
    about = "Cover letter generator: CSV rows -> customized .docx per application",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a CSV (trim, check + dedupe identifiers) and print it
    Normalize(cmd::normalize::NormalizeArgs),

    /// Print a slug that is free under a directory
    Resolve(cmd::resolve::ResolveArgs),

    /// Generate one cover letter per CSV row
    Generate(cmd::generate::GenerateArgs),

    /// Template tools (.docx)
    Template(cmd::template::TemplateArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("covergen=info,covergen_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Normalize(args) => cmd::normalize::run(args),
        Commands::Resolve(args) => cmd::resolve::run(args),
        Commands::Generate(args) => cmd::generate::run(args),
        Commands::Template(args) => cmd::template::run(args),
    }
}
