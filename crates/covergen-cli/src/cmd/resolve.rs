// crates/covergen-cli/src/cmd/resolve.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use covergen_core::slug;

#[derive(Args)]
pub struct ResolveArgs {
    /// Base directory the slug will live under
    #[arg(long)]
    pub dir: PathBuf,

    /// Desired slug
    #[arg(long)]
    pub slug: String,
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let name = slug::resolve(&args.dir, &args.slug)
        .with_context(|| format!("resolve '{}' under {}", args.slug, args.dir.display()))?;
    println!("{name}");
    Ok(())
}
