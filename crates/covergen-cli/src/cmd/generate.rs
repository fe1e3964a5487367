// crates/covergen-cli/src/cmd/generate.rs

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use covergen_core::slug::Plan;
use covergen_core::{customize, normalize_path, LetterContext, NormalizeOptions, Template};
use tracing::info;

use crate::io::config_file;

#[derive(Args)]
pub struct GenerateArgs {
    /// Input CSV path, one row per application
    #[arg(long)]
    pub csv: PathBuf,

    /// Config file (default: $COVERGEN_CONFIG or <config dir>/covergen/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Environment name under [environments] (default: $COVERGEN_ENV, then host name)
    #[arg(long)]
    pub env: Option<String>,

    /// Template name for rows without a template column value
    #[arg(long)]
    pub template: Option<String>,

    /// Override the config's identifier column
    #[arg(long)]
    pub identifier_field: Option<String>,

    /// Fail on duplicate identifiers instead of renaming them
    #[arg(long)]
    pub strict: bool,

    /// Resolve and validate everything, write nothing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (cfg_path, mut cfg) = config_file::load_config(args.config.as_deref())?;
    if let Some(f) = args.identifier_field {
        cfg.identifier_field = f;
    }

    let fallbacks = config_file::environment_fallbacks();
    let (env_name, paths) = cfg
        .select_environment(args.env.as_deref(), fallbacks.iter().map(|v| v.as_deref()))
        .with_context(|| format!("select environment from {}", cfg_path.display()))?;
    info!(env = %env_name, app_path = %paths.app_path.display(), "environment selected");

    let opts = NormalizeOptions::new()
        .identifier_field(cfg.identifier_field.clone())
        .make_unique(!args.strict);
    let records = normalize_path(&args.csv, &opts)
        .with_context(|| format!("normalize {}", args.csv.display()))?;

    if !args.dry_run {
        std::fs::create_dir_all(&paths.app_path)
            .with_context(|| format!("create {}", paths.app_path.display()))?;
    }

    let mut templates: HashMap<String, Template> = HashMap::new();
    let mut plan = Plan::new();
    let mut written = 0usize;

    for record in &records {
        let name = cfg.template_name_for(record, args.template.as_deref())?;
        let spec = cfg.template(name)?;

        if !templates.contains_key(name) {
            let p = paths.template_path.join(&spec.file);
            let t = Template::open(&p).with_context(|| format!("open template {}", p.display()))?;
            info!(template = name, id = %t.id(), "loaded {}", p.display());
            templates.insert(name.to_string(), t);
        }
        let template = &templates[name];

        let mut ctx = LetterContext {
            app_path: &paths.app_path,
            config: &cfg,
            template,
            spec,
            plan: &mut plan,
            dry_run: args.dry_run,
        };
        let out = customize(record, &mut ctx)
            .with_context(|| format!("{}: line {}", args.csv.display(), record.line()))?;

        println!("slug={} path={}", out.slug, out.document.display());
        if out.written {
            written += 1;
        }
    }

    eprintln!(
        "generate ok: rows={} written={} dry_run={} env={}",
        records.len(),
        written,
        args.dry_run,
        env_name
    );
    Ok(())
}
