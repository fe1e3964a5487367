// crates/covergen-core/src/letter.rs
//
// One record -> one application directory holding one customized letter.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Config, TemplateSpec};
use crate::error::Result;
use crate::record::Record;
use crate::slug;
use crate::template::Template;

/// Everything `customize` needs besides the record.
///
/// `plan` must live for the whole batch: it is what keeps two rows of a dry
/// run from resolving to the same directory.
pub struct LetterContext<'a> {
    pub app_path: &'a Path,
    pub config: &'a Config,
    pub template: &'a Template,
    pub spec: &'a TemplateSpec,
    pub plan: &'a mut slug::Plan,
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub slug: String,
    pub directory: PathBuf,
    pub document: PathBuf,
    pub written: bool,
}

/// Claim `app_path/<slug>`, render the template with the record's fields and
/// save `cover_letter_<slug>.<ext>` inside it.
///
/// Dry run resolves through the batch plan instead of claiming and writes
/// nothing; placeholders are still bound so unknown or missing fields fail the
/// same way.
pub fn customize(record: &Record, ctx: &mut LetterContext<'_>) -> Result<Outcome> {
    let candidate = record.get(&ctx.config.identifier_field).unwrap_or_default();
    let values = ctx.template.bind(ctx.spec, record)?;

    if ctx.dry_run {
        let name = ctx.plan.resolve(ctx.app_path, candidate)?;
        let directory = ctx.app_path.join(&name);
        let document = directory.join(ctx.config.output_file_name(&name));
        return Ok(Outcome {
            slug: name,
            directory,
            document,
            written: false,
        });
    }

    let doc = ctx.template.render(&values)?;
    let (name, directory) = slug::claim(ctx.app_path, candidate)?;
    ctx.plan.record(&name);
    let document = directory.join(ctx.config.output_file_name(&name));
    doc.save(&document)?;

    info!(
        line = record.line(),
        slug = %name,
        template = %ctx.template.name(),
        template_id = %ctx.template.id(),
        "wrote {}",
        document.display()
    );

    Ok(Outcome {
        slug: name,
        directory,
        document,
        written: true,
    })
}
