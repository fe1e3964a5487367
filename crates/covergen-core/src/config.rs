// crates/covergen-core/src/config.rs
//
// Injected configuration: per-machine base paths plus the templates and the
// placeholder names each one is allowed to use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoverError, Result};
use crate::normalize::DEFAULT_IDENTIFIER_FIELD;

pub const DEFAULT_OUTPUT_EXTENSION: &str = "docx";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,

    /// Optional CSV column naming the template to use for that row.
    #[serde(default)]
    pub template_field: Option<String>,

    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    #[serde(default)]
    pub default_template: Option<String>,

    #[serde(default)]
    pub environments: BTreeMap<String, PathSet>,

    #[serde(default)]
    pub templates: BTreeMap<String, TemplateSpec>,
}

/// Base paths for one machine.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathSet {
    pub template_path: PathBuf,
    pub app_path: PathBuf,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    /// File name, relative to `PathSet::template_path`.
    pub file: String,
    #[serde(default)]
    pub placeholders: Vec<String>,
}

fn default_identifier_field() -> String {
    DEFAULT_IDENTIFIER_FIELD.to_string()
}

fn default_output_extension() -> String {
    DEFAULT_OUTPUT_EXTENSION.to_string()
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        crate::validate::validate_config(&cfg)?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn environment(&self, name: &str) -> Result<&PathSet> {
        self.environments
            .get(name)
            .ok_or_else(|| CoverError::UnknownEnvironment {
                name: name.to_string(),
                known: self.known_environments(),
            })
    }

    /// Pick the environment name: explicit choice first, then the fallbacks
    /// in order. Fails before any processing if nothing matches.
    pub fn select_environment<'a, I>(
        &self,
        explicit: Option<&str>,
        fallbacks: I,
    ) -> Result<(String, &PathSet)>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let name = explicit
            .map(str::to_string)
            .or_else(|| {
                fallbacks
                    .into_iter()
                    .flatten()
                    .map(str::trim)
                    .find(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .ok_or_else(|| {
                CoverError::Config(format!(
                    "no environment selected (known: {})",
                    self.known_environments()
                ))
            })?;
        let paths = self.environment(&name)?;
        Ok((name, paths))
    }

    pub fn template(&self, name: &str) -> Result<&TemplateSpec> {
        self.templates.get(name).ok_or_else(|| {
            CoverError::Config(format!(
                "unknown template '{name}' (known: {})",
                join_keys(self.templates.keys())
            ))
        })
    }

    /// Template for a record: `template_field` column if configured and
    /// non-empty, else `fallback`, else `default_template`.
    pub fn template_name_for<'a>(
        &'a self,
        record: &'a crate::record::Record,
        fallback: Option<&'a str>,
    ) -> Result<&'a str> {
        let from_row = self
            .template_field
            .as_deref()
            .and_then(|f| record.get(f))
            .filter(|v| !v.is_empty());
        from_row
            .or(fallback)
            .or(self.default_template.as_deref())
            .ok_or_else(|| {
                CoverError::Config(format!(
                    "line {}: no template selected and no default_template configured",
                    record.line()
                ))
            })
    }

    /// `cover_letter_<slug>.<ext>`
    pub fn output_file_name(&self, slug: &str) -> String {
        format!("cover_letter_{slug}.{}", self.output_extension)
    }

    fn known_environments(&self) -> String {
        join_keys(self.environments.keys())
    }
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    let v: Vec<&str> = keys.map(String::as_str).collect();
    if v.is_empty() {
        "none".to_string()
    } else {
        v.join(", ")
    }
}
