use std::collections::HashSet;

use crate::config::Config;
use crate::error::{CoverError, Result};
use crate::template::placeholder::is_name_char;

pub fn validate_config(c: &Config) -> Result<()> {
    if c.identifier_field.trim().is_empty() {
        return Err(CoverError::Config("identifier_field must be non-empty".into()));
    }
    if let Some(f) = &c.template_field {
        if f.trim().is_empty() {
            return Err(CoverError::Config("template_field must be non-empty when set".into()));
        }
    }

    // Extension is interpolated into a file name.
    let ext = c.output_extension.as_str();
    if ext.is_empty() || ext.contains(['.', '/', '\\', '\0']) {
        return Err(CoverError::Config(format!(
            "output_extension '{ext}' must be a bare extension like 'docx'"
        )));
    }

    if c.environments.is_empty() {
        return Err(CoverError::Config(
            "at least one [environments.<name>] entry is required".into(),
        ));
    }

    for (name, t) in &c.templates {
        if t.file.trim().is_empty() {
            return Err(CoverError::Config(format!("template '{name}': file must be non-empty")));
        }
        let mut seen = HashSet::new();
        for p in &t.placeholders {
            if p.is_empty() || !p.chars().all(is_name_char) {
                return Err(CoverError::Config(format!(
                    "template '{name}': placeholder '{p}' must use [A-Za-z0-9_.-]"
                )));
            }
            if !seen.insert(p.as_str()) {
                return Err(CoverError::Config(format!(
                    "template '{name}': placeholder '{p}' declared twice"
                )));
            }
        }
    }

    if let Some(d) = &c.default_template {
        if !c.templates.contains_key(d) {
            return Err(CoverError::Config(format!(
                "default_template '{d}' has no [templates.{d}] entry"
            )));
        }
    }

    Ok(())
}
