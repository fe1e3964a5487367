// crates/covergen-cli/src/io/config_file.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use covergen_core::Config;

pub const CONFIG_ENV: &str = "COVERGEN_CONFIG";
pub const ENVIRONMENT_ENV: &str = "COVERGEN_ENV";

/// `--config`, else `$COVERGEN_CONFIG`, else `<config dir>/covergen/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let dir = dirs::config_dir()
        .context("no --config given and no user config directory on this platform")?;
    Ok(dir.join("covergen").join("config.toml"))
}

/// Load and validate a config file.
pub fn load_config(explicit: Option<&Path>) -> Result<(PathBuf, Config)> {
    let path = config_path(explicit)?;
    let cfg = Config::load(&path).with_context(|| format!("load config {}", path.display()))?;
    Ok((path, cfg))
}

/// Environment names to try after `--env`: `$COVERGEN_ENV`, then the
/// machine's host name as the OS reports it.
pub fn environment_fallbacks() -> [Option<String>; 2] {
    [std::env::var(ENVIRONMENT_ENV).ok(), host_name()]
}

/// `None` when the host name is not valid UTF-8.
fn host_name() -> Option<String> {
    gethostname::gethostname().into_string().ok()
}
