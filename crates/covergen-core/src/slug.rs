// crates/covergen-core/src/slug.rs

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoverError, Result};

/// Reject anything that is not a single, plain path segment.
pub fn validate_segment(candidate: &str) -> Result<()> {
    if candidate.is_empty() {
        return Err(CoverError::InvalidSlug("slug is empty".into()));
    }
    if candidate == "." || candidate == ".." {
        return Err(CoverError::InvalidSlug(format!(
            "'{candidate}' is not a directory name"
        )));
    }
    if candidate.contains(['/', '\\', '\0']) {
        return Err(CoverError::InvalidSlug(format!(
            "'{candidate}' contains a path separator or NUL"
        )));
    }
    Ok(())
}

/// `candidate`, then `candidate_2`, `candidate_3`, ...
fn suffixed(candidate: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(candidate.to_string())
        .chain((2u64..).map(move |n| format!("{candidate}_{n}")))
}

fn entry_exists(path: &Path) -> bool {
    // symlink_metadata so a dangling symlink still counts as taken
    fs::symlink_metadata(path).is_ok()
}

/// First name in the suffix sequence with no entry under `base_dir`.
///
/// Point-in-time only: nothing is created, so another writer may take the
/// name before the caller does. Use [`claim`] when creating the directory.
pub fn resolve(base_dir: &Path, candidate: &str) -> Result<String> {
    validate_segment(candidate)?;
    let name = suffixed(candidate)
        .find(|name| !entry_exists(&base_dir.join(name)))
        .ok_or_else(|| CoverError::InvalidSlug(format!("no free name for '{candidate}'")))?;
    if name != candidate {
        debug!(candidate, resolved = %name, "slug taken, suffixed");
    }
    Ok(name)
}

/// Atomically create `base_dir/<unique name>` and return (name, path).
///
/// `create_dir` is the reservation: `AlreadyExists` moves on to the next
/// suffix, any other error is returned.
pub fn claim(base_dir: &Path, candidate: &str) -> Result<(String, PathBuf)> {
    validate_segment(candidate)?;
    for name in suffixed(candidate) {
        let path = base_dir.join(&name);
        match fs::create_dir(&path) {
            Ok(()) => {
                if name != candidate {
                    debug!(candidate, claimed = %name, "slug taken, suffixed");
                }
                return Ok((name, path));
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(CoverError::Io(e)),
        }
    }
    Err(CoverError::InvalidSlug(format!("no free name for '{candidate}'")))
}

/// Names handed out during one batch, for resolving without creating
/// anything.
///
/// A dry run never creates directories, so [`resolve`] alone would hand the
/// same free name to two rows. `Plan` treats every name it has returned as
/// taken, which makes a dry run agree with what a real run would claim.
#[derive(Debug, Default)]
pub struct Plan {
    taken: HashSet<String>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`resolve`], but also skips names already returned by this plan.
    pub fn resolve(&mut self, base_dir: &Path, candidate: &str) -> Result<String> {
        validate_segment(candidate)?;
        let name = suffixed(candidate)
            .find(|name| !self.taken.contains(name) && !entry_exists(&base_dir.join(name)))
            .ok_or_else(|| CoverError::InvalidSlug(format!("no free name for '{candidate}'")))?;
        if name != candidate {
            debug!(candidate, planned = %name, "slug taken, suffixed");
        }
        self.taken.insert(name.clone());
        Ok(name)
    }

    /// Record a name claimed on disk.
    pub fn record(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
