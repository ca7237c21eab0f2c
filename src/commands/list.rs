//! Command: list available profiles.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::logging::Logger;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::paths::Paths;
use crate::profile::{self, ProfileMeta, loader::Format};

/// Descriptor files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if `dir` does not exist or cannot be read.
pub fn discover(fs: &dyn FileSystemOps, dir: &Path) -> Result<Vec<PathBuf>> {
    if !fs.exists(dir) {
        anyhow::bail!("profiles directory not found: {}", dir.display());
    }
    let entries = fs
        .read_dir(dir)
        .with_context(|| format!("reading profiles directory {}", dir.display()))?;
    Ok(entries
        .into_iter()
        .filter(|p| Format::from_path(p).is_some() && fs.is_file(p))
        .collect())
}

/// Render one aligned `name  version  description` row per profile.
#[must_use]
pub fn render_rows(profiles: &[ProfileMeta]) -> Vec<String> {
    let name_width = profiles.iter().map(|m| m.name.len()).max().unwrap_or(0);
    let version_width = profiles.iter().map(|m| m.version.len()).max().unwrap_or(0);
    profiles
        .iter()
        .map(|m| {
            let row = format!(
                "{:<name_width$}  {:<version_width$}  {}",
                m.name,
                m.version,
                m.description.as_deref().unwrap_or("")
            );
            row.trim_end().to_string()
        })
        .collect()
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the profiles directory cannot be read.
pub fn run(paths: &Paths, log: &Logger) -> Result<()> {
    let dir = paths.profiles_dir();
    let files = discover(&SystemFileSystemOps, &dir)?;

    let mut profiles = Vec::new();
    for file in &files {
        match profile::load(file) {
            Ok(p) => profiles.push(p.meta),
            Err(e) => log.warn(&format!("skipping {}: {e}", file.display())),
        }
    }

    if profiles.is_empty() {
        log.info(&format!("no profiles found in {}", dir.display()));
        return Ok(());
    }
    for row in render_rows(&profiles) {
        println!("{row}");
    }
    Ok(())
}
