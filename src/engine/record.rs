//! Append-only install record.
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::profile::Profile;

/// Format one record line: timestamp, name, version and source path,
/// separated by tabs.
#[must_use]
pub fn format_record(profile: &Profile, at: DateTime<Utc>) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        profile.meta.name,
        profile.meta.version,
        profile.source.display()
    )
}

/// Append a record line for `profile` to the log at `path`.
///
/// # Errors
///
/// Returns an error if the log cannot be opened or written.
pub fn append_record(path: &Path, profile: &Profile, at: DateTime<Utc>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening install record {}", path.display()))?;
    writeln!(file, "{}", format_record(profile, at))
        .with_context(|| format!("writing install record {}", path.display()))?;
    Ok(())
}
