//! Materializing profile configuration as a `KEY=VALUE` file.
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::Context;
use crate::logging::Log;
use crate::profile::validation::is_valid_config_key;
use crate::profile::{Profile, ScalarValue};

/// Quote `value` for a POSIX-shell-compatible env file.
///
/// Values made only of `[A-Za-z0-9_./:@%+,=-]` are written bare; anything
/// else is single-quoted with embedded `'` written as `'\''`.
///
/// # Examples
///
/// ```
/// use profile_engine::engine::configure::quote_value;
///
/// assert_eq!(quote_value("nvim"), "nvim");
/// assert_eq!(quote_value("a b"), "'a b'");
/// assert_eq!(quote_value("it's"), r"'it'\''s'");
/// assert_eq!(quote_value(""), "''");
/// ```
#[must_use]
pub fn quote_value(value: &str) -> String {
    let bare = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_./:@%+,=-".contains(c));
    if bare {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Render configuration entries as env-file content, in document order.
///
/// Entries whose key is not a valid environment variable name are skipped
/// with a warning.
#[must_use]
pub fn render_env(configuration: &[(String, ScalarValue)], log: &dyn Log) -> String {
    let mut out = String::new();
    for (key, value) in configuration {
        if !is_valid_config_key(key) {
            log.warn(&format!("skipping configuration key '{key}': not a valid variable name"));
            continue;
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&quote_value(&value.to_string()));
        out.push('\n');
    }
    out
}

/// Replace `path` with `content` via a temporary file in the same directory.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating config directory {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context("writing configuration")?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

/// Write the profile's configuration to `profile-<name>.env`.
///
/// An empty `configuration` section is a no-op and returns `Ok(None)`;
/// otherwise the file is overwritten in full and its path returned.
///
/// # Errors
///
/// Returns an error if the config directory or file cannot be written.
pub fn apply_configuration(ctx: &Context, profile: &Profile) -> Result<Option<PathBuf>> {
    if profile.configuration.is_empty() {
        ctx.log.debug("no configuration entries");
        return Ok(None);
    }
    let path = ctx.paths.env_file(&profile.meta.name);
    let content = render_env(&profile.configuration, ctx.log.as_ref());
    write_atomic(&path, &content)?;
    ctx.log.info(&format!(
        "wrote {} setting(s) to {}",
        content.lines().count(),
        path.display()
    ));
    Ok(Some(path))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::engine::test_helpers::{sample_profile, test_context_in};
    use crate::logging::CaptureLog;

    fn entries(pairs: &[(&str, ScalarValue)]) -> Vec<(String, ScalarValue)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn quoting_rules() {
        assert_eq!(quote_value("/usr/bin:/bin"), "/usr/bin:/bin");
        assert_eq!(quote_value("user@host"), "user@host");
        assert_eq!(quote_value("$HOME"), "'$HOME'");
        assert_eq!(quote_value("a\"b"), "'a\"b'");
    }

    #[test]
    fn render_keeps_document_order_and_types() {
        let log = CaptureLog::default();
        let rendered = render_env(
            &entries(&[
                ("EDITOR", ScalarValue::Str("nvim".into())),
                ("RETRIES", ScalarValue::Int(3)),
                ("DEBUG", ScalarValue::Bool(false)),
                ("GREETING", ScalarValue::Str("hello world".into())),
            ]),
            &log,
        );
        insta::assert_snapshot!(rendered.trim_end(), @r"
        EDITOR=nvim
        RETRIES=3
        DEBUG=false
        GREETING='hello world'
        ");
    }

    #[test]
    fn invalid_keys_are_skipped_with_warning() {
        let log = CaptureLog::default();
        let rendered = render_env(
            &entries(&[
                ("bad-key", ScalarValue::Int(1)),
                ("GOOD", ScalarValue::Int(2)),
            ]),
            &log,
        );
        assert_eq!(rendered, "GOOD=2\n");
        assert_eq!(log.messages("warn").len(), 1);
    }

    #[test]
    fn empty_configuration_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = test_context_in(dir.path(), false);
        let mut profile = sample_profile();
        profile.configuration.clear();
        assert_eq!(apply_configuration(&ctx, &profile).unwrap(), None);
        assert!(!ctx.paths.env_file("sample").exists());
    }

    #[test]
    fn applying_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = test_context_in(dir.path(), false);
        let profile = sample_profile();

        let path = apply_configuration(&ctx, &profile).unwrap().unwrap();
        let first = std::fs::read(&path).unwrap();
        let again = apply_configuration(&ctx, &profile).unwrap().unwrap();
        assert_eq!(path, again);
        assert_eq!(std::fs::read(&again).unwrap(), first);
    }

    #[test]
    fn apply_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _log) = test_context_in(dir.path(), false);
        let path = ctx.paths.env_file("sample");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "STALE=1\nOTHER=2\n").unwrap();

        apply_configuration(&ctx, &sample_profile()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("STALE"));
        assert!(content.starts_with("EDITOR=nvim\n"));
    }
}
