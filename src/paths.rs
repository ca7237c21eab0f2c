//! Resolution of the engine's working directories.
//!
//! # Environment Variables
//!
//! - `ENGINE_ROOT` - orchestrator root (overridden by `--root`)
//! - `ENGINE_CONFIG_DIR` - directory for generated `profile-<name>.env` files
//! - `ENGINE_CACHE_DIR` - directory for the install record and run logs
//!
//! Without overrides the config and cache directories follow XDG:
//! `$XDG_CONFIG_HOME/profile-engine` and `$XDG_CACHE_HOME/profile-engine`,
//! falling back to `~/.config/profile-engine` and `~/.cache/profile-engine`.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Environment variable for the orchestrator root.
pub const ENV_ROOT: &str = "ENGINE_ROOT";

/// Environment variable for the config directory override.
pub const ENV_CONFIG_DIR: &str = "ENGINE_CONFIG_DIR";

/// Environment variable for the cache directory override.
pub const ENV_CACHE_DIR: &str = "ENGINE_CACHE_DIR";

const APP_DIR: &str = "profile-engine";

/// Name of the append-only install record log inside the cache directory.
pub const RECORD_LOG_NAME: &str = "installed_profiles.log";

/// Directories the engine reads from and writes to, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Orchestrator root holding component directories and `profiles/`.
    pub root: PathBuf,
    /// Per-user directory receiving generated configuration files.
    pub config_dir: PathBuf,
    /// Directory receiving the install record, run logs and plan artifacts.
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Resolve paths from the `--root` flag and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if neither a root nor a usable current directory is
    /// available, or if no home directory can be determined.
    pub fn resolve(root_flag: Option<&Path>) -> Result<Self> {
        Self::resolve_with(root_flag, |key| std::env::var(key).ok())
    }

    /// Resolve paths using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// See [`Paths::resolve`].
    pub fn resolve_with(
        root_flag: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let root = match root_flag {
            Some(root) => root.to_path_buf(),
            None => match lookup(ENV_ROOT) {
                Some(root) if !root.is_empty() => PathBuf::from(root),
                _ => std::env::current_dir().context("reading current directory")?,
            },
        };
        // Keep the path as given when it does not exist; commands report that.
        let root = dunce::canonicalize(&root).unwrap_or(root);

        let home = || {
            lookup("HOME")
                .or_else(|| lookup("USERPROFILE"))
                .filter(|h| !h.is_empty())
                .map(PathBuf::from)
                .context("neither HOME nor USERPROFILE environment variable is set")
        };

        let config_dir = match (lookup(ENV_CONFIG_DIR), lookup("XDG_CONFIG_HOME")) {
            (Some(dir), _) if !dir.is_empty() => PathBuf::from(dir),
            (_, Some(xdg)) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home()?.join(".config").join(APP_DIR),
        };

        let cache_dir = match (lookup(ENV_CACHE_DIR), lookup("XDG_CACHE_HOME")) {
            (Some(dir), _) if !dir.is_empty() => PathBuf::from(dir),
            (_, Some(xdg)) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home()?.join(".cache").join(APP_DIR),
        };

        Ok(Self {
            root,
            config_dir,
            cache_dir,
        })
    }

    /// Directory scanned by `engine list`.
    #[must_use]
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Generated configuration file for the named profile.
    #[must_use]
    pub fn env_file(&self, profile_name: &str) -> PathBuf {
        self.config_dir.join(format!("profile-{profile_name}.env"))
    }

    /// Append-only install record log.
    #[must_use]
    pub fn record_log(&self) -> PathBuf {
        self.cache_dir.join(RECORD_LOG_NAME)
    }

    /// Per-command run log written by the tracing file layer.
    #[must_use]
    pub fn run_log(&self, command: &str) -> PathBuf {
        self.cache_dir.join(format!("{command}.log"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn root_flag_wins_over_environment() {
        let paths = Paths::resolve_with(
            Some(Path::new("/explicit/root")),
            env(&[("ENGINE_ROOT", "/env/root"), ("HOME", "/home/u")]),
        )
        .unwrap();
        assert_eq!(paths.root, PathBuf::from("/explicit/root"));
    }

    #[test]
    fn root_from_environment() {
        let paths =
            Paths::resolve_with(None, env(&[("ENGINE_ROOT", "/env/root"), ("HOME", "/home/u")]))
                .unwrap();
        assert_eq!(paths.root, PathBuf::from("/env/root"));
    }

    #[test]
    fn defaults_follow_home() {
        let paths = Paths::resolve_with(Some(Path::new("/r")), env(&[("HOME", "/home/u")])).unwrap();
        assert_eq!(
            paths.config_dir,
            PathBuf::from("/home/u/.config/profile-engine")
        );
        assert_eq!(
            paths.cache_dir,
            PathBuf::from("/home/u/.cache/profile-engine")
        );
    }

    #[test]
    fn xdg_directories_are_respected() {
        let paths = Paths::resolve_with(
            Some(Path::new("/r")),
            env(&[
                ("HOME", "/home/u"),
                ("XDG_CONFIG_HOME", "/xdg/config"),
                ("XDG_CACHE_HOME", "/xdg/cache"),
            ]),
        )
        .unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/xdg/config/profile-engine"));
        assert_eq!(paths.cache_dir, PathBuf::from("/xdg/cache/profile-engine"));
    }

    #[test]
    fn explicit_overrides_beat_xdg() {
        let paths = Paths::resolve_with(
            Some(Path::new("/r")),
            env(&[
                ("XDG_CONFIG_HOME", "/xdg/config"),
                ("ENGINE_CONFIG_DIR", "/over/config"),
                ("ENGINE_CACHE_DIR", "/over/cache"),
            ]),
        )
        .unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/over/config"));
        assert_eq!(paths.cache_dir, PathBuf::from("/over/cache"));
    }

    #[test]
    fn missing_home_without_overrides_errors() {
        let result = Paths::resolve_with(Some(Path::new("/r")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn derived_file_locations() {
        let paths = Paths {
            root: PathBuf::from("/r"),
            config_dir: PathBuf::from("/c"),
            cache_dir: PathBuf::from("/k"),
        };
        assert_eq!(paths.env_file("dev"), PathBuf::from("/c/profile-dev.env"));
        assert_eq!(
            paths.record_log(),
            PathBuf::from("/k/installed_profiles.log")
        );
        assert_eq!(paths.run_log("install"), PathBuf::from("/k/install.log"));
        assert_eq!(paths.profiles_dir(), PathBuf::from("/r/profiles"));
    }
}
