// Shared helpers for integration tests.
//
// Provides a temporary orchestrator root with component script directories,
// a profiles directory and isolated config/cache directories, so each
// integration test runs against real `sh` entrypoints without touching the
// user's environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use profile_engine::logging::Logger;
use profile_engine::paths::Paths;

/// An isolated orchestrator root backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `root/`          component directories and `profiles/`
/// - `root/markers/`  files touched by test scripts to prove they ran
/// - `config/`        generated `profile-<name>.env` files
/// - `cache/`         install record, run logs, plan artifacts
pub struct TestRepo {
    dir: tempfile::TempDir,
    /// Paths handed to the commands under test.
    pub paths: Paths,
}

impl TestRepo {
    /// Create an empty repository.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("root");
        std::fs::create_dir_all(root.join("profiles")).expect("create profiles dir");
        std::fs::create_dir_all(root.join("markers")).expect("create markers dir");
        let paths = Paths {
            root,
            config_dir: dir.path().join("config"),
            cache_dir: dir.path().join("cache"),
        };
        Self { dir, paths }
    }

    /// Directory under the root, e.g. `"core/git"` or `"components/cloud/aws"`.
    pub fn dir(&self, rel: &str) -> PathBuf {
        self.paths.root.join(rel)
    }

    /// Write `body` as `<rel>/<script>` under the root.
    pub fn script(self, rel: &str, script: &str, body: &str) -> Self {
        let dir = self.dir(rel);
        std::fs::create_dir_all(&dir).expect("create component dir");
        std::fs::write(dir.join(script), body).expect("write script");
        self
    }

    /// Component at `rel` whose install script touches `markers/<marker>`.
    pub fn installs(self, rel: &str, marker: &str) -> Self {
        let body = format!("touch \"$ENGINE_ROOT/markers/{marker}\"\n");
        self.script(rel, "install.sh", &body)
    }

    /// Component at `rel` whose install script exits with `code`.
    pub fn fails(self, rel: &str, code: i32) -> Self {
        self.script(rel, "install.sh", &format!("exit {code}\n"))
    }

    /// Add a validate script at `rel` that exits with `code`.
    pub fn validates(self, rel: &str, code: i32) -> Self {
        self.script(rel, "validate.sh", &format!("exit {code}\n"))
    }

    /// Write a profile descriptor to `profiles/<file>` and return its path.
    pub fn profile(&self, file: &str, content: &str) -> PathBuf {
        let path = self.paths.profiles_dir().join(file);
        std::fs::write(&path, content).expect("write profile");
        path
    }

    /// Whether the marker written by [`TestRepo::installs`] exists.
    pub fn marker(&self, name: &str) -> bool {
        self.paths.root.join("markers").join(name).exists()
    }

    /// Names of all markers written so far, sorted.
    pub fn markers(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.paths.root.join("markers"))
            .expect("read markers")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Lines of the install record log, or empty if it does not exist.
    pub fn record_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.paths.record_log())
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Contents of the generated env file for `profile`, if present.
    pub fn env_file(&self, profile: &str) -> Option<String> {
        std::fs::read_to_string(self.paths.env_file(profile)).ok()
    }

    /// Temporary directory holding the whole fixture.
    pub fn base(&self) -> &Path {
        self.dir.path()
    }
}

/// Logger with no run-log file.
pub fn logger() -> Arc<Logger> {
    Arc::new(Logger::new(None))
}
