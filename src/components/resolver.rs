//! Search-path resolution of component keys.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::script::{INSTALL_SCRIPT, VALIDATE_SCRIPT};
use super::{Component, ComponentKey, ComponentSource, ScriptComponent};
use crate::error::ResolveError;
use crate::operations::FileSystemOps;

/// Resolves keys against the fixed search path under an orchestrator root.
///
/// For `category/name` under root `R` the candidates are, in order:
///
/// 1. `R/<category>/<name>`
/// 2. `R/components/<category>/<name>`
/// 3. `R/core/<category>/<name>`
///
/// The first candidate containing `install.sh` wins.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    fs_ops: Arc<dyn FileSystemOps>,
}

impl Resolver {
    /// Create a resolver for `root`.
    #[must_use]
    pub fn new(root: &Path, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        Self {
            root: root.to_path_buf(),
            fs_ops,
        }
    }

    /// Candidate directories for `key`, in search order.
    #[must_use]
    pub fn candidates(&self, key: &ComponentKey) -> Vec<PathBuf> {
        let category = key.category.as_str();
        vec![
            self.root.join(category).join(&key.name),
            self.root.join("components").join(category).join(&key.name),
            self.root.join("core").join(category).join(&key.name),
        ]
    }
}

impl ComponentSource for Resolver {
    fn resolve(&self, key: &ComponentKey) -> Result<Arc<dyn Component>, ResolveError> {
        let candidates = self.candidates(key);
        let found = candidates
            .iter()
            .find(|dir| self.fs_ops.is_file(&dir.join(INSTALL_SCRIPT)));
        match found {
            Some(dir) => {
                let has_validate = self.fs_ops.is_file(&dir.join(VALIDATE_SCRIPT));
                Ok(Arc::new(ScriptComponent::new(
                    key.clone(),
                    dir.clone(),
                    has_validate,
                )))
            }
            None => Err(ResolveError::NotFound {
                key: key.to_string(),
                searched: candidates,
            }),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::operations::MockFileSystemOps;

    fn key(raw: &str) -> ComponentKey {
        ComponentKey::parse(raw).unwrap()
    }

    #[test]
    fn candidates_follow_search_order() {
        let resolver = Resolver::new(Path::new("/r"), Arc::new(MockFileSystemOps::new()));
        assert_eq!(
            resolver.candidates(&key("cloud/aws")),
            vec![
                PathBuf::from("/r/cloud/aws"),
                PathBuf::from("/r/components/cloud/aws"),
                PathBuf::from("/r/core/cloud/aws"),
            ]
        );
    }

    #[test]
    fn first_candidate_with_install_script_wins() {
        let fs = MockFileSystemOps::new()
            .with_existing("/r/cloud/aws")
            .with_file("/r/components/cloud/aws/install.sh")
            .with_file("/r/core/cloud/aws/install.sh");
        let resolver = Resolver::new(Path::new("/r"), Arc::new(fs));
        let component = resolver.resolve(&key("cloud/aws")).unwrap();
        assert_eq!(component.location(), Path::new("/r/components/cloud/aws"));
        assert_eq!(component.key().to_string(), "cloud/aws");
    }

    #[test]
    fn validate_script_is_discovered_alongside_install() {
        let fs = MockFileSystemOps::new()
            .with_file("/r/core/git/install.sh")
            .with_file("/r/core/git/validate.sh");
        let resolver = Resolver::new(Path::new("/r"), Arc::new(fs));
        assert!(resolver.resolve(&key("core/git")).unwrap().has_validation());
    }

    #[test]
    fn validate_script_elsewhere_is_ignored() {
        let fs = MockFileSystemOps::new()
            .with_file("/r/core/git/install.sh")
            .with_file("/r/components/core/git/validate.sh");
        let resolver = Resolver::new(Path::new("/r"), Arc::new(fs));
        assert!(!resolver.resolve(&key("core/git")).unwrap().has_validation());
    }

    #[test]
    fn missing_component_lists_every_candidate() {
        let resolver = Resolver::new(Path::new("/r"), Arc::new(MockFileSystemOps::new()));
        let err = resolver.resolve(&key("devops/docker")).unwrap_err();
        match err {
            ResolveError::NotFound { key, searched } => {
                assert_eq!(key, "devops/docker");
                assert_eq!(searched.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
