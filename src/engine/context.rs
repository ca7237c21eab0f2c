//! Explicit per-run context.
use std::sync::Arc;

use crate::components::{ComponentContext, ComponentSource, Resolver};
use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::SystemFileSystemOps;
use crate::paths::Paths;

/// Everything an engine run needs, passed explicitly to every stage.
pub struct Context {
    /// Root, config and cache directories for this run.
    pub paths: Paths,
    /// Preview the plan without invoking any component.
    pub dry_run: bool,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Maps component keys to installable components.
    pub components: Arc<dyn ComponentSource>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("paths", &self.paths)
            .field("dry_run", &self.dry_run)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("components", &"<dyn ComponentSource>")
            .finish()
    }
}

impl Context {
    /// Create a context that resolves components on the real filesystem
    /// under `paths.root`.
    #[must_use]
    pub fn new(
        paths: Paths,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        dry_run: bool,
    ) -> Self {
        let components = Arc::new(Resolver::new(&paths.root, Arc::new(SystemFileSystemOps)));
        Self {
            paths,
            dry_run,
            log,
            executor,
            components,
        }
    }

    /// Create a copy of this context with a different component source.
    #[must_use]
    pub fn with_components(&self, components: Arc<dyn ComponentSource>) -> Self {
        Self {
            paths: self.paths.clone(),
            dry_run: self.dry_run,
            log: Arc::clone(&self.log),
            executor: Arc::clone(&self.executor),
            components,
        }
    }

    /// Entry-point context handed to components.
    #[must_use]
    pub fn component_context(&self) -> ComponentContext<'_> {
        ComponentContext {
            root: &self.paths.root,
            engine_managed: true,
            executor: self.executor.as_ref(),
        }
    }
}
