//! Installable components and how they are located.
//!
//! A component is addressed by a [`ComponentKey`] (`category/name`) and
//! resolved once, by a [`ComponentSource`], into a [`Component`] that the
//! engine reuses for both the install pass and the validation pass.
mod category;
mod key;
pub mod resolver;
pub mod script;

pub use category::Category;
pub use key::ComponentKey;
pub use resolver::Resolver;
pub use script::ScriptComponent;

use std::path::Path;
use std::sync::Arc;

use crate::error::{ComponentError, ResolveError};
use crate::exec::Executor;

/// What a component entrypoint receives from the engine.
#[derive(Clone, Copy)]
pub struct ComponentContext<'a> {
    /// Orchestrator root directory.
    pub root: &'a Path,
    /// Always `true` when invoked by the engine; lets scripts detect that
    /// they are not being run by hand.
    pub engine_managed: bool,
    /// Process executor used to invoke entrypoints.
    pub executor: &'a dyn Executor,
}

impl std::fmt::Debug for ComponentContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentContext")
            .field("root", &self.root)
            .field("engine_managed", &self.engine_managed)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

/// A resolved, installable unit.
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Key this component was resolved from.
    fn key(&self) -> &ComponentKey;

    /// Directory the component was found in.
    fn location(&self) -> &Path;

    /// Run the install entrypoint.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InstallFailed`] if the entrypoint cannot be
    /// started or reports failure.
    fn install(&self, ctx: &ComponentContext<'_>) -> Result<(), ComponentError>;

    /// Run the validate entrypoint, or return `None` if the component has none.
    fn validate(&self, ctx: &ComponentContext<'_>) -> Option<Result<(), ComponentError>>;

    /// Whether [`Component::validate`] would run a check.
    fn has_validation(&self) -> bool;
}

/// Maps keys to components.
pub trait ComponentSource: Send + Sync {
    /// Resolve `key` to a component.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if no candidate location matches.
    fn resolve(&self, key: &ComponentKey) -> Result<Arc<dyn Component>, ResolveError>;
}
