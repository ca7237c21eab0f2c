//! Components backed by `install.sh` / `validate.sh` scripts.
use std::path::{Path, PathBuf};

use super::{Component, ComponentContext, ComponentKey};
use crate::error::ComponentError;
use crate::paths::ENV_ROOT;

/// Install entrypoint file name.
pub const INSTALL_SCRIPT: &str = "install.sh";

/// Optional validate entrypoint file name.
pub const VALIDATE_SCRIPT: &str = "validate.sh";

/// Environment variable set to `1` for every entrypoint the engine runs.
pub const ENV_MANAGED: &str = "ENGINE_MANAGED";

/// Environment variable carrying the `category/name` key being run.
pub const ENV_COMPONENT: &str = "ENGINE_COMPONENT";

/// A component directory holding shell entrypoints.
///
/// Scripts are run as `sh <script>` from the component directory and
/// inherit the engine's stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptComponent {
    key: ComponentKey,
    dir: PathBuf,
    validate_script: Option<PathBuf>,
}

impl ScriptComponent {
    /// Create a component rooted at `dir`.
    ///
    /// `has_validate` records whether `validate.sh` was found next to the
    /// install script.
    #[must_use]
    pub fn new(key: ComponentKey, dir: PathBuf, has_validate: bool) -> Self {
        let validate_script = has_validate.then(|| dir.join(VALIDATE_SCRIPT));
        Self {
            key,
            dir,
            validate_script,
        }
    }

    /// Path of the install entrypoint.
    #[must_use]
    pub fn install_script(&self) -> PathBuf {
        self.dir.join(INSTALL_SCRIPT)
    }

    fn run_script(&self, script: &Path, ctx: &ComponentContext<'_>) -> Result<(), String> {
        let args = vec![script.to_string_lossy().into_owned()];
        let env = vec![
            (ENV_ROOT.to_string(), ctx.root.to_string_lossy().into_owned()),
            (
                ENV_MANAGED.to_string(),
                if ctx.engine_managed { "1" } else { "0" }.to_string(),
            ),
            (ENV_COMPONENT.to_string(), self.key.to_string()),
        ];
        match ctx.executor.run_in_with_env(&self.dir, "sh", &args, &env) {
            Ok(result) if result.success => Ok(()),
            Ok(result) => Err(result.describe()),
            Err(e) => Err(format!("{e:#}")),
        }
    }
}

impl Component for ScriptComponent {
    fn key(&self) -> &ComponentKey {
        &self.key
    }

    fn location(&self) -> &Path {
        &self.dir
    }

    fn install(&self, ctx: &ComponentContext<'_>) -> Result<(), ComponentError> {
        self.run_script(&self.install_script(), ctx)
            .map_err(|reason| ComponentError::InstallFailed {
                key: self.key.to_string(),
                reason,
            })
    }

    fn validate(&self, ctx: &ComponentContext<'_>) -> Option<Result<(), ComponentError>> {
        let script = self.validate_script.as_ref()?;
        Some(
            self.run_script(script, ctx)
                .map_err(|reason| ComponentError::ValidateFailed {
                    key: self.key.to_string(),
                    reason,
                }),
        )
    }

    fn has_validation(&self) -> bool {
        self.validate_script.is_some()
    }
}
