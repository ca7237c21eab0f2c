//! Profile descriptors: types, loading, and validation.
//!
//! A descriptor is a YAML or TOML document with four top-level keys:
//!
//! ```yaml
//! profile:
//!   name: workstation
//!   version: "1.2"
//!   description: Daily driver
//! components:
//!   core: [git, zsh]
//!   devops: [docker]
//! configuration:
//!   EDITOR: nvim
//! post_install:
//!   - echo done
//! ```
//!
//! [`load`] enforces the fatal rules: `profile.name` and `profile.version`
//! must be present and non-blank, must not be unquoted decimals, and must be
//! a single line without control characters. The name is also used as a
//! file name, so it cannot contain path separators or `..`.
pub mod loader;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ProfileError;

/// A scalar value as written in a descriptor.
///
/// Descriptors are hand-written, so numbers and booleans are accepted
/// wherever a string is expected and rendered back in their natural form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// `true` / `false`.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// String literal.
    Str(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            // Keep `1.0` from collapsing to `1`.
            Self::Float(x) if x.is_finite() && x.fract().abs() < f64::EPSILON => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Identifying metadata from the `profile` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileMeta {
    /// Profile name; used for the generated configuration file name.
    pub name: String,
    /// Profile version.
    pub version: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional author.
    pub author: Option<String>,
}

/// Components requested under one category, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category as written (e.g. `core`, `ai-ml`, `custom`).
    pub category: String,
    /// Component names as written, trimmed; may contain blanks or duplicates.
    pub names: Vec<String>,
}

/// A parsed and validated profile descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Metadata from the `profile` section.
    pub meta: ProfileMeta,
    /// Requested components grouped by category, in document order.
    pub components: Vec<CategoryEntry>,
    /// Profile-level settings, in document order.
    pub configuration: Vec<(String, ScalarValue)>,
    /// Commands to run after installation.
    pub post_install: Vec<String>,
    /// File the descriptor was loaded from.
    pub source: PathBuf,
}

impl Profile {
    /// Flatten [`Profile::components`] into `category/name` keys.
    ///
    /// Order follows the document; blanks and duplicates are kept so that
    /// the planner and validator can apply their own policies.
    #[must_use]
    pub fn requested_keys(&self) -> Vec<String> {
        self.components
            .iter()
            .flat_map(|entry| {
                entry
                    .names
                    .iter()
                    .map(move |name| format!("{}/{name}", entry.category))
            })
            .collect()
    }

    /// Total number of component names listed (blanks included).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.iter().map(|e| e.names.len()).sum()
    }
}

/// Load and validate a profile descriptor.
///
/// Has no side effects beyond reading `path`.
///
/// # Errors
///
/// Returns [`ProfileError`] if the file is missing or unreadable, is not a
/// valid YAML/TOML document, or lacks a usable `profile.name` or
/// `profile.version`.
pub fn load(path: &Path) -> Result<Profile, ProfileError> {
    let raw = loader::read_document(path)?;

    let meta = raw.profile.unwrap_or_default();
    let name = required(meta.name, "name")?;
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(ProfileError::InvalidField {
            field: "name",
            reason: format!("'{name}' must not contain path separators or '..'"),
        });
    }
    let version = required(meta.version, "version")?;

    let components = raw
        .components
        .into_iter()
        .map(|(category, names)| CategoryEntry {
            category: category.trim().to_string(),
            names: names
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .map(|n| n.to_string().trim().to_string())
                .collect(),
        })
        .collect();

    let configuration = raw
        .configuration
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_else(|| ScalarValue::Str(String::new()))))
        .collect();

    let post_install = raw
        .post_install
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect();

    Ok(Profile {
        meta: ProfileMeta {
            name,
            version,
            description: meta.description.map(|d| d.to_string()),
            author: meta.author.map(|a| a.to_string()),
        },
        components,
        configuration,
        post_install,
        source: path.to_path_buf(),
    })
}

fn required(value: Option<ScalarValue>, field: &'static str) -> Result<String, ProfileError> {
    // `1.10` parses as the float 1.1; its original text is gone.
    if matches!(value, Some(ScalarValue::Float(_))) {
        return Err(ProfileError::InvalidField {
            field,
            reason: "unquoted decimal; write it as a quoted string such as \"1.10\"".to_string(),
        });
    }
    let text = value
        .map(|v| v.to_string().trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ProfileError::MissingField(field))?;
    if text.chars().any(char::is_control) {
        return Err(ProfileError::InvalidField {
            field,
            reason: "must not contain control characters".to_string(),
        });
    }
    Ok(text)
}
