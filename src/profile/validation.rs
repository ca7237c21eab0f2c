//! Non-fatal descriptor checks.
//!
//! [`lint`] reports issues that do not stop an installation but usually
//! indicate a typo: unknown categories, duplicate or blank component names,
//! configuration keys that cannot be exported, and empty hook commands.
use std::collections::HashSet;

use super::Profile;
use crate::components::Category;

/// A validation warning detected while inspecting a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Descriptor section (e.g., `"components"`, `"configuration"`).
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    #[must_use]
    fn new(source: impl Into<String>, item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Whether `key` can be written as an environment variable name.
#[must_use]
pub fn is_valid_config_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Inspect `profile` and return every non-fatal issue found.
#[must_use]
pub fn lint(profile: &Profile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for entry in &profile.components {
        let category = Category::from_tag(&entry.category);
        if entry.category.is_empty() {
            warnings.push(ValidationWarning::new(
                "components",
                "<blank>",
                "category name is blank",
            ));
        } else if !category.is_known() {
            warnings.push(ValidationWarning::new(
                "components",
                &entry.category,
                "unknown category; its components are installed after all known categories",
            ));
        }

        for name in &entry.names {
            let key = format!("{}/{name}", entry.category);
            if name.is_empty() {
                warnings.push(ValidationWarning::new(
                    "components",
                    &entry.category,
                    "blank component name is ignored",
                ));
            } else if name.contains('/') || name == "." || name == ".." {
                warnings.push(ValidationWarning::new(
                    "components",
                    &key,
                    "component name must be a single path segment",
                ));
            } else if !seen.insert(key.clone()) {
                warnings.push(ValidationWarning::new(
                    "components",
                    &key,
                    "duplicate component is installed once",
                ));
            }
        }
    }

    for (key, _) in &profile.configuration {
        if !is_valid_config_key(key) {
            warnings.push(ValidationWarning::new(
                "configuration",
                key,
                "key is not a valid environment variable name and will be skipped",
            ));
        }
    }

    for (i, command) in profile.post_install.iter().enumerate() {
        if command.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                "post_install",
                format!("#{}", i + 1),
                "blank command is ignored",
            ));
        }
    }

    warnings
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::profile::{CategoryEntry, ProfileMeta, ScalarValue};
    use std::path::PathBuf;

    fn profile(components: &[(&str, &[&str])]) -> Profile {
        Profile {
            meta: ProfileMeta {
                name: "p".to_string(),
                version: "1".to_string(),
                description: None,
                author: None,
            },
            components: components
                .iter()
                .map(|(c, names)| CategoryEntry {
                    category: (*c).to_string(),
                    names: names.iter().map(|n| (*n).to_string()).collect(),
                })
                .collect(),
            configuration: vec![],
            post_install: vec![],
            source: PathBuf::from("p.yaml"),
        }
    }

    #[test]
    fn clean_profile_has_no_warnings() {
        let p = profile(&[("core", &["git", "zsh"]), ("cloud", &["aws"])]);
        assert!(lint(&p).is_empty());
    }

    #[test]
    fn unknown_category_warns() {
        let p = profile(&[("games", &["steam"])]);
        let warnings = lint(&p);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "games");
    }

    #[test]
    fn duplicate_and_blank_names_warn() {
        let p = profile(&[("core", &["git", "", "git"])]);
        let warnings = lint(&p);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.message.contains("blank")));
        assert!(
            warnings
                .iter()
                .any(|w| w.item == "core/git" && w.message.contains("duplicate"))
        );
    }

    #[test]
    fn path_like_names_warn() {
        let p = profile(&[("core", &["a/b", ".."])]);
        assert_eq!(lint(&p).len(), 2);
    }

    #[test]
    fn invalid_config_keys_warn() {
        let mut p = profile(&[]);
        p.configuration = vec![
            ("GOOD_KEY".to_string(), ScalarValue::Int(1)),
            ("bad-key".to_string(), ScalarValue::Int(2)),
            ("9LIVES".to_string(), ScalarValue::Int(3)),
        ];
        let warnings = lint(&p);
        let items: Vec<_> = warnings.iter().map(|w| w.item.as_str()).collect();
        assert_eq!(items, vec!["bad-key", "9LIVES"]);
    }

    #[test]
    fn blank_hook_warns() {
        let mut p = profile(&[]);
        p.post_install = vec!["echo ok".to_string(), "   ".to_string()];
        let warnings = lint(&p);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "#2");
    }

    #[test]
    fn config_key_rules() {
        assert!(is_valid_config_key("EDITOR"));
        assert!(is_valid_config_key("_private"));
        assert!(is_valid_config_key("a1_b2"));
        assert!(!is_valid_config_key(""));
        assert!(!is_valid_config_key("1ABC"));
        assert!(!is_valid_config_key("A B"));
        assert!(!is_valid_config_key("A=B"));
    }
}
