//! `category/name` component keys.
use std::fmt;

use super::Category;
use crate::error::ResolveError;

/// Compound key identifying a component.
///
/// # Examples
///
/// ```
/// use profile_engine::components::{Category, ComponentKey};
///
/// let key = ComponentKey::parse("devops/docker").unwrap();
/// assert_eq!(key.category, Category::Devops);
/// assert_eq!(key.name, "docker");
/// assert_eq!(key.to_string(), "devops/docker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey {
    /// Category the component belongs to.
    pub category: Category,
    /// Component name, a single path segment.
    pub name: String,
}

impl ComponentKey {
    /// Parse a `category/name` key.
    ///
    /// Both halves are trimmed; each must be a non-empty single path
    /// segment other than `.` or `..`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidKey`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidKey(raw.to_string());
        let (category, name) = raw.split_once('/').ok_or_else(invalid)?;
        let (category, name) = (category.trim(), name.trim());
        if !is_segment(category) || !is_segment(name) {
            return Err(invalid());
        }
        Ok(Self {
            category: Category::from_tag(category),
            name: name.to_string(),
        })
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_halves() {
        let key = ComponentKey::parse(" core / git ").unwrap();
        assert_eq!(key.to_string(), "core/git");
    }

    #[test]
    fn parse_keeps_unknown_category() {
        let key = ComponentKey::parse("games/steam").unwrap();
        assert_eq!(key.category, Category::Other("games".to_string()));
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        for raw in ["", "core", "core/", "/git", "core/a/b", "core/..", "./git", "core/a\\b"] {
            assert!(
                ComponentKey::parse(raw).is_err(),
                "'{raw}' should be rejected"
            );
        }
    }
}
