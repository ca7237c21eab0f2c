//! Component categories and their installation precedence.
use std::fmt;

/// A component category.
///
/// Known categories are installed in declaration order, so baseline
/// capabilities (`core`) come before the tooling that builds on them
/// (`cloud`, `observability`). Any other tag is kept verbatim as
/// [`Category::Other`] and sorts after every known category.
///
/// # Examples
///
/// ```
/// use profile_engine::components::Category;
///
/// assert!(Category::Core < Category::Devops);
/// assert!(Category::Observability < Category::from_tag("games"));
/// assert_eq!(Category::from_tag("ai-ml"), Category::AiMl);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Shell, package tooling and other baseline capabilities.
    Core,
    /// Credentials, keys, hardening.
    Security,
    /// Editors and everyday tools.
    Productivity,
    /// Cloud provider CLIs.
    Cloud,
    /// Build, container and CI tooling.
    Devops,
    /// Infrastructure-as-code tooling.
    Infra,
    /// Machine-learning toolchains.
    AiMl,
    /// Monitoring and tracing agents.
    Observability,
    /// Any category outside the fixed priority list.
    Other(String),
}

impl Category {
    /// Known categories in installation order.
    pub const PRIORITY: [Self; 8] = [
        Self::Core,
        Self::Security,
        Self::Productivity,
        Self::Cloud,
        Self::Devops,
        Self::Infra,
        Self::AiMl,
        Self::Observability,
    ];

    /// Parse a category tag; unknown tags become [`Category::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_ascii_lowercase().as_str() {
            "core" => Self::Core,
            "security" => Self::Security,
            "productivity" => Self::Productivity,
            "cloud" => Self::Cloud,
            "devops" => Self::Devops,
            "infra" => Self::Infra,
            "ai-ml" => Self::AiMl,
            "observability" => Self::Observability,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Tag as used in keys and directory names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Core => "core",
            Self::Security => "security",
            Self::Productivity => "productivity",
            Self::Cloud => "cloud",
            Self::Devops => "devops",
            Self::Infra => "infra",
            Self::AiMl => "ai-ml",
            Self::Observability => "observability",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this category is in [`Category::PRIORITY`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn priority_list_is_sorted() {
        let mut sorted = Category::PRIORITY.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::PRIORITY.to_vec());
    }

    #[test]
    fn tags_round_trip_for_known_categories() {
        for category in Category::PRIORITY {
            assert_eq!(Category::from_tag(category.as_str()), category);
        }
    }

    #[test]
    fn from_tag_is_case_insensitive_for_known() {
        assert_eq!(Category::from_tag(" Core "), Category::Core);
        assert_eq!(Category::from_tag("AI-ML"), Category::AiMl);
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let category = Category::from_tag("Games");
        assert_eq!(category, Category::Other("Games".to_string()));
        assert_eq!(category.as_str(), "Games");
        assert!(!category.is_known());
    }

    #[test]
    fn unknown_sorts_after_known() {
        for category in Category::PRIORITY {
            assert!(category < Category::Other("a".to_string()));
        }
    }
}
