//! Descriptor document parsing (YAML or TOML, chosen by file extension).
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use super::ScalarValue;
use crate::error::ProfileError;

/// Supported descriptor document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl Format {
    /// Detect the format from a path's extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// The `profile` section exactly as written.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawMeta {
    pub(super) name: Option<ScalarValue>,
    pub(super) version: Option<ScalarValue>,
    pub(super) description: Option<ScalarValue>,
    pub(super) author: Option<ScalarValue>,
}

/// The whole document exactly as written, before validation.
#[derive(Debug, Deserialize)]
pub(super) struct RawProfile {
    pub(super) profile: Option<RawMeta>,
    #[serde(default, deserialize_with = "ordered_pairs")]
    pub(super) components: Vec<(String, Option<Vec<Option<ScalarValue>>>)>,
    #[serde(default, deserialize_with = "ordered_pairs")]
    pub(super) configuration: Vec<(String, Option<ScalarValue>)>,
    #[serde(default)]
    pub(super) post_install: Option<Vec<Option<String>>>,
}

/// Deserialize a mapping into `(key, value)` pairs, keeping document order.
///
/// A null mapping (e.g. `configuration:` with nothing under it) yields an
/// empty list.
fn ordered_pairs<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct PairsVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, V>()? {
                pairs.push((key, value));
            }
            Ok(pairs)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(PairsVisitor(PhantomData))
}

/// Parse `content` as the given format.
///
/// # Errors
///
/// Returns the parser's message when the document is malformed.
pub fn parse<T: DeserializeOwned>(content: &str, format: Format) -> Result<T, String> {
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Read and parse the descriptor at `path` without validating it.
pub(super) fn read_document(path: &Path) -> Result<RawProfile, ProfileError> {
    if !path.exists() {
        return Err(ProfileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let format = Format::from_path(path).ok_or_else(|| ProfileError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(ProfileError::Parse {
            path: path.to_path_buf(),
            message: "document is empty".to_string(),
        });
    }
    parse(&content, format).map_err(|message| ProfileError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a.json")), None);
        assert_eq!(Format::from_path(Path::new("profile")), None);
    }

    #[test]
    fn yaml_mapping_keeps_document_order() {
        let raw: RawProfile =
            parse("components:\n  zeta: [a]\n  alpha: [b]\n  mid: [c]\n", Format::Yaml).unwrap();
        let categories: Vec<_> = raw.components.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(categories, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn toml_mapping_keeps_document_order() {
        let raw: RawProfile = parse(
            "[configuration]\nZ = \"1\"\nA = \"2\"\nM = \"3\"\n",
            Format::Toml,
        )
        .unwrap();
        let keys: Vec<_> = raw.configuration.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn components_must_be_a_mapping() {
        let result: Result<RawProfile, _> = parse("components: [git, zsh]\n", Format::Yaml);
        assert!(result.is_err());
    }

    #[test]
    fn read_document_missing_file() {
        let err = read_document(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ProfileError::NotFound { .. }));
    }

    #[test]
    fn read_document_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "{}").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ProfileError::UnsupportedFormat { .. }));
    }

    #[test]
    fn read_document_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("p.yaml");
        std::fs::write(&path, "profile: [unclosed\n").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
    }

    #[test]
    fn read_document_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.yaml");
        std::fs::write(&path, "\n").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
