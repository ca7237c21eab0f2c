//! Install plan construction.
//!
//! Requested keys are ordered by category precedence (see
//! [`Category::PRIORITY`](crate::components::Category::PRIORITY)): known categories first, in priority order, with
//! names sorted lexically inside each category; keys in other categories
//! follow in the order they were requested. Blank and duplicate keys are
//! dropped; malformed keys are kept aside so the run can report them.
use std::collections::HashSet;
use std::fmt::Write as _;

use crate::components::ComponentKey;

/// Ordered, deduplicated sequence of component keys for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    entries: Vec<ComponentKey>,
    dropped: Vec<String>,
}

impl InstallPlan {
    /// Planned keys, in installation order.
    #[must_use]
    pub fn entries(&self) -> &[ComponentKey] {
        &self.entries
    }

    /// Requested entries that could not be parsed as `category/name`, in
    /// request order and without duplicates.
    #[must_use]
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Number of planned components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One key per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries.iter().fold(String::new(), |mut out, key| {
            let _ = writeln!(out, "{key}");
            out
        })
    }
}

/// Build the install plan for `requested` keys.
#[must_use]
pub fn build_plan(requested: &[String]) -> InstallPlan {
    let mut seen: HashSet<ComponentKey> = HashSet::new();
    let mut known = Vec::new();
    let mut other = Vec::new();
    let mut dropped = Vec::new();

    for raw in requested {
        let Ok(key) = ComponentKey::parse(raw) else {
            // Blank names are left to the lint pass.
            let raw_trimmed = raw.trim();
            if !raw_trimmed.is_empty()
                && !raw_trimmed.ends_with('/')
                && !dropped.iter().any(|d: &String| d == raw_trimmed)
            {
                dropped.push(raw_trimmed.to_string());
            }
            continue;
        };
        if !seen.insert(key.clone()) {
            continue;
        }
        if key.category.is_known() {
            known.push(key);
        } else {
            other.push(key);
        }
    }

    known.sort();
    known.extend(other);

    InstallPlan {
        entries: known,
        dropped,
    }
}
