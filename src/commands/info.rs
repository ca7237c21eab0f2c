//! Command: describe a profile without installing it.
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::cli::InfoOpts;
use crate::components::{ComponentSource, Resolver};
use crate::engine::planner::build_plan;
use crate::engine::runner::resolve_plan;
use crate::error::ResolveError;
use crate::logging::Logger;
use crate::operations::SystemFileSystemOps;
use crate::paths::Paths;
use crate::profile::validation::lint;
use crate::profile::{self, Profile, ProfileMeta};

/// Number of components requested under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category as written.
    pub category: String,
    /// Number of names listed.
    pub count: usize,
}

/// One planned component and where it resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanItem {
    /// `category/name` key.
    pub key: String,
    /// Resolved directory, or `None` if the component was not found.
    pub location: Option<PathBuf>,
    /// Whether a validate entrypoint exists.
    pub validate: bool,
    /// Whether the request is not a valid `category/name` key.
    pub invalid: bool,
}

/// Everything `engine info` reports about a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileInfo {
    /// Descriptor metadata.
    #[serde(flatten)]
    pub meta: ProfileMeta,
    /// Descriptor file.
    pub source: PathBuf,
    /// Component counts per category, in document order.
    pub categories: Vec<CategoryCount>,
    /// Computed install plan.
    pub plan: Vec<PlanItem>,
    /// Configuration keys, in document order.
    pub configuration: Vec<String>,
    /// Post-install commands.
    pub post_install: Vec<String>,
    /// Lint warnings as `section [item]: message`.
    pub warnings: Vec<String>,
}

/// Gather [`ProfileInfo`] for `profile`, resolving each planned key.
#[must_use]
pub fn describe(profile: &Profile, source: &dyn ComponentSource) -> ProfileInfo {
    let plan = resolve_plan(source, &build_plan(&profile.requested_keys()))
        .into_iter()
        .map(|entry| match entry.resolution {
            Ok(component) => PlanItem {
                key: entry.key,
                location: Some(component.location().to_path_buf()),
                validate: component.has_validation(),
                invalid: false,
            },
            Err(e) => PlanItem {
                key: entry.key,
                location: None,
                validate: false,
                invalid: matches!(e, ResolveError::InvalidKey(_)),
            },
        })
        .collect();

    ProfileInfo {
        meta: profile.meta.clone(),
        source: profile.source.clone(),
        categories: profile
            .components
            .iter()
            .map(|e| CategoryCount {
                category: e.category.clone(),
                count: e.names.iter().filter(|n| !n.is_empty()).count(),
            })
            .collect(),
        plan,
        configuration: profile.configuration.iter().map(|(k, _)| k.clone()).collect(),
        post_install: profile.post_install.clone(),
        warnings: lint(profile)
            .into_iter()
            .map(|w| format!("{} [{}]: {}", w.source, w.item, w.message))
            .collect(),
    }
}

/// Human-readable rendering of [`ProfileInfo`].
#[must_use]
pub fn render(info: &ProfileInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Profile:      {} {}", info.meta.name, info.meta.version);
    if let Some(description) = &info.meta.description {
        let _ = writeln!(out, "Description:  {description}");
    }
    if let Some(author) = &info.meta.author {
        let _ = writeln!(out, "Author:       {author}");
    }
    let _ = writeln!(out, "Source:       {}", info.source.display());

    let total: usize = info.categories.iter().map(|c| c.count).sum();
    let _ = writeln!(out, "\nComponents ({total}):");
    let width = info
        .categories
        .iter()
        .map(|c| c.category.len())
        .max()
        .unwrap_or(0);
    for c in &info.categories {
        let _ = writeln!(out, "  {:<width$}  {}", c.category, c.count);
    }

    let _ = writeln!(out, "\nPlan:");
    let width = info.plan.iter().map(|p| p.key.len()).max().unwrap_or(0);
    for (i, item) in info.plan.iter().enumerate() {
        let status = match &item.location {
            Some(location) if item.validate => format!("{} (validate)", location.display()),
            Some(location) => location.display().to_string(),
            None if item.invalid => "invalid key".to_string(),
            None => "not found".to_string(),
        };
        let _ = writeln!(out, "  {:>2}. {:<width$}  {status}", i + 1, item.key);
    }

    if !info.configuration.is_empty() {
        let _ = writeln!(out, "\nConfiguration:");
        for key in &info.configuration {
            let _ = writeln!(out, "  {key}");
        }
    }
    if !info.post_install.is_empty() {
        let _ = writeln!(out, "\nPost-install:");
        for command in &info.post_install {
            let _ = writeln!(out, "  {command}");
        }
    }
    if !info.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for warning in &info.warnings {
            let _ = writeln!(out, "  {warning}");
        }
    }
    out
}

/// Run the info command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or JSON encoding fails.
pub fn run(paths: &Paths, opts: &InfoOpts, log: &Logger) -> Result<()> {
    let profile = profile::load(&opts.profile)?;
    let resolver = Resolver::new(&paths.root, Arc::new(SystemFileSystemOps));
    let info = describe(&profile, &resolver);
    log.debug(&format!("{} planned component(s)", info.plan.len()));

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", render(&info));
    }
    Ok(())
}
