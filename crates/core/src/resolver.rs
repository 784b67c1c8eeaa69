//! Recover the crate root a result file covers from its file stem.
//!
//! A project with more than one crate root produces one result file per root.
//! The root living directly in the project directory is written as
//! `<project>.json`; every other root is written as
//! `<project>-<parent dir with separators replaced by dashes>.json`.
//! This module reverses that naming.

use std::path::Path;

use tracing::{debug, warn};

/// Outcome of resolving a file stem against a project's declared crate roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrateRootResolution {
    /// The project declares at most one crate root.
    SingleRoot,
    /// The stem is the bare project name; the first declared root applies.
    Default(String),
    /// A declared root's transformed parent equals the stem suffix.
    ///
    /// `collisions` lists the other declared roots whose transformed parent
    /// is identical. When non-empty the match is ambiguous and only the
    /// declaration order decided it.
    Matched { root: String, collisions: Vec<String> },
    /// No declared root matched; the raw suffix is used as a lossy label.
    Unmatched { suffix: String },
}

impl CrateRootResolution {
    /// Label to store in the project record.
    pub fn crate_root(&self) -> Option<&str> {
        match self {
            CrateRootResolution::SingleRoot => None,
            CrateRootResolution::Default(root) => Some(root),
            CrateRootResolution::Matched { root, .. } => Some(root),
            CrateRootResolution::Unmatched { suffix } => Some(suffix),
        }
    }

    /// True when more than one declared root could have produced the stem.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, CrateRootResolution::Matched { collisions, .. } if !collisions.is_empty())
    }
}

/// Parent directory of a crate root with path separators replaced by `-`.
///
/// `src/lib.rs` becomes `src`, `tools/x/main.rs` becomes `tools-x`, and a
/// root without a parent directory becomes the empty string.
pub fn transformed_parent(crate_root: &str) -> String {
    let parent = Path::new(crate_root)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent.replace(['/', '\\'], "-")
}

/// Resolve which declared crate root the result file `stem` covers.
///
/// Never fails: when nothing matches, the suffix after `<project>-` is
/// returned as a best-effort label.
pub fn resolve_crate_root(
    stem: &str,
    project_name: &str,
    crate_roots: &[String],
) -> CrateRootResolution {
    if crate_roots.len() <= 1 {
        return CrateRootResolution::SingleRoot;
    }

    let prefix = format!("{project_name}-");
    let suffix = match stem.strip_prefix(prefix.as_str()) {
        Some(suffix) => suffix,
        None => {
            if stem != project_name {
                debug!(stem, project_name, "stem lacks the project prefix; using first crate root");
            }
            return CrateRootResolution::Default(crate_roots[0].clone());
        }
    };

    let mut matches = crate_roots.iter().filter(|root| transformed_parent(root) == suffix);
    match matches.next() {
        Some(root) => {
            let collisions: Vec<String> = matches.cloned().collect();
            if !collisions.is_empty() {
                warn!(
                    stem,
                    chosen = %root,
                    others = ?collisions,
                    "several crate roots share the same parent directory; result file is ambiguous"
                );
            }
            CrateRootResolution::Matched { root: root.clone(), collisions }
        }
        None => {
            warn!(stem, suffix, "no declared crate root matches result file; using raw suffix");
            CrateRootResolution::Unmatched { suffix: suffix.to_string() }
        }
    }
}
