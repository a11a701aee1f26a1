//! Template/style association for unit-forming definition files.
//!
//! Two phases per primary, in priority order: an explicit
//! `templateUrl`/`styleUrls` reference in the primary's content, then the
//! naming convention (equal stripped stems, same directory or a
//! conventional subdirectory). Claimed files are consumed from the pool so
//! no two units ever share a template or style. Resolution runs
//! single-threaded over the classified set; claims are order-sensitive.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::inventory::SourceFile;

const TEMPLATE_SUBDIRS: &[&str] = &["views", "templates", "partials"];
const STYLE_SUBDIRS: &[&str] = &["styles", "css"];

/// Pool of unclaimed template and style files. Claiming takes the file out
/// of the pool; whatever is left at the end is the unassigned residue.
pub struct AssociationPool {
    templates: Vec<Option<SourceFile>>,
    styles: Vec<Option<SourceFile>>,
    template_ref: Regex,
    style_ref: Regex,
}

impl AssociationPool {
    /// Pool entries keep their traversal order; ties resolve to the
    /// earliest unclaimed candidate.
    pub fn new(templates: Vec<SourceFile>, styles: Vec<SourceFile>) -> Self {
        Self {
            templates: templates.into_iter().map(Some).collect(),
            styles: styles.into_iter().map(Some).collect(),
            template_ref: Regex::new(r#"templateUrl\s*:\s*['"]([^'"]+)['"]"#)
                .expect("builtin template reference pattern compiles"),
            style_ref: Regex::new(r#"styleUrls?\s*:\s*\[?\s*['"]([^'"]+)['"]"#)
                .expect("builtin style reference pattern compiles"),
        }
    }

    pub fn claim_template_for(&mut self, primary: &SourceFile) -> Option<SourceFile> {
        let declared = first_capture(&self.template_ref, &primary.content);
        claim(
            &mut self.templates,
            primary,
            declared.as_deref(),
            TEMPLATE_SUBDIRS,
        )
    }

    pub fn claim_style_for(&mut self, primary: &SourceFile) -> Option<SourceFile> {
        let declared = first_capture(&self.style_ref, &primary.content);
        claim(&mut self.styles, primary, declared.as_deref(), STYLE_SUBDIRS)
    }

    /// Files no unit claimed, in traversal order (templates, then styles).
    pub fn into_unclaimed(self) -> Vec<SourceFile> {
        self.templates
            .into_iter()
            .chain(self.styles)
            .flatten()
            .collect()
    }
}

fn first_capture(pattern: &Regex, content: &str) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}

fn claim(
    slots: &mut [Option<SourceFile>],
    primary: &SourceFile,
    declared: Option<&str>,
    conventional_subdirs: &[&str],
) -> Option<SourceFile> {
    // Phase 1: explicit reference. A reference that resolves to no scanned
    // file is treated as not found, not as an error.
    if let Some(declared) = declared {
        if let Some(index) = find_declared(slots, primary, declared) {
            return slots[index].take();
        }
        debug!(
            primary = %primary.relative_path.display(),
            declared,
            "Declared reference matched no scanned file, falling back to naming convention"
        );
    }

    // Phase 2: naming convention, first unclaimed match in traversal order.
    let index = slots.iter().position(|slot| {
        slot.as_ref()
            .is_some_and(|candidate| convention_match(primary, candidate, conventional_subdirs))
    })?;
    slots[index].take()
}

fn find_declared(
    slots: &[Option<SourceFile>],
    primary: &SourceFile,
    declared: &str,
) -> Option<usize> {
    let suffix = normalize_declared(declared);
    let resolved = primary
        .relative_path
        .parent()
        .map(|parent| normalize_path(&parent.join(declared)));

    slots.iter().position(|slot| {
        slot.as_ref().is_some_and(|candidate| {
            if resolved
                .as_ref()
                .is_some_and(|resolved| candidate.relative_path == *resolved)
            {
                return true;
            }
            !suffix.as_os_str().is_empty() && candidate.relative_path.ends_with(&suffix)
        })
    })
}

/// Strip leading `./`, `../` and `/` segments so the remainder can serve
/// as a path suffix.
fn normalize_declared(declared: &str) -> PathBuf {
    Path::new(declared)
        .components()
        .skip_while(|component| {
            matches!(
                component,
                Component::CurDir | Component::ParentDir | Component::RootDir
            )
        })
        .collect()
}

/// Lexical normalization: drop `.` segments, pop on `..`.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn convention_match(
    primary: &SourceFile,
    candidate: &SourceFile,
    conventional_subdirs: &[&str],
) -> bool {
    if candidate.stem != primary.stem {
        return false;
    }
    let primary_dir = primary.relative_path.parent().unwrap_or(Path::new(""));
    let candidate_dir = candidate.relative_path.parent().unwrap_or(Path::new(""));
    if candidate_dir == primary_dir {
        return true;
    }
    candidate_dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| conventional_subdirs.contains(&name))
        .unwrap_or(false)
}
