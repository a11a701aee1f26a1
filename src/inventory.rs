//! Data model and partitioner: classified files become LogicalUnits
//! (unit-forming kinds, via the association resolver) or Bucket entries
//! (everything else), collected into one read-only ProjectInventory per
//! run. The inventory is the sole surface handed to conversion
//! collaborators; it is never persisted.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::associate::AssociationPool;
use crate::classify::{service_statefulness, Category, Classifier, DefinitionKind, ServiceState};
use crate::extract::NameExtractor;
use crate::scan::ScannedFile;

/// A classified source file. Immutable once built; owned by the inventory
/// (directly or through a unit or bucket) for the lifetime of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub extension: String,
    /// Base name with any definition suffix stripped.
    pub stem: String,
    #[serde(skip_serializing)]
    pub content: String,
    pub category: Category,
    pub declared_name: Option<String>,
}

impl SourceFile {
    /// Classify a scanned file and extract its declared name. Returns
    /// `None` for unrecognized extensions, which never enter the model.
    pub fn from_scanned(
        scanned: ScannedFile,
        classifier: &Classifier,
        extractor: &NameExtractor,
    ) -> Option<Self> {
        let category = classifier.classify(&scanned.path, Some(&scanned.content));
        if category == Category::Unclassified {
            return None;
        }

        let raw_stem = scanned
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = classifier.strip_suffix(&raw_stem).to_string();
        let declared_name = match category {
            Category::Definition(kind) => extractor.declared_name(kind, &scanned.content),
            _ => None,
        };

        Some(Self {
            path: scanned.path,
            relative_path: scanned.relative_path,
            extension: scanned.extension,
            stem,
            content: scanned.content,
            category,
            declared_name,
        })
    }

    pub fn definition_kind(&self) -> Option<DefinitionKind> {
        match self.category {
            Category::Definition(kind) => Some(kind),
            _ => None,
        }
    }

    /// Declared name if present, else the suffix-stripped stem.
    pub fn display_name(&self) -> String {
        self.declared_name
            .clone()
            .unwrap_or_else(|| self.stem.clone())
    }
}

/// One primary definition file plus its resolved template/style files,
/// converted as a single entity.
#[derive(Debug, Clone, Serialize)]
pub struct LogicalUnit {
    pub name: String,
    pub kind: DefinitionKind,
    pub primary: SourceFile,
    pub template: Option<SourceFile>,
    pub style: Option<SourceFile>,
}

/// One definition file awaiting independent conversion within a bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketEntry {
    pub name: String,
    /// Only set for service-like entries.
    pub service_state: Option<ServiceState>,
    pub file: SourceFile,
}

/// The root aggregate of one pipeline run.
#[derive(Debug, Serialize)]
pub struct ProjectInventory {
    pub run_id: String,
    pub units: Vec<LogicalUnit>,
    pub buckets: BTreeMap<DefinitionKind, Vec<BucketEntry>>,
    /// Template/style files no unit claimed. Kept for diagnostics; never
    /// surfaced as convertible units.
    pub unassigned: Vec<SourceFile>,
    pub warnings: Vec<String>,
}

impl ProjectInventory {
    /// Total files held across units, buckets and the unassigned residue.
    pub fn total_files(&self) -> usize {
        let unit_files: usize = self
            .units
            .iter()
            .map(|unit| 1 + unit.template.is_some() as usize + unit.style.is_some() as usize)
            .sum();
        let bucket_files: usize = self.buckets.values().map(Vec::len).sum();
        unit_files + bucket_files + self.unassigned.len()
    }
}

/// Partition classified files into units and buckets, resolving
/// template/style associations for unit-forming kinds in traversal order.
pub fn build_inventory(files: Vec<SourceFile>, warnings: Vec<String>) -> ProjectInventory {
    let mut templates = Vec::new();
    let mut styles = Vec::new();
    let mut definitions = Vec::new();
    for file in files {
        match file.category {
            Category::Template => templates.push(file),
            Category::Style => styles.push(file),
            Category::Definition(_) => definitions.push(file),
            Category::Unclassified => {}
        }
    }

    let mut pool = AssociationPool::new(templates, styles);
    let mut units = Vec::new();
    let mut buckets: BTreeMap<DefinitionKind, Vec<BucketEntry>> = BTreeMap::new();

    for definition in definitions {
        let Some(kind) = definition.definition_kind() else {
            continue;
        };
        if kind.forms_unit() {
            let template = pool.claim_template_for(&definition);
            let style = pool.claim_style_for(&definition);
            units.push(LogicalUnit {
                name: definition.display_name(),
                kind,
                primary: definition,
                template,
                style,
            });
        } else {
            let service_state = (kind == DefinitionKind::Service)
                .then(|| service_statefulness(&definition.content));
            buckets.entry(kind).or_default().push(BucketEntry {
                name: definition.display_name(),
                service_state,
                file: definition,
            });
        }
    }

    ProjectInventory {
        run_id: Uuid::new_v4().to_string(),
        units,
        buckets,
        unassigned: pool.into_unclaimed(),
        warnings,
    }
}
