//! High-level pipeline: scan → classify → group → convert → write.
//!
//! This module orchestrates one migration run over a source project tree:
//!   - Scans the configured root for candidate files (excluded dirs skipped)
//!   - Classifies each file and extracts declared names
//!   - Groups files into LogicalUnits and Buckets via the association resolver
//!   - Fans every unit and bucket entry out to the [`Converter`] collaborator
//!   - Writes converted artifacts through the [`Writer`] collaborator
//!   - Aggregates a per-item report of what succeeded and failed.
//!
//! # Phases
//! `Idle → Scanning → Classifying → Grouping → Converting → Writing → Done`,
//! with `Failed` reachable only from `Scanning` (inaccessible root). Every
//! later stage isolates failures per item: one bad conversion or write is
//! recorded in that item's slot and the run continues.
//!
//! # Cancellation
//! A shared flag stops new conversion dispatches; in-flight calls finish
//! and undispatched items are reported as skipped.
//!
//! # Callable From
//! The CLI crate and integration tests; expects concrete async
//! [`Converter`]/[`Writer`] implementations (or mocks).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::classify::{Classifier, DefinitionKind, ServiceState};
use crate::config::PorterConfig;
use crate::contract::{ConversionRequest, ConvertedUnit, Converter, Writer};
use crate::error::Result;
use crate::extract::NameExtractor;
use crate::inventory::{build_inventory, ProjectInventory, SourceFile};
use crate::scan::scan_root;

/// Pipeline stages, traced on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelinePhase {
    Idle,
    Scanning,
    Classifying,
    Grouping,
    Converting,
    Writing,
    Done,
    Failed,
}

fn enter_phase(phase: PipelinePhase) {
    info!(phase = ?phase, "Pipeline phase");
}

/// Output report for one run, for downstream audit and retry of the
/// failed subset.
#[derive(Debug)]
pub struct MigrationReport {
    pub run_id: String,
    pub items: Vec<ItemReport>,
    pub warnings: Vec<String>,
}

impl MigrationReport {
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, ItemOutcome::Written))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| {
            matches!(
                outcome,
                ItemOutcome::ConversionFailed(_) | ItemOutcome::WriteFailed(_)
            )
        })
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, ItemOutcome::Skipped))
    }

    fn count(&self, predicate: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items
            .iter()
            .filter(|item| predicate(&item.outcome))
            .count()
    }
}

#[derive(Debug)]
pub struct ItemReport {
    pub name: String,
    pub kind: DefinitionKind,
    pub target_path: PathBuf,
    pub outcome: ItemOutcome,
}

/// Tagged per-item result. Failures carry the collaborator's diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Written,
    ConversionFailed(String),
    WriteFailed(String),
    /// Cancellation was requested before this item was dispatched.
    Skipped,
}

/// Run the scan/classify/group prefix of the pipeline and return the
/// inventory without converting anything.
pub fn build_project_inventory(config: &PorterConfig) -> Result<ProjectInventory> {
    enter_phase(PipelinePhase::Scanning);
    let scan = match scan_root(&config.scan.root, &config.scan.excluded_dirs) {
        Ok(scan) => scan,
        Err(e) => {
            error!(error = %e, "Scan failed, aborting run before classification");
            enter_phase(PipelinePhase::Failed);
            return Err(e);
        }
    };
    info!(
        candidates = scan.files.len(),
        warnings = scan.warnings.len(),
        "Scan complete"
    );

    enter_phase(PipelinePhase::Classifying);
    let classifier = Classifier::new(config.classify.suffix_rules.clone());
    let extractor = NameExtractor::new();
    let files: Vec<SourceFile> = scan
        .files
        .into_iter()
        .filter_map(|scanned| SourceFile::from_scanned(scanned, &classifier, &extractor))
        .collect();

    enter_phase(PipelinePhase::Grouping);
    let inventory = build_inventory(files, scan.warnings);
    info!(
        units = inventory.units.len(),
        buckets = inventory.buckets.len(),
        unassigned = inventory.unassigned.len(),
        "Inventory built"
    );
    Ok(inventory)
}

/// One dispatchable conversion item: a LogicalUnit or a Bucket entry.
struct WorkItem<'a> {
    name: &'a str,
    kind: DefinitionKind,
    primary: &'a SourceFile,
    template: Option<&'a SourceFile>,
    style: Option<&'a SourceFile>,
    service_state: Option<ServiceState>,
}

impl<'a> WorkItem<'a> {
    fn request(&self) -> ConversionRequest<'a> {
        ConversionRequest {
            name: self.name,
            kind: self.kind,
            primary: &self.primary.content,
            template: self.template.map(|file| file.content.as_str()),
            style: self.style.map(|file| file.content.as_str()),
            service_state: self.service_state,
        }
    }
}

fn collect_work(inventory: &ProjectInventory) -> Vec<WorkItem<'_>> {
    let mut work = Vec::new();
    for unit in &inventory.units {
        work.push(WorkItem {
            name: &unit.name,
            kind: unit.kind,
            primary: &unit.primary,
            template: unit.template.as_ref(),
            style: unit.style.as_ref(),
            service_state: None,
        });
    }
    for (kind, entries) in &inventory.buckets {
        for entry in entries {
            work.push(WorkItem {
                name: &entry.name,
                kind: *kind,
                primary: &entry.file,
                template: None,
                style: None,
                service_state: entry.service_state,
            });
        }
    }
    work
}

/// Target-relative output path: the primary's directory, the resolved
/// display name, the configured extension.
fn target_path(primary: &SourceFile, name: &str, extension: &str) -> PathBuf {
    let dir = primary.relative_path.parent().unwrap_or(Path::new(""));
    dir.join(format!("{name}.{extension}"))
}

enum Dispatch {
    Converted(ConvertedUnit),
    Failed(String),
    Skipped,
}

/// Entrypoint: run the full migration pipeline according to config.
///
/// Only an inaccessible scan root aborts the run. Conversion and write
/// failures are recorded inline per item and the run continues.
pub async fn migrate<C, W>(
    config: &PorterConfig,
    converter: &C,
    writer: &W,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<MigrationReport>
where
    C: Converter,
    W: Writer,
{
    enter_phase(PipelinePhase::Idle);
    info!("Starting migration pipeline");

    let inventory = build_project_inventory(config)?;

    enter_phase(PipelinePhase::Converting);
    let work = collect_work(&inventory);
    let limit = config.convert.concurrency.max(1);
    let cancel = cancel.unwrap_or_else(|| Arc::new(AtomicBool::new(false)));

    let mut conversions: Vec<(usize, Dispatch)> = stream::iter(work.iter().enumerate())
        .map(|(index, item)| {
            let cancel = Arc::clone(&cancel);
            async move {
                if cancel.load(Ordering::SeqCst) {
                    debug!(item = item.name, "Cancelled before dispatch, skipping");
                    return (index, Dispatch::Skipped);
                }
                debug!(item = item.name, kind = ?item.kind, "Dispatching conversion");
                match converter.convert(item.request()).await {
                    Ok(converted) => {
                        info!(item = item.name, "Conversion succeeded");
                        (index, Dispatch::Converted(converted))
                    }
                    Err(e) => {
                        error!(item = item.name, error = %e, "Conversion failed, continuing with remaining items");
                        (index, Dispatch::Failed(e.to_string()))
                    }
                }
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await;
    // Report order must not depend on completion order.
    conversions.sort_by_key(|(index, _)| *index);

    enter_phase(PipelinePhase::Writing);
    let mut items = Vec::with_capacity(work.len());
    for (index, dispatch) in conversions {
        let item = &work[index];
        let target = target_path(item.primary, item.name, &config.output.target_extension);
        let outcome = match dispatch {
            Dispatch::Skipped => ItemOutcome::Skipped,
            Dispatch::Failed(diagnostic) => ItemOutcome::ConversionFailed(diagnostic),
            Dispatch::Converted(converted) => {
                match writer.write(&target, &converted.content).await {
                    Ok(()) => ItemOutcome::Written,
                    Err(e) => {
                        error!(target = %target.display(), error = %e, "Write failed, continuing with remaining items");
                        ItemOutcome::WriteFailed(e.to_string())
                    }
                }
            }
        };
        items.push(ItemReport {
            name: item.name.to_string(),
            kind: item.kind,
            target_path: target,
            outcome,
        });
    }

    enter_phase(PipelinePhase::Done);
    let report = MigrationReport {
        run_id: inventory.run_id.clone(),
        items,
        warnings: inventory.warnings.clone(),
    };
    info!(
        written = report.written(),
        failed = report.failed(),
        skipped = report.skipped(),
        "Migration pipeline complete"
    );
    Ok(report)
}
