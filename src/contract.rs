//! Collaborator contracts for the conversion pipeline.
//!
//! The orchestrator hands every LogicalUnit and Bucket entry to a
//! [`Converter`] and every converted artifact to a [`Writer`]. Both traits
//! are async, return boxed errors, and never panic across the boundary;
//! failures surface as tagged per-item outcomes in the run report.
//!
//! The traits are annotated for `mockall` so tests can script
//! deterministic collaborators without a network or a writable target.

use std::path::Path;

use async_trait::async_trait;
use mockall::automock;

use crate::classify::{DefinitionKind, ServiceState};

/// Uniform boxed error type at the collaborator boundary.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a converter needs for one item: the primary content, the
/// optional associated template/style content, and the classification
/// facts that select the conversion rules.
pub struct ConversionRequest<'a> {
    /// Resolved display name of the unit or bucket entry.
    pub name: &'a str,
    pub kind: DefinitionKind,
    pub primary: &'a str,
    pub template: Option<&'a str>,
    pub style: Option<&'a str>,
    /// Only set for service-like entries.
    pub service_state: Option<ServiceState>,
}

/// Converted text for one item.
#[derive(Debug, Clone)]
pub struct ConvertedUnit {
    pub content: String,
}

/// External text-generation collaborator. Implementors connect to an LLM
/// service or stand in for one in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert one unit or bucket entry to the target framework.
    async fn convert<'a>(
        &self,
        req: ConversionRequest<'a>,
    ) -> Result<ConvertedUnit, CollaboratorError>;
}

/// File persistence collaborator. Creates parent structure as needed;
/// overwrites idempotently.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Writer: Send + Sync {
    /// Write converted content at a target-relative path.
    async fn write(&self, relative_path: &Path, content: &str) -> Result<(), CollaboratorError>;
}
