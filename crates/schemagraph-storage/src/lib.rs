//! Schemagraph submission boundary
//!
//! Hands an assembled [`SchemaUnit`] to a store in one transaction:
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────────┐
//! │ declarations │────►│  Assembler  │────►│ SchemaStore::commit  │
//! └──────────────┘     └─────────────┘     └──────────────────────┘
//!                            │                        │
//!                            ▼                        ▼
//!                  SubmitError::Assembly     SubmitError::Store(E)
//! ```
//!
//! The store owns transactional semantics (a single atomic commit, any
//! retries). This crate only guarantees that nothing reaches the store unless
//! assembly succeeded, and that store errors reach the caller unchanged.


use std::convert::Infallible;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use schemagraph_assembly::{AssemblyConfig, AssemblyError, Assembler, SchemaUnit};
use schemagraph_dsl::Declaration;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Store capability
// ============================================================================

/// A transaction executor for schema units.
pub trait SchemaStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Commit the whole unit atomically, or nothing.
    fn commit(&self, unit: &SchemaUnit) -> Result<(), Self::Error>;
}

impl<S: SchemaStore + ?Sized> SchemaStore for &S {
    type Error = S::Error;

    fn commit(&self, unit: &SchemaUnit) -> Result<(), Self::Error> {
        (**self).commit(unit)
    }
}

impl<S: SchemaStore + ?Sized> SchemaStore for Arc<S> {
    type Error = S::Error;

    fn commit(&self, unit: &SchemaUnit) -> Result<(), Self::Error> {
        (**self).commit(unit)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError<E> {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Store(E),
}

/// Assemble `declarations` and commit the result.
///
/// The store is only called with a fully validated unit. Returns the committed
/// unit.
pub fn submit<S, I>(
    store: &S,
    assembler: &Assembler,
    declarations: I,
) -> Result<SchemaUnit, SubmitError<S::Error>>
where
    S: SchemaStore + ?Sized,
    I: IntoIterator,
    I::Item: Into<Declaration>,
{
    let unit = assembler.assemble(declarations)?;
    store.commit(&unit).map_err(SubmitError::Store)?;
    tracing::info!(
        digest = %unit.digest(),
        classes = unit.classes().len(),
        properties = unit.properties().len(),
        "committed schema unit"
    );
    Ok(unit)
}

// ============================================================================
// In-memory store
// ============================================================================

/// One entry of the [`MemoryStore`] commit log.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub digest: String,
    /// The unit rendered with the store's configuration.
    pub document: serde_json::Value,
    #[serde(skip)]
    pub unit: SchemaUnit,
}

/// A store that keeps every committed unit in memory, in commit order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: AssemblyConfig,
    log: RwLock<Vec<CommitRecord>>,
}

impl MemoryStore {
    pub fn new(config: AssemblyConfig) -> Self {
        Self {
            config,
            log: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.log.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.read().is_empty()
    }

    pub fn commits(&self) -> Vec<CommitRecord> {
        self.log.read().clone()
    }

    /// The most recently committed unit.
    pub fn latest(&self) -> Option<SchemaUnit> {
        self.log.read().last().map(|record| record.unit.clone())
    }

    pub fn changelog_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.log.read())
    }
}

impl SchemaStore for MemoryStore {
    type Error = Infallible;

    fn commit(&self, unit: &SchemaUnit) -> Result<(), Self::Error> {
        let record = CommitRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            digest: unit.digest(),
            document: unit.to_document(&self.config),
            unit: unit.clone(),
        };
        tracing::debug!(id = %record.id, digest = %record.digest, "recorded commit");
        self.log.write().push(record);
        Ok(())
    }
}
