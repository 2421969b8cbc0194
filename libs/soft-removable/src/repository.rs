//! Base repository contract consumed by the soft-removal layer
//!
//! Implementations provide raw CRUD over a single table and expose the
//! connection used for raw statements. Errors are surfaced unchanged; no
//! retry or translation happens on either side of this seam.

use crate::model::{Filter, OrderBy, Pagination, Patch};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// Raw persistence operations over a single entity table
///
/// The connection returned by [`BaseRepository::connection`] is a shared
/// resource owned by the implementor. It is assumed to outlive every call
/// and is never closed by the soft-removal layer.
#[async_trait]
pub trait BaseRepository: Send + Sync {
    /// Row type produced by reads
    type Entity: Send + Sync;

    /// Name of the backing table
    fn table(&self) -> &str;

    /// Shared connection used to execute raw statements
    fn connection(&self) -> &DatabaseConnection;

    /// Fetch a single entity by identifier
    async fn get_by_id(&self, id: &str) -> Result<Option<Self::Entity>>;

    /// List entities matching the filter
    async fn list(
        &self,
        filter: Filter,
        pagination: Option<Pagination>,
        order: Option<OrderBy>,
    ) -> Result<Vec<Self::Entity>>;

    /// Count entities matching the filter
    async fn count(&self, filter: Filter) -> Result<u64>;

    /// Apply a patch to every entity matching the filter
    ///
    /// Returns the identifiers of affected rows.
    async fn update(&self, patch: Patch, filter: Filter) -> Result<Vec<String>>;
}
