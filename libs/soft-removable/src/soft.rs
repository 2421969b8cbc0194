//! Soft-removal wrapper around a [`BaseRepository`]

use crate::model::{Filter, OrderBy, Pagination, Patch, SoftRemovable, ID_FIELD, REMOVED_FIELD};
use crate::repository::BaseRepository;
use anyhow::Result;
use sea_orm::sea_query::{Alias, ConditionalStatement, Expr, Query};
use sea_orm::ConnectionTrait;

/// Repository view that hides logically removed entities
///
/// Every read and mutation delegates to the wrapped repository with the
/// caller's filter conjoined with `removed = false`, so marked rows are
/// invisible on every path. Removal is rewritten as an update that sets the
/// marker; nothing exposed here ever clears it again.
pub struct SoftRemovableRepository<R> {
    base: R,
}

impl<R> SoftRemovableRepository<R>
where
    R: BaseRepository,
    R::Entity: SoftRemovable,
{
    /// Wrap a base repository
    pub fn new(base: R) -> Self {
        Self { base }
    }

    /// Access the wrapped repository
    pub fn base(&self) -> &R {
        &self.base
    }

    /// Unwrap, returning the base repository
    pub fn into_inner(self) -> R {
        self.base
    }

    /// Fixed predicate conjoined onto every delegated filter
    fn not_removed() -> Filter {
        Filter::all().eq(REMOVED_FIELD, false)
    }

    /// Fetch an active entity by identifier
    ///
    /// A row that exists but carries the removal marker is reported as
    /// `None`, indistinguishable from a missing row.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<R::Entity>> {
        let entity = self.base.get_by_id(id).await?;
        Ok(entity.filter(|e| !e.removed()))
    }

    /// List active entities matching the filter
    ///
    /// Pagination and ordering pass through unmodified.
    pub async fn list(
        &self,
        filter: Filter,
        pagination: Option<Pagination>,
        order: Option<OrderBy>,
    ) -> Result<Vec<R::Entity>> {
        self.base
            .list(filter.and(Self::not_removed()), pagination, order)
            .await
    }

    /// Count active entities matching the filter
    pub async fn count(&self, filter: Filter) -> Result<u64> {
        self.base.count(filter.and(Self::not_removed())).await
    }

    /// Update active entities matching the filter
    ///
    /// Rows carrying the removal marker are never matched, so they cannot be
    /// mutated (or restored) through this path. Returns affected identifiers.
    pub async fn update(&self, patch: Patch, filter: Filter) -> Result<Vec<String>> {
        self.base
            .update(patch, filter.and(Self::not_removed()))
            .await
    }

    /// Mark entities matching the filter as removed
    ///
    /// Implemented as an update guarded by `removed = false`: rows already
    /// marked are not matched again, so repeating a removal reports no
    /// affected identifiers and is not an error.
    pub async fn remove(&self, filter: Filter) -> Result<Vec<String>> {
        self.base
            .update(
                Patch::new().set(REMOVED_FIELD, true),
                filter.and(Self::not_removed()),
            )
            .await
    }

    /// Mark every currently active row in `ids` as removed, in one statement
    ///
    /// Builds `UPDATE <table> SET removed = true WHERE id IN (..) AND
    /// removed = false RETURNING id` with each identifier bound as a separate
    /// parameter, executes it once through the shared connection, and returns
    /// the identifiers the statement reports. Missing rows and rows already
    /// marked are not matched, keeping the operation idempotent. Duplicate
    /// input identifiers are tolerated. An empty `ids` returns immediately
    /// without touching the connection.
    pub async fn remove_batch(&self, ids: &[String]) -> Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut update = Query::update();
        update
            .table(Alias::new(self.base.table()))
            .value(Alias::new(REMOVED_FIELD), true)
            .and_where(Expr::col(Alias::new(ID_FIELD)).is_in(ids.iter().map(String::as_str)))
            .and_where(Expr::col(Alias::new(REMOVED_FIELD)).eq(false))
            .returning_col(Alias::new(ID_FIELD));

        let db = self.base.connection();
        let stmt = db.get_database_backend().build(&update);
        tracing::debug!("Bulk removal statement for {}: {}", self.base.table(), stmt.sql);

        let rows = db.query_all(stmt).await?;
        rows.iter()
            .map(|row| row.try_get::<String>("", ID_FIELD).map_err(Into::into))
            .collect::<Result<Vec<_>>>()
    }
}
