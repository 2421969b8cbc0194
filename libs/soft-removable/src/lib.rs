//! Soft-removal layer over a generic entity repository
//!
//! Entities reached through this crate are never physically erased. Removal
//! sets a boolean marker on the row, and every operation exposed by
//! [`SoftRemovableRepository`] behaves as if marked rows do not exist: reads
//! conjoin a `removed = false` predicate, removal is rewritten as a guarded
//! update, and bulk removal issues a single parameterized statement.

// Public exports
pub mod model;
pub use model::{
    Assignment, Filter, OrderBy, Pagination, Patch, Predicate, SoftRemovable, SortDir, ID_FIELD,
    REMOVED_FIELD,
};

pub mod repository;
pub use repository::BaseRepository;

pub mod soft;
pub use soft::SoftRemovableRepository;
