//! Filter and mutation primitives shared by repository implementations
//!
//! These are pure domain models - no serde derives. Values are carried as
//! [`sea_orm::Value`] so SQL-backed implementations can bind them directly.

use sea_orm::sea_query::{Alias, Condition, Expr};
use sea_orm::Value;

/// Field holding the unique row identifier
pub const ID_FIELD: &str = "id";

/// Field holding the logical-removal marker
pub const REMOVED_FIELD: &str = "removed";

/// Entity carrying a logical-removal marker
///
/// Implementors whose backing row has no marker column (or a nullable one)
/// report `false` for absent values.
pub trait SoftRemovable {
    /// Whether the entity has been logically removed
    fn removed(&self) -> bool;
}

/// Single field-equality predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field the predicate constrains
    pub field: String,
    /// Value the field must equal
    pub value: Value,
}

/// Conjunction of field-equality predicates
///
/// An empty filter matches every entity. Conjunction is explicit: predicates
/// are only ever combined with [`Filter::eq`] and [`Filter::and`], so a fixed
/// internal predicate can be appended to whatever the caller supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Filter matching every entity
    pub fn all() -> Self {
        Self::default()
    }

    /// Constrain `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Conjoin another filter onto this one
    pub fn and(mut self, other: Filter) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// Predicates in application order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether the filter constrains anything
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Render the conjunction as a `sea_query` condition
    ///
    /// Bridge for SQL-backed base repositories; every value becomes a bound
    /// parameter when the enclosing statement is built.
    pub fn to_condition(&self) -> Condition {
        self.predicates.iter().fold(Condition::all(), |cond, p| {
            cond.add(Expr::col(Alias::new(p.field.as_str())).eq(p.value.clone()))
        })
    }
}

/// Single field assignment applied by an update
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Field the assignment writes
    pub field: String,
    /// Value written to the field
    pub value: Value,
}

/// Ordered set of field assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    assignments: Vec<Assignment>,
}

impl Patch {
    /// Patch writing nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field`
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push(Assignment {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Assignments in application order
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Whether the patch writes anything
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Limit/offset window applied to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of rows returned
    pub limit: u64,
    /// Rows skipped before the first returned one
    pub offset: u64,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Ordering applied to a listing
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Field the listing is ordered by
    pub field: String,
    /// Direction of the ordering
    pub direction: SortDir,
}

impl OrderBy {
    /// Ascending order on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDir::Asc,
        }
    }

    /// Descending order on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDir::Desc,
        }
    }
}
