//! Common test fixtures: a note table backed by an in-memory repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use soft_removable::{BaseRepository, Filter, OrderBy, Pagination, Patch, SoftRemovable, SortDir};
use std::collections::HashMap;

/// Row stored by the mock repository
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub removed: bool,
}

impl Note {
    /// An active note
    pub fn active(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: serde_json::json!({ "source": "fixture" }),
            created_at: Utc::now(),
            removed: false,
        }
    }

    /// A note already carrying the removal marker
    pub fn deleted(id: &str, title: &str) -> Self {
        Self {
            removed: true,
            ..Self::active(id, title)
        }
    }
}

impl SoftRemovable for Note {
    fn removed(&self) -> bool {
        self.removed
    }
}

/// In-memory base repository used to exercise the delegation paths
///
/// Filters and patches are applied by field name, mirroring what a SQL-backed
/// implementation would do with the rendered condition.
pub struct MockNoteRepo {
    notes: RwLock<HashMap<String, Note>>,
    db: DatabaseConnection,
}

impl MockNoteRepo {
    /// Seed notes; raw statements go to an unscripted mock connection
    pub fn new(seed: impl IntoIterator<Item = Note>) -> Self {
        Self::with_connection(
            seed,
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        )
    }

    /// Seed notes and script the connection used for raw statements
    pub fn with_connection(seed: impl IntoIterator<Item = Note>, db: DatabaseConnection) -> Self {
        Self {
            notes: RwLock::new(seed.into_iter().map(|n| (n.id.clone(), n)).collect()),
            db,
        }
    }

    /// Snapshot of a stored note, marker included
    pub fn get(&self, id: &str) -> Option<Note> {
        self.notes.read().get(id).cloned()
    }

    /// Take back the connection to inspect its transaction log
    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }

    fn matches(filter: &Filter, note: &Note) -> bool {
        filter.predicates().iter().all(|p| match p.field.as_str() {
            "id" => p.value == Value::from(note.id.as_str()),
            "title" => p.value == Value::from(note.title.as_str()),
            "removed" => p.value == Value::from(note.removed),
            _ => false,
        })
    }

    fn apply(patch: &Patch, note: &mut Note) {
        for assignment in patch.assignments() {
            match (assignment.field.as_str(), &assignment.value) {
                ("title", Value::String(Some(title))) => note.title = (**title).clone(),
                ("removed", Value::Bool(Some(removed))) => note.removed = *removed,
                _ => {}
            }
        }
    }
}

#[async_trait]
impl BaseRepository for MockNoteRepo {
    type Entity = Note;

    fn table(&self) -> &str {
        "notes"
    }

    fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn get_by_id(&self, id: &str) -> anyhow::Result<Option<Note>> {
        Ok(self.notes.read().get(id).cloned())
    }

    async fn list(
        &self,
        filter: Filter,
        pagination: Option<Pagination>,
        order: Option<OrderBy>,
    ) -> anyhow::Result<Vec<Note>> {
        let notes = self.notes.read();
        let mut rows: Vec<Note> = notes
            .values()
            .filter(|n| Self::matches(&filter, n))
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(order) = order {
            match (order.field.as_str(), order.direction) {
                ("title", SortDir::Asc) => rows.sort_by(|a, b| a.title.cmp(&b.title)),
                ("title", SortDir::Desc) => rows.sort_by(|a, b| b.title.cmp(&a.title)),
                _ => {}
            }
        }
        if let Some(page) = pagination {
            rows = rows
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect();
        }
        Ok(rows)
    }

    async fn count(&self, filter: Filter) -> anyhow::Result<u64> {
        let notes = self.notes.read();
        Ok(notes.values().filter(|n| Self::matches(&filter, n)).count() as u64)
    }

    async fn update(&self, patch: Patch, filter: Filter) -> anyhow::Result<Vec<String>> {
        let mut notes = self.notes.write();
        let mut affected = Vec::new();
        for note in notes.values_mut() {
            if Self::matches(&filter, note) {
                Self::apply(&patch, note);
                affected.push(note.id.clone());
            }
        }
        affected.sort();
        Ok(affected)
    }
}
