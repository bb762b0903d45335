//! In-memory record store adapter.
//!
//! # Design
//! `TodoStore` is an explicitly constructed handle passed to the router as
//! `Arc` state — the document-database stand-in. Every operation takes the
//! lock once and is atomic for a single item; a batch insert holds the
//! write lock for its duration but makes no cross-record transactional
//! promise beyond that. Listings are ordered by `(created_at, id)` so
//! exports and list responses are deterministic.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use todo_core::{Error, NewTodo, TodoItem, TodoPatch};

/// Fields a query predicate can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Description,
    Status,
}

/// In-memory document store for todo items, keyed by id.
#[derive(Debug, Default)]
pub struct TodoStore {
    items: RwLock<HashMap<Uuid, TodoItem>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one item, generating its id and timestamps.
    pub async fn create(&self, input: NewTodo) -> Result<TodoItem, Error> {
        let item = materialize(input);
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    /// Inserts a batch under one write lock and returns the count stored.
    pub async fn insert_batch(&self, inputs: Vec<NewTodo>) -> Result<usize, Error> {
        let mut items = self.items.write().await;
        let count = inputs.len();
        for input in inputs {
            let item = materialize(input);
            items.insert(item.id, item);
        }
        Ok(count)
    }

    pub async fn get(&self, id: Uuid) -> Result<TodoItem, Error> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    /// Every stored item, in `(created_at, id)` order.
    pub async fn all(&self) -> Result<Vec<TodoItem>, Error> {
        let items = self.items.read().await;
        Ok(sorted(items.values().cloned().collect()))
    }

    /// Items whose given field equals `value` exactly, in listing order.
    pub async fn find_by_field(
        &self,
        field: QueryField,
        value: &str,
    ) -> Result<Vec<TodoItem>, Error> {
        let items = self.items.read().await;
        let found = items
            .values()
            .filter(|item| match field {
                QueryField::Description => item.description == value,
                QueryField::Status => item.status == value,
            })
            .cloned()
            .collect();
        Ok(sorted(found))
    }

    /// Applies a partial update and refreshes `updated_at`. `id` and
    /// `created_at` are never touched.
    pub async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<TodoItem, Error> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(Error::NotFound)?;
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(status) = patch.status {
            item.status = status;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Removes an item and returns it.
    pub async fn delete(&self, id: Uuid) -> Result<TodoItem, Error> {
        self.items.write().await.remove(&id).ok_or(Error::NotFound)
    }
}

fn materialize(input: NewTodo) -> TodoItem {
    let now = Utc::now();
    TodoItem {
        id: Uuid::new_v4(),
        description: input.description,
        status: input.status,
        created_at: now,
        updated_at: now,
    }
}

fn sorted(mut items: Vec<TodoItem>) -> Vec<TodoItem> {
    items.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(description: &str, status: &str) -> NewTodo {
        NewTodo {
            description: description.to_string(),
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn create_generates_id_and_equal_timestamps() {
        let store = TodoStore::new();
        let item = store.create(new_todo("Buy milk", "pending")).await.unwrap();
        assert!(!item.id.is_nil());
        assert_eq!(item.created_at, item.updated_at);
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let store = TodoStore::new();
        let item = store.create(new_todo("Buy milk", "pending")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let patch = TodoPatch {
            description: None,
            status: Some("completed".to_string()),
        };
        let updated = store.update(item.id, patch).await.unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.created_at, item.created_at);
        assert_eq!(updated.description, "Buy milk");
        assert_eq!(updated.status, "completed");
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = TodoStore::new();
        let patch = TodoPatch::default();
        assert!(matches!(
            store.update(Uuid::new_v4(), patch).await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = TodoStore::new();
        let item = store.create(new_todo("Buy milk", "pending")).await.unwrap();
        let deleted = store.delete(item.id).await.unwrap();
        assert_eq!(deleted.id, item.id);
        assert!(matches!(store.get(item.id).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn find_by_field_matches_exactly() {
        let store = TodoStore::new();
        store.create(new_todo("a", "pending")).await.unwrap();
        store.create(new_todo("b", "completed")).await.unwrap();
        store.create(new_todo("c", "pending")).await.unwrap();

        let pending = store
            .find_by_field(QueryField::Status, "pending")
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let by_description = store
            .find_by_field(QueryField::Description, "b")
            .await
            .unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].status, "completed");
    }

    #[tokio::test]
    async fn find_with_no_matches_is_empty_not_error() {
        let store = TodoStore::new();
        let found = store
            .find_by_field(QueryField::Status, "archived")
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn insert_batch_stores_every_payload() {
        let store = TodoStore::new();
        let count = store
            .insert_batch(vec![new_todo("a", "x"), new_todo("b", "y")])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn all_is_ordered_by_creation() {
        let store = TodoStore::new();
        for name in ["first", "second", "third"] {
            store.create(new_todo(name, "pending")).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let all = store.all().await.unwrap();
        let names: Vec<_> = all.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
