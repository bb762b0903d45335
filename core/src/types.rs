//! Domain types for the todo service.
//!
//! # Design
//! The record shape is an explicit struct with required fields enforced at
//! the handler boundary, not deferred to the store. JSON uses camelCase
//! keys (`createdAt`, `updatedAt`); Rust fields stay snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// A single persisted todo item.
///
/// `id` is generated at creation and immutable. `created_at` is set once;
/// `updated_at` is refreshed by the store on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub status: String,
}

impl NewTodo {
    /// Minimal required-field check: neither field may be blank.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::Validation("description must not be empty".into()));
        }
        if self.status.trim().is_empty() {
            return Err(Error::Validation("status must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TodoPatch {
    /// A field that is present must not be blank.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if matches!(self.description.as_deref(), Some(d) if d.trim().is_empty()) {
            return Err(Error::Validation("description must not be empty".into()));
        }
        if matches!(self.status.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(Error::Validation("status must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let item = TodoItem {
            id: Uuid::nil(),
            description: "Test".to_string(),
            status: "pending".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["description"], "Test");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn todo_item_roundtrips_through_json() {
        let now = Utc::now();
        let item = TodoItem {
            id: Uuid::new_v4(),
            description: "Roundtrip".to_string(),
            status: "completed".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: TodoItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn new_todo_rejects_missing_fields() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"description":"x"}"#);
        assert!(result.is_err());
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"status":"pending"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_todo_validate_rejects_blank_fields() {
        let todo = NewTodo {
            description: "  ".to_string(),
            status: "pending".to_string(),
        };
        assert!(todo.validate().is_err());

        let todo = NewTodo {
            description: "Buy milk".to_string(),
            status: String::new(),
        };
        assert!(todo.validate().is_err());

        let todo = NewTodo {
            description: "Buy milk".to_string(),
            status: "pending".to_string(),
        };
        assert!(todo.validate().is_ok());
    }

    #[test]
    fn patch_all_fields_optional() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.description.is_none());
        assert!(patch.status.is_none());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn patch_rejects_present_but_blank_field() {
        let patch: TodoPatch = serde_json::from_str(r#"{"status":""}"#).unwrap();
        assert!(patch.validate().is_err());
    }
}
