//! CRUD operations over one file-backed collection

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::FileStore;
use crate::validation::{validate, FieldRule};

/// One JSON object within a collection's array.
pub type Record = Map<String, Value>;

/// Store-assigned identity field, immutable after creation.
pub const ID_FIELD: &str = "_id";

/// Store-assigned creation timestamp field.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// CRUD operations over one record collection.
///
/// Every operation is a whole-file load-modify-persist cycle against the
/// injected store. Two overlapping cycles lose the earlier writer's
/// changes; callers that need serial writes must provide them.
pub struct Collection {
    name: String,
    store: FileStore,
    rules: Vec<FieldRule>,
}

impl Collection {
    /// Wire a collection to its store and creation rule set.
    pub fn new(name: &str, store: FileStore, rules: Vec<FieldRule>) -> Self {
        Self {
            name: name.to_string(),
            store,
            rules,
        }
    }

    /// Collection name, used for error context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate the payload, stamp identity and creation time, append and
    /// persist. Returns the new record's id.
    pub async fn create(&self, payload: Record) -> Result<String> {
        let violations = validate(&payload, &self.rules);
        if !violations.is_empty() {
            return Err(StoreError::Validation(violations));
        }

        let id = Uuid::new_v4().to_string();
        let mut record = payload;
        record.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        record.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let mut records = self.store.load_all().await?;
        records.push(record);
        self.store.save_all(&records).await?;

        info!("Created record {} in {}", id, self.name);
        Ok(id)
    }

    /// Load and return the full collection unmodified.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.store.load_all().await
    }

    /// Find one record by id.
    pub async fn get(&self, id: &str) -> Result<Record> {
        let records = self.store.load_all().await?;

        records
            .into_iter()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: self.name.clone(),
                id: id.to_string(),
            })
    }

    /// Replace the record with the given id by one built from the payload.
    ///
    /// The id is preserved; every other field, `createdAt` included, comes
    /// from the payload. A missing id is not an error: the record is
    /// appended as new (replace-or-insert).
    pub async fn replace(&self, id: &str, payload: Record) -> Result<Record> {
        let mut records = self.store.load_all().await?;
        records.retain(|r| record_id(r) != Some(id));

        let mut record = payload;
        record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        records.push(record.clone());

        self.store.save_all(&records).await?;

        info!("Replaced record {} in {}", id, self.name);
        Ok(record)
    }

    /// Remove the record with the given id, if present.
    ///
    /// Deleting an absent id persists the unchanged collection and
    /// succeeds, so the operation is idempotent.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.store.load_all().await?;
        records.retain(|r| record_id(r) != Some(id));
        self.store.save_all(&records).await?;

        info!("Deleted record {} from {}", id, self.name);
        Ok(())
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn review_rules() -> Vec<FieldRule> {
        vec![
            FieldRule::required("comment"),
            FieldRule::required_integer("rate"),
            FieldRule::required_integer("id"),
        ]
    }

    /// Collection over a seeded temp file; the dir guard keeps it alive.
    fn test_collection(rules: Vec<FieldRule>) -> (Collection, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "[]").unwrap();

        (Collection::new("records", FileStore::new(path), rules), dir)
    }

    #[tokio::test]
    async fn create_assigns_a_fresh_id() {
        let (collection, _dir) = test_collection(Vec::new());

        let first = collection
            .create(payload(json!({ "comment": "one" })))
            .await
            .unwrap();
        let second = collection
            .create(payload(json!({ "comment": "two" })))
            .await
            .unwrap();

        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn create_stamps_id_and_created_at() {
        let (collection, _dir) = test_collection(Vec::new());

        let id = collection
            .create(payload(json!({ "name": "Ada" })))
            .await
            .unwrap();
        let record = collection.get(&id).await.unwrap();

        assert_eq!(record.get(ID_FIELD), Some(&Value::String(id)));
        assert!(record.get(CREATED_AT_FIELD).unwrap().is_string());
        assert_eq!(record.get("name"), Some(&Value::String("Ada".into())));
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_without_persisting() {
        let (collection, _dir) = test_collection(review_rules());

        let err = collection
            .create(payload(json!({ "comment": "ok" })))
            .await
            .unwrap_err();

        match err {
            StoreError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].field, "rate");
                assert_eq!(violations[1].field, "id");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }

        assert!(collection.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_after_create_keeps_prior_contents() {
        let (collection, _dir) = test_collection(Vec::new());

        let first = collection
            .create(payload(json!({ "name": "first" })))
            .await
            .unwrap();
        let second = collection
            .create(payload(json!({ "name": "second" })))
            .await
            .unwrap();

        let records = collection.list().await.unwrap();
        assert_eq!(records.len(), 2);

        let ids: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get(ID_FIELD).and_then(Value::as_str))
            .collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let (collection, _dir) = test_collection(Vec::new());

        let err = collection.get("no-such-id").await.unwrap_err();
        match err {
            StoreError::NotFound { collection, id } => {
                assert_eq!(collection, "records");
                assert_eq!(id, "no-such-id");
            }
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn replace_preserves_id_and_drops_created_at() {
        let (collection, _dir) = test_collection(Vec::new());

        let id = collection
            .create(payload(json!({ "name": "before", "extra": 1 })))
            .await
            .unwrap();

        let replaced = collection
            .replace(&id, payload(json!({ "name": "after" })))
            .await
            .unwrap();
        assert_eq!(replaced.get(ID_FIELD), Some(&Value::String(id.clone())));

        let record = collection.get(&id).await.unwrap();
        assert_eq!(record.get("name"), Some(&Value::String("after".into())));
        assert!(record.get("extra").is_none());
        assert!(record.get(CREATED_AT_FIELD).is_none());
    }

    #[tokio::test]
    async fn replace_inserts_when_id_is_absent() {
        let (collection, _dir) = test_collection(Vec::new());

        collection
            .replace("made-up", payload(json!({ "name": "ghost" })))
            .await
            .unwrap();

        let record = collection.get("made-up").await.unwrap();
        assert_eq!(record.get("name"), Some(&Value::String("ghost".into())));
        assert_eq!(collection.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (collection, _dir) = test_collection(Vec::new());

        let id = collection
            .create(payload(json!({ "name": "doomed" })))
            .await
            .unwrap();

        collection.delete(&id).await.unwrap();
        assert!(matches!(
            collection.get(&id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (collection, _dir) = test_collection(Vec::new());

        let id = collection
            .create(payload(json!({ "name": "once" })))
            .await
            .unwrap();

        collection.delete(&id).await.unwrap();
        collection.delete(&id).await.unwrap();
        collection.delete("never-existed").await.unwrap();

        assert!(collection.list().await.unwrap().is_empty());
    }
}
