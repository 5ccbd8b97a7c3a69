//! In-process transport with conventional REST semantics

use super::Transport;
use crate::error::{ApiError, ApiResult};
use crate::resources::ResourceKind;
use crate::RecordId;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;
use tracing::debug;

type Row = Map<String, Value>;

#[derive(Debug)]
struct Collection {
    next_id: RecordId,
    rows: BTreeMap<RecordId, Row>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl Collection {
    fn insert(&mut self, mut row: Row, id: Option<RecordId>) -> Row {
        let id = id.unwrap_or(self.next_id);
        self.next_id = self.next_id.max(id.saturating_add(1));
        row.insert("id".to_string(), Value::from(id));
        self.rows.insert(id, row.clone());
        row
    }
}

/// Backend held in memory
///
/// - Collections are the eight resource paths (or those passed to
///   [`MemoryTransport::with_collections`]); anything else answers 404.
/// - Ids are assigned per collection starting at 1 and never reused.
/// - `PUT` merges the supplied keys into the stored object; `id` is immutable.
/// - [`set_offline`](Self::set_offline) fails every call without touching data.
#[derive(Debug)]
pub struct MemoryTransport {
    collections: RwLock<BTreeMap<String, Collection>>,
    offline: AtomicBool,
    requests: AtomicUsize,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    /// Empty backend serving every resource path
    #[must_use]
    pub fn new() -> Self {
        Self::with_collections(ResourceKind::ALL.iter().map(|k| k.path()))
    }

    /// Empty backend serving only `paths`
    pub fn with_collections<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let collections = paths
            .into_iter()
            .map(|p| (p.to_string(), Collection::default()))
            .collect();
        Self {
            collections: RwLock::new(collections),
            offline: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    /// Simulate a network outage (or recovery)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Load rows directly, bypassing the request path.
    ///
    /// Rows carrying an integer `id` keep it; the rest get the next free id.
    pub fn seed(&self, path: &str, rows: impl IntoIterator<Item = Value>) -> ApiResult<()> {
        let mut guard = self.write()?;
        let collection = guard.get_mut(path).ok_or_else(|| not_found(path))?;
        for row in rows {
            let Value::Object(mut row) = row else {
                return Err(ApiError::api_response(400, "Seed rows must be JSON objects"));
            };
            let id = row.remove("id").and_then(|v| v.as_i64());
            collection.insert(row, id);
        }
        Ok(())
    }

    fn write(
        &self,
    ) -> ApiResult<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Collection>>> {
        self.collections
            .write()
            .map_err(|_| ApiError::Unavailable("memory backend lock poisoned".to_string()))
    }

    fn handle(&self, method: &Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let trimmed = path.trim_matches('/');
        let (name, id) = match trimmed.split_once('/') {
            Some((name, raw)) => {
                let id = raw
                    .parse::<RecordId>()
                    .map_err(|_| ApiError::api_response(400, format!("Invalid id: {raw}")))?;
                (name, Some(id))
            }
            None => (trimmed, None),
        };

        let mut guard = self.write()?;
        let collection = guard.get_mut(name).ok_or_else(|| not_found(path))?;

        match (method.as_str(), id) {
            ("GET", None) => Ok(Value::Array(
                collection.rows.values().cloned().map(Value::Object).collect(),
            )),
            ("GET", Some(id)) => collection
                .rows
                .get(&id)
                .cloned()
                .map(Value::Object)
                .ok_or_else(|| not_found(path)),
            ("POST", None) => {
                let mut row = object_body(body)?;
                row.remove("id");
                Ok(Value::Object(collection.insert(row, None)))
            }
            ("PUT", Some(id)) => {
                let patch = object_body(body)?;
                let row = collection.rows.get_mut(&id).ok_or_else(|| not_found(path))?;
                for (key, value) in patch {
                    if key != "id" {
                        row.insert(key, value);
                    }
                }
                Ok(Value::Object(row.clone()))
            }
            ("DELETE", Some(id)) => collection
                .rows
                .remove(&id)
                .map(|_| Value::Null)
                .ok_or_else(|| not_found(path)),
            _ => Err(ApiError::api_response(
                405,
                format!("{method} not allowed on /{trimmed}"),
            )),
        }
    }
}

fn not_found(path: &str) -> ApiError {
    ApiError::api_response(404, format!("Not found: /{}", path.trim_matches('/')))
}

fn object_body(body: Option<Value>) -> ApiResult<Row> {
    match body {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::api_response(400, "Expected a JSON object body")),
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            debug!(%method, path, "Memory backend offline");
            return Err(ApiError::Unavailable("simulated network failure".to_string()));
        }

        let result = self.handle(&method, path, body);
        debug!(%method, path, ok = result.is_ok(), "Memory backend call");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn call(t: &MemoryTransport, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        t.execute(method, path, body).await
    }

    #[tokio::test]
    async fn test_post_assigns_sequential_ids() {
        let t = MemoryTransport::new();
        let a = call(&t, Method::POST, "locations", Some(json!({"name": "Maputo"}))).await.unwrap();
        let b = call(&t, Method::POST, "locations", Some(json!({"name": "Beira", "id": 99}))).await.unwrap();
        assert_eq!(a["id"], 1);
        // Client-supplied ids are ignored
        assert_eq!(b["id"], 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let t = MemoryTransport::new();
        call(&t, Method::POST, "users", Some(json!({"email": "a@x.io"}))).await.unwrap();
        call(&t, Method::DELETE, "users/1", None).await.unwrap();
        let again = call(&t, Method::POST, "users", Some(json!({"email": "b@x.io"}))).await.unwrap();
        assert_eq!(again["id"], 2);
    }

    #[tokio::test]
    async fn test_put_merges_and_keeps_id() {
        let t = MemoryTransport::new();
        call(&t, Method::POST, "entity-types", Some(json!({"name": "NGO", "is_active": true}))).await.unwrap();
        let updated = call(&t, Method::PUT, "entity-types/1", Some(json!({"is_active": false, "id": 5})))
            .await
            .unwrap();
        assert_eq!(updated, json!({"id": 1, "name": "NGO", "is_active": false}));
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let t = MemoryTransport::new();
        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(json!({}))),
            (Method::DELETE, None),
        ] {
            let err = call(&t, method, "entities/42", body).await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    #[tokio::test]
    async fn test_unknown_collection_is_404() {
        let t = MemoryTransport::new();
        let err = call(&t, Method::GET, "invoices", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_bad_id_and_method() {
        let t = MemoryTransport::new();
        let err = call(&t, Method::GET, "entities/abc", None).await.unwrap_err();
        assert_eq!(err.status(), Some(400));

        let err = call(&t, Method::DELETE, "entities", None).await.unwrap_err();
        assert_eq!(err.status(), Some(405));

        let err = call(&t, Method::POST, "entities", Some(json!([1, 2]))).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_offline_leaves_data_untouched() {
        let t = MemoryTransport::new();
        t.seed("locations", [json!({"name": "Nampula"})]).unwrap();

        t.set_offline(true);
        let err = call(&t, Method::POST, "locations", Some(json!({"name": "Tete"}))).await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));

        t.set_offline(false);
        let rows = call(&t, Method::GET, "locations", None).await.unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(t.requests(), 2);
    }

    #[test]
    fn test_seed_keeps_explicit_ids() {
        let t = MemoryTransport::with_collections(["branch-hours"]);
        t.seed("branch-hours", [json!({"id": 10, "weekday": "Domingo"}), json!({"weekday": "Sábado"})])
            .unwrap();
        let guard = t.collections.read().unwrap();
        let ids: Vec<_> = guard["branch-hours"].rows.keys().copied().collect();
        assert_eq!(ids, vec![10, 11]);
        drop(guard);
        assert!(t.seed("locations", []).is_err());
    }

    #[tokio::test]
    async fn test_seed_with_largest_id() {
        let t = MemoryTransport::new();
        t.seed("users", [json!({"id": i64::MAX, "email": "last@x.io"})]).unwrap();
        let row = call(&t, Method::GET, &format!("users/{}", i64::MAX), None).await.unwrap();
        assert_eq!(row["email"], "last@x.io");
    }
}
