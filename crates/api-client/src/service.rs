//! Generic REST service over one resource

use crate::error::{ApiError, ApiResult};
use crate::models::{RecordId, Validate};
use crate::resources::Resource;
use crate::transport::Transport;
use reqwest::Method;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// CRUD operations on the collection bound to `R`
///
/// Cloning is cheap: every clone shares the client's transport.
pub struct ApiService<R> {
    transport: Arc<dyn Transport>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ApiService<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> ApiService<R> {
    /// Create a service sending requests through `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _record: PhantomData,
        }
    }

    /// Collection path this service talks to
    #[must_use]
    pub fn path(&self) -> &'static str {
        R::KIND.path()
    }

    fn item_path(id: RecordId) -> String {
        format!("{}/{id}", R::KIND.path())
    }

    /// Fetch every record in the collection
    #[instrument(skip_all, fields(resource = R::KIND.path()))]
    pub async fn get_all(&self) -> ApiResult<Vec<R>> {
        let body = self.transport.execute(Method::GET, R::KIND.path(), None).await?;
        let records: Vec<R> = serde_json::from_value(body)?;
        debug!(count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// Fetch one record; a missing id surfaces as the backend's 404
    #[instrument(skip(self), fields(resource = R::KIND.path()))]
    pub async fn get_by_id(&self, id: RecordId) -> ApiResult<R> {
        let body = self
            .transport
            .execute(Method::GET, &Self::item_path(id), None)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Create a record and return it with its assigned id
    #[instrument(skip_all, fields(resource = R::KIND.path()))]
    pub async fn create(&self, new: &R::New) -> ApiResult<R> {
        let payload = serde_json::to_value(new)?;
        let body = self
            .transport
            .execute(Method::POST, R::KIND.path(), Some(payload))
            .await?;
        let created: R = serde_json::from_value(body)?;
        debug!(id = created.id(), "Created record");
        Ok(created)
    }

    /// Validate `new` and create it; nothing is sent when validation fails
    pub async fn create_validated(&self, new: &R::New) -> ApiResult<R> {
        let result = new.validate();
        if !result.is_valid() {
            return Err(ApiError::Validation(result));
        }
        self.create(new).await
    }

    /// Send the fields set in `patch` and return the updated record
    #[instrument(skip(self, patch), fields(resource = R::KIND.path()))]
    pub async fn update(&self, id: RecordId, patch: &R::Patch) -> ApiResult<R> {
        let payload = serde_json::to_value(patch)?;
        let body = self
            .transport
            .execute(Method::PUT, &Self::item_path(id), Some(payload))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Check the record as it would look after `patch`, then update it
    ///
    /// Fetches the current record first; an invalid result sends no `PUT`.
    pub async fn update_validated(&self, id: RecordId, patch: &R::Patch) -> ApiResult<R> {
        let mut current = self.get_by_id(id).await?;
        current.apply(patch);
        let result = current.into_new().validate();
        if !result.is_valid() {
            return Err(ApiError::Validation(result));
        }
        self.update(id, patch).await
    }

    /// Delete a record; the response body is ignored
    #[instrument(skip(self), fields(resource = R::KIND.path()))]
    pub async fn delete(&self, id: RecordId) -> ApiResult<()> {
        let _: Value = self
            .transport
            .execute(Method::DELETE, &Self::item_path(id), None)
            .await?;
        debug!("Deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, LocationPatch, NewLocation};
    use crate::transport::MemoryTransport;

    fn service() -> (Arc<MemoryTransport>, ApiService<Location>) {
        let backend = Arc::new(MemoryTransport::new());
        let service = ApiService::new(backend.clone());
        (backend, service)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, locations) = service();
        let created = locations.create(&NewLocation::new("Sofala")).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = locations.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_validated_sends_nothing_when_invalid() {
        let (backend, locations) = service();
        let err = locations.create_validated(&NewLocation::new("  ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(backend.requests(), 0);
    }

    #[tokio::test]
    async fn test_update_validated_checks_merged_record() {
        let (backend, locations) = service();
        let created = locations.create(&NewLocation::new("Tete")).await.unwrap();

        let blank = LocationPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        let err = locations.update_validated(created.id, &blank).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        // POST + GET, no PUT
        assert_eq!(backend.requests(), 2);

        let activate = LocationPatch {
            is_province: Some(true),
            ..Default::default()
        };
        let updated = locations.update_validated(created.id, &activate).await.unwrap();
        assert!(updated.is_province);
        assert_eq!(updated.name, "Tete");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (_, locations) = service();
        let err = locations.delete(9).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_clone_shares_transport() {
        let (_, locations) = service();
        let other = locations.clone();
        assert!(Arc::ptr_eq(&locations.transport, &other.transport));
        assert_eq!(other.path(), "locations");
    }
}
