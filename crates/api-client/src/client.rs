//! Client façade handing out typed services

use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::resources::Resource;
use crate::service::ApiService;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;

/// Entry point to the backend
///
/// Owns one shared [`Transport`]; per-resource accessors (`locations()`,
/// `users()`, ...) and [`service`](Self::service) return cheap handles
/// onto it.
#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<dyn Transport>,
}

impl AdminClient {
    /// Create a client over HTTP, configured from the config file and environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a client over HTTP with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Typed service for record type `R`
    #[must_use]
    pub fn service<R: Resource>(&self) -> ApiService<R> {
        ApiService::new(Arc::clone(&self.transport))
    }

    /// Shared transport
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityStatus, NewEntityType};
    use crate::transport::MemoryTransport;

    #[test]
    fn test_client_over_http() {
        assert!(AdminClient::with_config(ClientConfig::default()).is_ok());
        assert!(AdminClient::with_config(ClientConfig::default().with_base_url("nope")).is_err());
    }

    #[tokio::test]
    async fn test_accessors_share_transport() {
        let backend = Arc::new(MemoryTransport::new());
        let client = AdminClient::with_transport(backend.clone());

        client
            .entity_types()
            .create(&NewEntityType::new("Cooperative"))
            .await
            .unwrap();
        let types = client.entity_types().get_all().await.unwrap();
        assert_eq!(types.len(), 1);

        let statuses = client.service::<EntityStatus>().get_all().await.unwrap();
        assert!(statuses.is_empty());
        assert_eq!(backend.requests(), 3);
    }
}
