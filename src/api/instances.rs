use reqwest::Method;

use crate::error::ApiError;
use crate::models::{ConnectionInfo, CreateInstanceRequest, Instance, InstanceStats};

use super::client::ApiClient;

impl ApiClient {
    /// List the caller's instances.
    pub async fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.request(Method::GET, "/cloudpc", None).await
    }

    /// Fetch one instance by id.
    pub async fn get_instance(&self, id: &str) -> Result<Instance, ApiError> {
        self.request(Method::GET, &format!("/cloudpc/{}", id), None)
            .await
    }

    /// Provision a new instance. The backend answers with the created
    /// resource, usually in `starting` state.
    pub async fn create_instance(
        &self,
        spec: &CreateInstanceRequest,
    ) -> Result<Instance, ApiError> {
        let body = serde_json::to_value(spec).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::POST, "/cloudpc", Some(body)).await
    }

    /// Request a transition to `running`.
    pub async fn start_instance(&self, id: &str) -> Result<Instance, ApiError> {
        self.request(Method::POST, &format!("/cloudpc/{}/start", id), None)
            .await
    }

    /// Request a transition to `stopped`.
    pub async fn stop_instance(&self, id: &str) -> Result<Instance, ApiError> {
        self.request(Method::POST, &format!("/cloudpc/{}/stop", id), None)
            .await
    }

    /// Permanently remove an instance. Success carries an empty body.
    pub async fn delete_instance(&self, id: &str) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/cloudpc/{}", id))
            .await
    }

    /// Usage snapshot for a (running) instance.
    pub async fn instance_stats(&self, id: &str) -> Result<InstanceStats, ApiError> {
        self.request(Method::GET, &format!("/cloudpc/{}/stats", id), None)
            .await
    }

    /// Obtain a remote-access handle for an instance.
    pub async fn connect_instance(&self, id: &str) -> Result<ConnectionInfo, ApiError> {
        self.request(Method::POST, &format!("/cloudpc/{}/connect", id), None)
            .await
    }
}
