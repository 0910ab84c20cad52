use reqwest::Method;
use serde_json::json;

use crate::error::ApiError;
use crate::models::{AuthResponse, User};

use super::client::ApiClient;

impl ApiClient {
    /// Authenticate with email and password. On success the returned token
    /// becomes the stored credential; every subsequent request carries it.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        let auth: AuthResponse = self
            .request(Method::POST, "/auth/login", Some(body))
            .await?;
        self.session().set(&auth.token)?;
        tracing::info!(email = %auth.user.email, "Logged in");
        Ok(auth)
    }

    /// Create an account. Like [`login`](Self::login), a successful response
    /// immediately authenticates the session.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let auth: AuthResponse = self
            .request(Method::POST, "/auth/register", Some(body))
            .await?;
        self.session().set(&auth.token)?;
        tracing::info!(email = %auth.user.email, "Registered");
        Ok(auth)
    }

    /// Fetch the account behind the stored credential.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(Method::GET, "/auth/me", None).await
    }

    /// Drop the stored credential. Purely client-side; the backend holds no
    /// session state to tear down.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}
