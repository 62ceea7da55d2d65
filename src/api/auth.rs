//! Client for the auth service (login, registration, profile).

use crate::model::{ClientRecord, LoginRequest, LoginResponse, ProfileUpdateRequest,
    RegisterRequest};

use super::{ApiError, ServiceClient};

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ServiceClient,
}

impl AuthApi {
    pub fn new(client: ServiceClient) -> Self {
        AuthApi { client }
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client
            .post_credentials("/api/v1/clients/login", &request)
            .await
    }

    /// Register a new client account. Does not log the client in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ClientRecord, ApiError> {
        self.client
            .post_credentials("/api/v1/clients/register", request)
            .await
    }

    /// Fetch the profile of the client behind the current token.
    pub async fn profile(&self) -> Result<ClientRecord, ApiError> {
        self.client.get("/api/v1/clients/profile").await
    }

    pub async fn update_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> Result<ClientRecord, ApiError> {
        self.client.put("/api/v1/clients/profile", request).await
    }

    /// Create the very first administrator account. Only succeeds while the
    /// platform has no admin yet.
    pub async fn setup_first_admin(
        &self,
        request: &RegisterRequest,
    ) -> Result<ClientRecord, ApiError> {
        self.client
            .post_credentials("/api/v1/clients/setup/first-admin", request)
            .await
    }
}
