//! HTTP clients for the MicroBank services.
//!
//! One thin adapter per service (auth, banking, admin, audit), all sharing
//! the [`ServiceClient`] plumbing: URL joining, bearer token attachment and
//! error decoding. Adapters return domain types from [`crate::model`] and
//! fail with [`ApiError`].

pub mod admin;
pub mod audit;
pub mod auth;
pub mod banking;
pub mod error;

pub use admin::AdminApi;
pub use audit::AuditApi;
pub use auth::AuthApi;
pub use banking::BankingApi;
pub use error::{AccessRestriction, ApiError, RequestKind};

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::session::TokenStore;

use error::decode_response;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared request plumbing for one service base URL.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenStore,
}

impl ServiceClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: TokenStore) -> Self {
        ServiceClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the session token when the request is authenticated, send,
    /// and decode any non-success response into an [`ApiError`].
    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        kind: RequestKind,
    ) -> Result<reqwest::Response, ApiError> {
        if kind == RequestKind::Authenticated {
            if let Some(token) = self.tokens.load() {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(decode_response(status, &body, kind))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get_text<Q>(&self, path: &str, query: &Q) -> Result<String, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.text().await?)
    }

    pub(crate) async fn get_bytes<Q>(&self, path: &str, query: &Q) -> Result<Vec<u8>, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }

    /// POST without a session token. Used for login, registration and
    /// first-admin setup, where a 401 means bad credentials rather than an
    /// expired session.
    pub(crate) async fn post_credentials<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send(request, RequestKind::Credentials).await?;
        Ok(response.json().await?)
    }

    /// POST with an empty body and query-string parameters.
    pub(crate) async fn post_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).query(query);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }

    /// POST with an empty body, for endpoints that take everything from
    /// the path.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path));
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).json(body);
        let response = self.send(request, RequestKind::Authenticated).await?;
        Ok(response.json().await?)
    }
}

/// The four service adapters, connected against the configured base URLs.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthApi,
    pub banking: BankingApi,
    pub admin: AdminApi,
    pub audit: AuditApi,
}

impl Services {
    pub fn connect(config: &Config, tokens: TokenStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let client = |base_url: &str| ServiceClient::new(http.clone(), base_url, tokens.clone());

        Ok(Services {
            auth: AuthApi::new(client(&config.services.auth_url)),
            banking: BankingApi::new(client(&config.services.banking_url)),
            admin: AdminApi::new(client(&config.services.admin_url)),
            audit: AuditApi::new(client(&config.services.audit_url)),
        })
    }
}

/// Build a service bundle with every adapter pointed at one base URL.
#[cfg(test)]
pub(crate) fn test_services(base_url: &str, tokens: TokenStore) -> Services {
    let client = || ServiceClient::new(reqwest::Client::new(), base_url, tokens.clone());
    Services {
        auth: AuthApi::new(client()),
        banking: BankingApi::new(client()),
        admin: AdminApi::new(client()),
        audit: AuditApi::new(client()),
    }
}
