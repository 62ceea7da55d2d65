//! Client for the admin service (client roster management).

use crate::model::{AdminClient, BlacklistRequest, ClientStatistics, ClientStatus,
    UpdateStatusRequest};

use super::{ApiError, ServiceClient};

#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ServiceClient,
}

impl AdminApi {
    pub fn new(client: ServiceClient) -> Self {
        AdminApi { client }
    }

    pub async fn clients(&self) -> Result<Vec<AdminClient>, ApiError> {
        self.client.get("/api/v1/admin/clients").await
    }

    pub async fn client(&self, client_id: i64) -> Result<AdminClient, ApiError> {
        self.client
            .get(&format!("/api/v1/admin/clients/{}", client_id))
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<AdminClient>, ApiError> {
        self.client
            .get_query("/api/v1/admin/clients/search", &[("q", query)])
            .await
    }

    /// Blacklist a client. The reason is recorded on the client record and
    /// surfaced to support staff.
    pub async fn blacklist(&self, client_id: i64, reason: &str) -> Result<AdminClient, ApiError> {
        let request = BlacklistRequest {
            reason: reason.to_string(),
        };
        self.client
            .post(
                &format!("/api/v1/admin/clients/{}/blacklist", client_id),
                &request,
            )
            .await
    }

    pub async fn unblacklist(&self, client_id: i64) -> Result<AdminClient, ApiError> {
        self.client
            .post_empty(&format!("/api/v1/admin/clients/{}/unblacklist", client_id))
            .await
    }

    pub async fn set_status(
        &self,
        client_id: i64,
        status: ClientStatus,
    ) -> Result<AdminClient, ApiError> {
        let request = UpdateStatusRequest { status };
        self.client
            .put(
                &format!("/api/v1/admin/clients/{}/status", client_id),
                &request,
            )
            .await
    }

    pub async fn statistics(&self) -> Result<ClientStatistics, ApiError> {
        self.client.get("/api/v1/admin/statistics/clients").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenStore;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(base_url: &str) -> AdminApi {
        let tokens = TokenStore::in_memory(Some("admin-tok".to_string()));
        AdminApi::new(ServiceClient::new(reqwest::Client::new(), base_url, tokens))
    }

    #[tokio::test]
    async fn test_search_sends_query_term() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/admin/clients/search"))
            .and(query_param("q", "jane"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 4,
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "status": "ACTIVE",
                "blacklisted": false,
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let clients = api(&server.uri()).search("jane").await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].first_name, "Jane");
    }

    #[tokio::test]
    async fn test_blacklist_posts_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/admin/clients/4/blacklist"))
            .and(body_json(serde_json::json!({"reason": "chargeback fraud"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 4,
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "status": "SUSPENDED",
                "blacklisted": true,
                "blacklistReason": "chargeback fraud",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = api(&server.uri())
            .blacklist(4, "chargeback fraud")
            .await
            .unwrap();
        assert!(client.blacklisted);
        assert_eq!(client.blacklist_reason.as_deref(), Some("chargeback fraud"));
    }

    #[tokio::test]
    async fn test_set_status_puts_enum_value() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/admin/clients/4/status"))
            .and(body_json(serde_json::json!({"status": "INACTIVE"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 4,
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "status": "INACTIVE",
                "blacklisted": false,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = api(&server.uri())
            .set_status(4, ClientStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(client.status, "INACTIVE");
    }

    #[tokio::test]
    async fn test_statistics_parses_all_counters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/admin/statistics/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalClients": 120,
                "activeClients": 100,
                "blacklistedClients": 5,
                "inactiveClients": 12,
                "suspendedClients": 3,
            })))
            .mount(&server)
            .await;

        let stats = api(&server.uri()).statistics().await.unwrap();
        assert_eq!(stats.total_clients, 120);
        assert_eq!(stats.suspended_clients, 3);
    }
}
