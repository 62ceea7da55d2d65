//! Client for the audit service (logs, statistics, compliance reports).

use crate::model::{AuditLog, AuditPage, AuditSearchQuery, AuditStatistics};

use super::{ApiError, ServiceClient};

#[derive(Debug, Clone)]
pub struct AuditApi {
    client: ServiceClient,
}

impl AuditApi {
    pub fn new(client: ServiceClient) -> Self {
        AuditApi { client }
    }

    pub async fn logs(&self, page: u32, size: u32) -> Result<AuditPage, ApiError> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.client.get_query("/api/v1/audit/logs", &query).await
    }

    /// Search the audit trail. Only set filters make it onto the query
    /// string; page and size always do.
    pub async fn search(&self, filters: &AuditSearchQuery) -> Result<AuditPage, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(term) = &filters.search_term {
            query.push(("searchTerm", term.clone()));
        }
        if let Some(entity_type) = &filters.entity_type {
            query.push(("entityType", entity_type.clone()));
        }
        if let Some(action) = filters.action {
            query.push(("action", action.as_str().to_string()));
        }
        if let Some(start) = &filters.start_date {
            query.push(("startDate", start.clone()));
        }
        if let Some(end) = &filters.end_date {
            query.push(("endDate", end.clone()));
        }
        query.push(("page", filters.page.to_string()));
        query.push(("size", filters.size.to_string()));

        self.client
            .get_query("/api/v1/audit/logs/search", &query)
            .await
    }

    /// Most recent audit entries, unpaged.
    pub async fn recent(&self) -> Result<Vec<AuditLog>, ApiError> {
        self.client.get("/api/v1/audit/logs/recent").await
    }

    pub async fn security_logs(&self, page: u32, size: u32) -> Result<AuditPage, ApiError> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.client
            .get_query("/api/v1/audit/logs/security", &query)
            .await
    }

    pub async fn failed_logs(&self, page: u32, size: u32) -> Result<AuditPage, ApiError> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.client
            .get_query("/api/v1/audit/logs/failed", &query)
            .await
    }

    pub async fn statistics(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<AuditStatistics, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start_date {
            query.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            query.push(("endDate", end.to_string()));
        }
        self.client
            .get_query("/api/v1/audit/statistics/summary", &query)
            .await
    }

    /// Export the audit trail for a date window as raw CSV bytes.
    pub async fn export_csv(&self, start_date: &str, end_date: &str) -> Result<Vec<u8>, ApiError> {
        let query = [("startDate", start_date), ("endDate", end_date)];
        self.client
            .get_bytes("/api/v1/audit/export/csv", &query)
            .await
    }

    /// Compliance report for a date window. The service responds with
    /// preformatted plain text.
    pub async fn compliance_report(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<String, ApiError> {
        let query = [("startDate", start_date), ("endDate", end_date)];
        self.client
            .get_text("/api/v1/audit/report/compliance", &query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuditAction;
    use crate::session::TokenStore;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(base_url: &str) -> AuditApi {
        let tokens = TokenStore::in_memory(Some("admin-tok".to_string()));
        AuditApi::new(ServiceClient::new(reqwest::Client::new(), base_url, tokens))
    }

    fn empty_page() -> serde_json::Value {
        serde_json::json!({"content": [], "totalElements": 0, "totalPages": 0})
    }

    #[tokio::test]
    async fn test_logs_sends_page_and_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/audit/logs"))
            .and(query_param("page", "2"))
            .and(query_param("size", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
            .expect(1)
            .mount(&server)
            .await;

        let page = api(&server.uri()).logs(2, 50).await.unwrap();
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_search_omits_unset_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/audit/logs/search"))
            .and(query_param("searchTerm", "blacklist"))
            .and(query_param("action", "UPDATE"))
            .and(query_param_is_missing("entityType"))
            .and(query_param_is_missing("startDate"))
            .and(query_param("page", "0"))
            .and(query_param("size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
            .expect(1)
            .mount(&server)
            .await;

        let filters = AuditSearchQuery {
            search_term: Some("blacklist".to_string()),
            action: Some(AuditAction::Update),
            ..AuditSearchQuery::default()
        };
        api(&server.uri()).search(&filters).await.unwrap();
    }

    #[tokio::test]
    async fn test_export_returns_raw_bytes() {
        let server = MockServer::start().await;
        let csv = "id,action,status\n1,LOGIN,SUCCESS\n";
        Mock::given(method("GET"))
            .and(path("/api/v1/audit/export/csv"))
            .and(query_param("startDate", "2024-03-01T00:00:00.000Z"))
            .and(query_param("endDate", "2024-03-31T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
            .mount(&server)
            .await;

        let bytes = api(&server.uri())
            .export_csv("2024-03-01T00:00:00.000Z", "2024-03-31T00:00:00.000Z")
            .await
            .unwrap();
        assert_eq!(bytes, csv.as_bytes());
    }

    #[tokio::test]
    async fn test_compliance_report_is_plain_text() {
        let server = MockServer::start().await;
        let report = "COMPLIANCE REPORT\n=================\nTotal events: 42\n";
        Mock::given(method("GET"))
            .and(path("/api/v1/audit/report/compliance"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(report, "text/plain"))
            .mount(&server)
            .await;

        let text = api(&server.uri())
            .compliance_report("2024-03-01T00:00:00.000Z", "2024-03-31T00:00:00.000Z")
            .await
            .unwrap();
        assert!(text.contains("Total events: 42"));
    }
}
