//! Audit trail records from the audit service.

use serde::{Deserialize, Serialize};

/// Action recorded on an audit entry. The audit service tracks more
/// actions than the viewer distinguishes; anything outside this set
/// folds into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Read,
    Login,
    Logout,
    Transfer,
    Withdrawal,
    Deposit,
    #[serde(other)]
    #[value(skip)]
    Other,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Read => "READ",
            AuditAction::Login => "LOGIN",
            AuditAction::Logout => "LOGOUT",
            AuditAction::Transfer => "TRANSFER",
            AuditAction::Withdrawal => "WITHDRAWAL",
            AuditAction::Deposit => "DEPOSIT",
            AuditAction::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub client_id: Option<i64>,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    pub action: AuditAction,
    #[serde(default)]
    pub action_details: Option<String>,
    #[serde(default)]
    pub old_values: Option<String>,
    #[serde(default)]
    pub new_values: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub failure_reason: Option<String>,
    pub created_at: String,
}

/// One page of audit results. The service pages from zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditPage {
    pub content: Vec<AuditLog>,
    pub total_elements: i64,
    pub total_pages: i64,
}

/// Aggregate event counts over a reporting window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStatistics {
    pub total_events: i64,
    pub security_events: i64,
    pub failed_events: i64,
    pub success_rate: f64,
    pub start_date: String,
    pub end_date: String,
    pub generated_at: String,
}

/// Filters for the audit search endpoint. Unset fields are omitted from
/// the query string.
#[derive(Debug, Clone)]
pub struct AuditSearchQuery {
    pub search_term: Option<String>,
    pub entity_type: Option<String>,
    pub action: Option<AuditAction>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl Default for AuditSearchQuery {
    fn default() -> Self {
        AuditSearchQuery {
            search_term: None,
            entity_type: None,
            action: None,
            start_date: None,
            end_date: None,
            page: 0,
            size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_minimal_fields() {
        let json = r#"{
            "id": 991,
            "userEmail": "admin@example.com",
            "userRole": "ADMIN",
            "entityType": "CLIENT",
            "entityId": 4,
            "action": "UPDATE",
            "actionDetails": "Client blacklisted",
            "status": "SUCCESS",
            "createdAt": "2024-03-02T11:00:00"
        }"#;
        let log: AuditLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.action, AuditAction::Update);
        assert_eq!(log.user_id, None);
        assert_eq!(log.failure_reason, None);
    }

    #[test]
    fn test_unknown_action_folds_to_other() {
        let action: AuditAction = serde_json::from_str(r#""BLACKLIST_CLIENT""#).unwrap();
        assert_eq!(action, AuditAction::Other);
    }

    #[test]
    fn test_audit_page_envelope_ignores_extra_fields() {
        let json = r#"{
            "content": [],
            "totalElements": 0,
            "totalPages": 0,
            "number": 0,
            "size": 20,
            "first": true,
            "last": true
        }"#;
        let page: AuditPage = serde_json::from_str(json).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
