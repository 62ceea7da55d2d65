//! Transaction records and the request body shared by the money-movement
//! endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Payment,
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Refund => "REFUND",
        }
    }
}

/// A posted transaction. Immutable once created; the client only ever
/// appends newly created ones to what it has fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub balance_after: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub account_id: i64,
    pub reference_number: String,
    #[serde(default)]
    pub from_account: Option<String>,
    #[serde(default)]
    pub to_account: Option<String>,
    pub created_at: String,
}

/// Request body for deposit, withdrawal, and transfer.
/// `destination_account_id` is set for transfers only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: i64,
    pub transaction_type: TransactionType,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_shape() {
        let json = r#"{
            "id": 44,
            "transactionType": "TRANSFER",
            "amount": 200.0,
            "balanceAfter": 800.5,
            "description": "Rent",
            "accountId": 12,
            "referenceNumber": "TXN-20240301-0044",
            "fromAccount": "ACC-0000012",
            "toAccount": "ACC-0000019",
            "createdAt": "2024-03-01T10:15:30"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.to_account.as_deref(), Some("ACC-0000019"));
    }

    #[test]
    fn test_transaction_request_omits_empty_fields() {
        let request = TransactionRequest {
            account_id: 12,
            transaction_type: TransactionType::Deposit,
            amount: 50.0,
            description: None,
            destination_account_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("destinationAccountId"));
        assert!(json.contains(r#""transactionType":"DEPOSIT""#));
    }

    #[test]
    fn test_transfer_request_carries_destination() {
        let request = TransactionRequest {
            account_id: 12,
            transaction_type: TransactionType::Transfer,
            amount: 75.25,
            description: Some("Split bill".to_string()),
            destination_account_id: Some(19),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""destinationAccountId":19"#));
    }
}
