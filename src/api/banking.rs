//! Client for the banking service (accounts and transactions).

use crate::model::{Account, AccountType, Transaction, TransactionRequest, TransactionType};

use super::{ApiError, ServiceClient};

#[derive(Debug, Clone)]
pub struct BankingApi {
    client: ServiceClient,
}

impl BankingApi {
    pub fn new(client: ServiceClient) -> Self {
        BankingApi { client }
    }

    pub async fn accounts_for_client(&self, client_id: i64) -> Result<Vec<Account>, ApiError> {
        self.client
            .get(&format!("/api/v1/accounts/client/{}", client_id))
            .await
    }

    /// Current balance of one account. The service returns a bare JSON
    /// number, not an object.
    pub async fn account_balance(&self, account_id: i64) -> Result<f64, ApiError> {
        self.client
            .get(&format!("/api/v1/accounts/{}/balance", account_id))
            .await
    }

    /// Open a new account for a client. The service takes both parameters
    /// on the query string with an empty body.
    pub async fn create_account(
        &self,
        client_id: i64,
        account_type: AccountType,
    ) -> Result<Account, ApiError> {
        let query = [
            ("clientId", client_id.to_string()),
            ("accountType", account_type.as_str().to_string()),
        ];
        self.client.post_query("/api/v1/accounts", &query).await
    }

    /// Whether the account's owner is currently allowed to transact.
    /// Returns a bare JSON boolean.
    pub async fn can_transact(&self, account_id: i64) -> Result<bool, ApiError> {
        self.client
            .get(&format!("/api/v1/accounts/{}/can-transact", account_id))
            .await
    }

    pub async fn deposit(
        &self,
        account_id: i64,
        amount: f64,
        description: Option<String>,
    ) -> Result<Transaction, ApiError> {
        let request = TransactionRequest {
            account_id,
            transaction_type: TransactionType::Deposit,
            amount,
            description,
            destination_account_id: None,
        };
        self.client
            .post("/api/v1/transactions/deposit", &request)
            .await
    }

    pub async fn withdraw(
        &self,
        account_id: i64,
        amount: f64,
        description: Option<String>,
    ) -> Result<Transaction, ApiError> {
        let request = TransactionRequest {
            account_id,
            transaction_type: TransactionType::Withdrawal,
            amount,
            description,
            destination_account_id: None,
        };
        self.client
            .post("/api/v1/transactions/withdraw", &request)
            .await
    }

    pub async fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: f64,
        description: Option<String>,
    ) -> Result<Transaction, ApiError> {
        let request = TransactionRequest {
            account_id: from_account_id,
            transaction_type: TransactionType::Transfer,
            amount,
            description,
            destination_account_id: Some(to_account_id),
        };
        self.client
            .post("/api/v1/transactions/transfer", &request)
            .await
    }

    pub async fn transactions_for_account(
        &self,
        account_id: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.client
            .get(&format!("/api/v1/transactions/account/{}", account_id))
            .await
    }

    pub async fn transactions_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.client
            .get(&format!("/api/v1/transactions/client/{}", client_id))
            .await
    }

    pub async fn transaction(&self, transaction_id: i64) -> Result<Transaction, ApiError> {
        self.client
            .get(&format!("/api/v1/transactions/{}", transaction_id))
            .await
    }
}
