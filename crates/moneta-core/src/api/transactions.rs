//! Transaction and recurring-transaction routes

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    PatchedRecurringTransaction, PatchedTransaction, RecurringTransaction, Transaction,
    TransactionNames, TransactionQuery,
};

impl ApiClient {
    /// List transactions, optionally bounded by the date filters in `query`
    pub async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        if query.is_empty() {
            self.get_json("/user_transactions/", "list_transactions")
                .await
        } else {
            self.get_json_query("/user_transactions/", query, "list_transactions")
                .await
        }
    }

    pub async fn create_transaction(&self, body: &Transaction) -> Result<Transaction> {
        self.send_json(Method::POST, "/user_transactions/", body, "create_transaction")
            .await
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.get_json(&format!("/user_transactions/{}/", id), "get_transaction")
            .await
    }

    pub async fn update_transaction(&self, id: i64, body: &Transaction) -> Result<Transaction> {
        self.send_json(
            Method::PUT,
            &format!("/user_transactions/{}/", id),
            body,
            "update_transaction",
        )
        .await
    }

    pub async fn patch_transaction(
        &self,
        id: i64,
        body: &PatchedTransaction,
    ) -> Result<Transaction> {
        self.send_json(
            Method::PATCH,
            &format!("/user_transactions/{}/", id),
            body,
            "patch_transaction",
        )
        .await
    }

    /// Delete a transaction. Resolves with no payload.
    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.delete_void(&format!("/user_transactions/{}/", id))
            .await
    }

    /// Distinct transaction names (autocomplete source)
    pub async fn transaction_names(&self) -> Result<TransactionNames> {
        self.get_json("/user_transactions_names", "transaction_names")
            .await
    }

    pub async fn list_recurring_transactions(&self) -> Result<Vec<RecurringTransaction>> {
        self.get_json("/user_recurring_transactions/", "list_recurring_transactions")
            .await
    }

    pub async fn create_recurring_transaction(
        &self,
        body: &RecurringTransaction,
    ) -> Result<RecurringTransaction> {
        self.send_json(
            Method::POST,
            "/user_recurring_transactions/",
            body,
            "create_recurring_transaction",
        )
        .await
    }

    pub async fn get_recurring_transaction(&self, id: i64) -> Result<RecurringTransaction> {
        self.get_json(
            &format!("/user_recurring_transactions/{}/", id),
            "get_recurring_transaction",
        )
        .await
    }

    pub async fn update_recurring_transaction(
        &self,
        id: i64,
        body: &RecurringTransaction,
    ) -> Result<RecurringTransaction> {
        self.send_json(
            Method::PUT,
            &format!("/user_recurring_transactions/{}/", id),
            body,
            "update_recurring_transaction",
        )
        .await
    }

    pub async fn patch_recurring_transaction(
        &self,
        id: i64,
        body: &PatchedRecurringTransaction,
    ) -> Result<RecurringTransaction> {
        self.send_json(
            Method::PATCH,
            &format!("/user_recurring_transactions/{}/", id),
            body,
            "patch_recurring_transaction",
        )
        .await
    }

    /// Delete a recurring transaction. Resolves with no payload.
    pub async fn delete_recurring_transaction(&self, id: i64) -> Result<()> {
        self.delete_void(&format!("/user_recurring_transactions/{}/", id))
            .await
    }
}
