//! Linked financial account routes (`/user_accounts/`)

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Credential, CredentialTypes, PatchedCredential};

impl ApiClient {
    /// Providers the backend can link, with the fields each one requires
    pub async fn credential_types(&self) -> Result<CredentialTypes> {
        self.get_json("/api/user_credentials/", "credential_types")
            .await
    }

    /// Submit provider credentials to link a new account
    pub async fn register_credential(&self, body: &CredentialTypes) -> Result<CredentialTypes> {
        self.send_json(
            Method::POST,
            "/api/user_credentials/",
            body,
            "register_credential",
        )
        .await
    }

    /// All linked accounts of the authenticated user
    pub async fn list_accounts(&self) -> Result<Vec<Credential>> {
        self.get_json("/user_accounts/", "list_accounts").await
    }

    pub async fn create_account(&self, body: &Credential) -> Result<Credential> {
        self.send_json(Method::POST, "/user_accounts/", body, "create_account")
            .await
    }

    pub async fn get_account(&self, id: i64) -> Result<Credential> {
        self.get_json(&format!("/user_accounts/{}/", id), "get_account")
            .await
    }

    pub async fn update_account(&self, id: i64, body: &Credential) -> Result<Credential> {
        self.send_json(
            Method::PUT,
            &format!("/user_accounts/{}/", id),
            body,
            "update_account",
        )
        .await
    }

    pub async fn patch_account(&self, id: i64, body: &PatchedCredential) -> Result<Credential> {
        self.send_json(
            Method::PATCH,
            &format!("/user_accounts/{}/", id),
            body,
            "patch_account",
        )
        .await
    }

    /// Unlink an account. Resolves with no payload.
    pub async fn delete_account(&self, id: i64) -> Result<()> {
        self.delete_void(&format!("/user_accounts/{}/", id)).await
    }
}
