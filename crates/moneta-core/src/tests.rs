//! Cross-module client tests against the mock backend
//!
//! These exercise the full flows: login -> token persisted -> authenticated
//! calls carry the Token header automatically -> logout purges local state.

use chrono::NaiveDate;
use serde_json::Map;
use tempfile::TempDir;

use crate::auth::AuthService;
use crate::chat::ChatService;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    MessagePayload, PatchedCredential, PatchedTag, Credential, RecurringTransaction, Sender, Tag,
    TagGoal, TagKind, Transaction, TransactionQuery,
};
use crate::test_utils::{MockApiServer, TEST_EMAIL, TEST_PASSWORD};
use crate::token_store::TokenStore;

fn auth_service(base_url: &str) -> (TempDir, AuthService) {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::open(dir.path()).unwrap();
    (dir, AuthService::new(ApiClient::new(base_url), store))
}

fn sample_transaction(name: &str, date: NaiveDate, value: f64) -> Transaction {
    Transaction {
        id: 0,
        tag_name: String::new(),
        date,
        name: name.to_string(),
        value,
        month: None,
        month_date: None,
        bank: Some(false),
        identifier: None,
        user: None,
        credential: None,
        tag: None,
        extra: Map::new(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ========== Auth Flow Tests ==========

#[tokio::test]
async fn test_login_stores_token_and_returns_user() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    assert_eq!(session.user().email, TEST_EMAIL);
    assert_eq!(session.token().len(), 40);

    // Token persisted with the default horizon
    assert_eq!(
        auth.store().get_token().unwrap(),
        Some(session.token().to_string())
    );
}

#[tokio::test]
async fn test_login_failure_is_normalized_and_stores_nothing() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let err = auth.login(TEST_EMAIL, "wrong-password").await.unwrap_err();
    assert_eq!(err.message, "Unable to log in with provided credentials.");
    assert_eq!(err.status, Some(400));
    assert_eq!(auth.store().get_token().unwrap(), None);
}

#[tokio::test]
async fn test_register_creates_session_with_split_name() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let session = auth
        .register("ada@example.com", "longenoughpassword", "Ada Lovelace")
        .await
        .unwrap();
    assert_eq!(session.user().email, "ada@example.com");
    assert_eq!(session.user().first_name.as_deref(), Some("Ada"));
    assert_eq!(session.user().last_name.as_deref(), Some("Lovelace"));
    assert!(auth.store().is_valid());
}

#[tokio::test]
async fn test_register_duplicate_email_surfaces_field_error() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let err = auth
        .register(TEST_EMAIL, "longenoughpassword", "Test User")
        .await
        .unwrap_err();
    assert_eq!(
        err.message,
        "A user is already registered with this e-mail address."
    );
    assert_eq!(auth.store().get_token().unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_token_even_when_backend_unreachable() {
    // Unroutable backend: the logout network call must fail, the local
    // purge must still happen.
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::open(dir.path()).unwrap();
    store.set_token("abc123").unwrap();

    let auth = AuthService::new(ApiClient::new("http://127.0.0.1:1"), store);
    auth.logout().await.unwrap();
    assert_eq!(auth.store().get_token().unwrap(), None);
}

#[tokio::test]
async fn test_logout_invalidates_backend_session() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    assert_eq!(server.issued_tokens().len(), 1);

    auth.logout().await.unwrap();
    assert!(server.issued_tokens().is_empty());
    assert_eq!(auth.store().get_token().unwrap(), None);
}

#[tokio::test]
async fn test_current_user_without_token_makes_no_network_call() {
    // The base URL is unroutable: any network attempt would surface as an
    // error, so Ok(None) proves the store short-circuits.
    let (_dir, auth) = auth_service("http://127.0.0.1:1");
    let restored = auth.current_user().await.unwrap();
    assert!(restored.is_none());
}

#[tokio::test]
async fn test_current_user_purges_rejected_token() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    // A token the backend never issued -> 401 -> clean logged-out state
    auth.store().set_token("tok0000000000000000000000000000000bogus").unwrap();
    let restored = auth.current_user().await.unwrap();
    assert!(restored.is_none());
    assert_eq!(auth.store().get_token().unwrap(), None);
}

#[tokio::test]
async fn test_current_user_restores_session_from_store() {
    let server = MockApiServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let store = TokenStore::open(dir.path()).unwrap();
        let auth = AuthService::new(ApiClient::new(&server.url()), store);
        auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    }

    // A fresh service over the same store picks the session back up
    let store = TokenStore::open(dir.path()).unwrap();
    let auth = AuthService::new(ApiClient::new(&server.url()), store);
    let session = auth.current_user().await.unwrap().unwrap();
    assert_eq!(session.user().email, TEST_EMAIL);
}

#[tokio::test]
async fn test_change_password() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    let detail = auth
        .change_password(&session, "brand-new-password")
        .await
        .unwrap();
    assert_eq!(detail, "New password has been saved.");
}

// ========== Chat Tests ==========

#[tokio::test]
async fn test_send_message_attaches_token_automatically() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());

    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();

    // The mock rejects chat calls without a valid Token header, so a reply
    // proves the session client attached it without any caller involvement.
    let chat = ChatService::new(session.client().clone());
    let reply = chat.send_message("hello").await.unwrap();
    assert_eq!(reply.sender, Sender::Agent);
    assert_eq!(reply.payload.as_text(), Some("You said: hello"));
}

#[tokio::test]
async fn test_chat_chart_reply_decodes_as_chart_payload() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());
    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();

    let chat = ChatService::new(session.client().clone());
    let reply = chat.send_message("show me a chart").await.unwrap();
    match reply.payload {
        MessagePayload::Chart(chart) => {
            assert_eq!(chart.labels.unwrap().len(), 2);
            assert_eq!(chart.values.unwrap().len(), 2);
        }
        other => panic!("expected chart payload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_history_includes_both_sides() {
    let server = MockApiServer::start().await;
    let (_dir, auth) = auth_service(&server.url());
    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();

    let chat = ChatService::new(session.client().clone());
    chat.send_message("hello").await.unwrap();

    let history = chat.fetch_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].sender, Sender::User);
    assert_eq!(history[1].sender, Sender::Agent);
}

#[tokio::test]
async fn test_unauthenticated_chat_is_rejected() {
    let server = MockApiServer::start().await;
    let client = ApiClient::new(&server.url());

    let chat = ChatService::new(client);
    let err = chat.fetch_history().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

// ========== CRUD Tests ==========

async fn login_client(server: &MockApiServer) -> (TempDir, ApiClient) {
    let (dir, auth) = auth_service(&server.url());
    let session = auth.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    (dir, session.client().clone())
}

#[tokio::test]
async fn test_account_crud() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let created = client
        .create_account(&Credential {
            id: 0,
            company: "Demo Bank".to_string(),
            kind: "checking".to_string(),
            last_scanned: None,
            additional_info: None,
            balance: "1024.50".to_string(),
            extra: Map::new(),
        })
        .await
        .unwrap();
    assert!(created.id > 0);

    let listed = client.list_accounts().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company, "Demo Bank");

    let patched = client
        .patch_account(
            created.id,
            &PatchedCredential {
                balance: Some("2048.00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.balance, "2048.00");
    assert_eq!(patched.company, "Demo Bank");

    // Void delete resolves with no payload
    client.delete_account(created.id).await.unwrap();
    assert!(client.list_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_crud_and_goal() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let created = client
        .create_tag(&Tag {
            id: 0,
            key: None,
            name: "Rent".to_string(),
            expense: Some(true),
            kind: Some(TagKind::MonthlyFixed),
            user: None,
            extra: Map::new(),
        })
        .await
        .unwrap();
    assert_eq!(created.kind, Some(TagKind::MonthlyFixed));

    let renamed = client
        .patch_tag(
            created.id,
            &PatchedTag {
                name: Some("Housing".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Housing");
    assert_eq!(renamed.kind, Some(TagKind::MonthlyFixed));

    let goal = client
        .create_tag_goal(&TagGoal {
            id: 0,
            value: 500.0,
            user: None,
            tag: Some(created.id),
            extra: Map::new(),
        })
        .await
        .unwrap();
    assert!(goal.id > 0);
    assert_eq!(goal.tag, Some(created.id));

    client.delete_tag(created.id).await.unwrap();
    assert!(client.list_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transaction_date_filters() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    for (name, day) in [("early", 5), ("middle", 15), ("late", 25)] {
        client
            .create_transaction(&sample_transaction(name, date(2024, 6, day), -10.0))
            .await
            .unwrap();
    }

    let all = client
        .list_transactions(&TransactionQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let windowed = client
        .list_transactions(&TransactionQuery::between(
            date(2024, 6, 10),
            date(2024, 6, 20),
        ))
        .await
        .unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].name, "middle");

    let upper_only = client
        .list_transactions(&TransactionQuery {
            date_lt: Some(date(2024, 6, 15)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(upper_only.len(), 1);
    assert_eq!(upper_only[0].name, "early");
}

#[tokio::test]
async fn test_transaction_update_and_delete() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let created = client
        .create_transaction(&sample_transaction("Groceries", date(2024, 6, 1), -42.0))
        .await
        .unwrap();

    let mut replacement = created.clone();
    replacement.value = -45.5;
    let updated = client
        .update_transaction(created.id, &replacement)
        .await
        .unwrap();
    assert_eq!(updated.value, -45.5);

    client.delete_transaction(created.id).await.unwrap();
    assert_eq!(server.transaction_count(), 0);
}

#[tokio::test]
async fn test_recurring_transaction_crud() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let created = client
        .create_recurring_transaction(&RecurringTransaction {
            id: 0,
            name: "Rent".to_string(),
            date: date(2024, 6, 1),
            value: -1200.0,
            user: None,
            credential: None,
            extra: Map::new(),
        })
        .await
        .unwrap();
    assert!(created.id > 0);

    let listed = client.list_recurring_transactions().await.unwrap();
    assert_eq!(listed.len(), 1);

    client
        .delete_recurring_transaction(created.id)
        .await
        .unwrap();
    assert!(client
        .list_recurring_transactions()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_profile_patch_only_sends_populated_fields() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let updated = client
        .patch_user_details(&crate::models::PatchedUserDetails {
            first_name: Some("Grace".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.first_name.as_deref(), Some("Grace"));
    // Untouched fields keep their values
    assert_eq!(updated.email, TEST_EMAIL);
}

#[tokio::test]
async fn test_credential_types_and_email_flows() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let types = client.credential_types().await.unwrap();
    assert_eq!(types.key, "demo_bank");
    assert_eq!(types.fields.len(), 2);

    let detail = client
        .verify_email(&crate::models::VerifyEmailRequest {
            key: "verification-key".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(detail.detail, "ok");

    let detail = client
        .resend_verification_email(&crate::models::ResendVerificationRequest {
            email: TEST_EMAIL.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(detail.detail, "ok");
}

#[tokio::test]
async fn test_transaction_names() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    client
        .create_transaction(&sample_transaction("Coffee", date(2024, 6, 1), -4.5))
        .await
        .unwrap();

    let names = client.transaction_names().await.unwrap();
    assert_eq!(names.name, "Coffee");
}

// ========== Report & Error Tests ==========

#[tokio::test]
async fn test_report_endpoints_decode() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let tracking = client.month_tracking().await.unwrap();
    assert!(!tracking.text.is_empty());

    let widgets = client.summary_widgets().await.unwrap();
    assert_eq!(widgets.number_of_months, 6);

    let totals = client.total_month_expenses().await.unwrap();
    assert_eq!(totals.text, "On track");

    let bank = client.bank_info().await.unwrap();
    assert_eq!(bank.key, "balance");

    let category = client.month_category().await.unwrap();
    assert_eq!(category.category, "Groceries");

    let record = client.user_record().await.unwrap();
    assert_eq!(record.email.as_deref(), Some(TEST_EMAIL));
    assert_eq!(record.is_active, Some(true));
}

#[tokio::test]
async fn test_http_error_preserves_status_and_body() {
    let server = MockApiServer::start().await;
    let (_dir, client) = login_client(&server).await;

    let err = client.get_tag(9999).await.unwrap_err();
    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body["detail"], "Not found.");
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthenticated_crud_is_rejected() {
    let server = MockApiServer::start().await;
    let client = ApiClient::new(&server.url());

    let err = client.list_tags().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}
