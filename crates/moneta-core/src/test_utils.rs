//! Test utilities for moneta-core
//!
//! This module provides testing infrastructure including a mock backend
//! server that stands in for the real API in development and integration
//! tests. It implements the auth, chat, CRUD, and report routes against
//! in-memory state, with the same Token-header authentication the real
//! backend enforces.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::models::{
    ChatMessage, Credential, MessagePayload, PatchedCredential, PatchedRecurringTransaction,
    PatchedTag, PatchedTransaction, RecurringTransaction, Sender, Tag, TagGoal, TextPayload,
    Transaction,
};

/// Credentials the mock accepts for the seeded user
pub const TEST_EMAIL: &str = "user@example.com";
pub const TEST_PASSWORD: &str = "secret123";

/// Mock backend server for testing and development
pub struct MockApiServer {
    addr: SocketAddr,
    state: MockState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApiServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let state = MockState::seeded();

        let app = Router::new()
            // Auth
            .route("/dj-rest-auth/login/", post(handle_login))
            .route("/dj-rest-auth/logout/", post(handle_logout))
            .route("/dj-rest-auth/registration/", post(handle_register))
            .route(
                "/dj-rest-auth/registration/resend-email/",
                post(handle_detail_ok),
            )
            .route(
                "/dj-rest-auth/registration/verify-email/",
                post(handle_detail_ok),
            )
            .route("/dj-rest-auth/password/change/", post(handle_password_change))
            .route("/dj-rest-auth/password/reset/", post(handle_password_reset))
            .route(
                "/dj-rest-auth/password/reset/confirm/",
                post(handle_detail_ok),
            )
            .route(
                "/dj-rest-auth/user/",
                get(handle_user_details)
                    .put(handle_user_update)
                    .patch(handle_user_update),
            )
            // Chat
            .route("/api/chat/history/", get(handle_chat_history))
            .route("/api/chat/send/", post(handle_chat_send))
            // Accounts
            .route(
                "/user_accounts/",
                get(handle_accounts_list).post(handle_accounts_create),
            )
            .route(
                "/user_accounts/:id/",
                get(handle_accounts_get)
                    .put(handle_accounts_update)
                    .patch(handle_accounts_patch)
                    .delete(handle_accounts_delete),
            )
            .route("/api/user_credentials/", get(handle_credential_types).post(handle_credential_types_post))
            // Tags and goals
            .route("/user_tags/", get(handle_tags_list).post(handle_tags_create))
            .route(
                "/user_tags/:id/",
                get(handle_tags_get)
                    .put(handle_tags_update)
                    .patch(handle_tags_patch)
                    .delete(handle_tags_delete),
            )
            .route("/api/user_goals/", post(handle_goals_create))
            // Transactions
            .route(
                "/user_transactions/",
                get(handle_tx_list).post(handle_tx_create),
            )
            .route(
                "/user_transactions/:id/",
                get(handle_tx_get)
                    .put(handle_tx_update)
                    .patch(handle_tx_patch)
                    .delete(handle_tx_delete),
            )
            .route("/user_transactions_names", get(handle_tx_names))
            .route(
                "/user_recurring_transactions/",
                get(handle_recurring_list).post(handle_recurring_create),
            )
            .route(
                "/user_recurring_transactions/:id/",
                get(handle_recurring_get)
                    .put(handle_recurring_update)
                    .patch(handle_recurring_patch)
                    .delete(handle_recurring_delete),
            )
            // Reports
            .route("/api/month-tracking", get(handle_month_tracking))
            .route("/api/users/", get(handle_user_record))
            .route("/bank_info", get(handle_bank_info))
            .route("/month_category", get(handle_month_category))
            .route("/summery_widgets", get(handle_summary_widgets))
            .route("/total_month_expenses", get(handle_total_month_expenses))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Tokens the server currently honors (issued by login/registration)
    pub fn issued_tokens(&self) -> Vec<String> {
        self.state.lock().tokens.clone()
    }

    /// Number of transactions currently stored
    pub fn transaction_count(&self) -> usize {
        self.state.lock().transactions.len()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// In-memory state
// =============================================================================

#[derive(Clone)]
struct MockState {
    inner: Arc<Mutex<MockStateInner>>,
}

struct MockUser {
    email: String,
    password: String,
    username: String,
    first_name: String,
    last_name: String,
}

struct MockStateInner {
    tokens: Vec<String>,
    users: Vec<MockUser>,
    accounts: Vec<Credential>,
    tags: Vec<Tag>,
    transactions: Vec<Transaction>,
    recurring: Vec<RecurringTransaction>,
    messages: Vec<ChatMessage>,
    next_id: i64,
}

impl MockState {
    /// State with one registered user and no data
    fn seeded() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockStateInner {
                tokens: Vec::new(),
                users: vec![MockUser {
                    email: TEST_EMAIL.to_string(),
                    password: TEST_PASSWORD.to_string(),
                    username: TEST_EMAIL.to_string(),
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                }],
                accounts: Vec::new(),
                tags: Vec::new(),
                transactions: Vec::new(),
                recurring: Vec::new(),
                messages: Vec::new(),
                next_id: 1,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockStateInner> {
        self.inner.lock().unwrap()
    }
}

impl MockStateInner {
    fn issue_token(&mut self) -> String {
        // Deterministic 40-char opaque key, like the real backend's
        let token = format!("tok{:0>37}", self.tokens.len() + 1);
        self.tokens.push(token.clone());
        token
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

type ApiError = (StatusCode, Json<Value>);

fn unauthorized() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Invalid token."})),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Not found."})),
    )
}

/// Reject requests without a currently-issued `Token <key>` header
fn require_auth(state: &MockState, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Token "))
        .map(str::to_string)
        .ok_or_else(unauthorized)?;

    if state.lock().tokens.contains(&token) {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

// =============================================================================
// Auth handlers
// =============================================================================

async fn handle_login(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let password = body["password"].as_str().unwrap_or_default();
    let identity = body["email"]
        .as_str()
        .or_else(|| body["username"].as_str())
        .unwrap_or_default();

    let mut inner = state.lock();
    let matched = inner
        .users
        .iter()
        .any(|u| (u.email == identity || u.username == identity) && u.password == password);
    if !matched {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Unable to log in with provided credentials."]})),
        ));
    }

    let key = inner.issue_token();
    Ok(Json(json!({ "key": key })))
}

async fn handle_logout(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Token "))
        .map(str::to_string)
        .unwrap_or_default();
    state.lock().tokens.retain(|t| *t != token);
    Ok(Json(json!({"detail": "Successfully logged out."})))
}

async fn handle_register(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password1 = body["password1"].as_str().unwrap_or_default();
    let password2 = body["password2"].as_str().unwrap_or_default();

    if password1 != password2 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["The two password fields didn't match."]})),
        ));
    }
    if password1.len() < 8 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"password1": ["This password is too short."]})),
        ));
    }

    let mut inner = state.lock();
    if inner.users.iter().any(|u| u.email == email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"email": ["A user is already registered with this e-mail address."]})),
        ));
    }

    inner.users.push(MockUser {
        email: email.clone(),
        password: password1.to_string(),
        username: body["username"].as_str().unwrap_or(&email).to_string(),
        first_name: body["first_name"].as_str().unwrap_or_default().to_string(),
        last_name: body["last_name"].as_str().unwrap_or_default().to_string(),
    });

    let key = inner.issue_token();
    Ok(Json(json!({ "key": key })))
}

async fn handle_user_details(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let user = inner.users.last().ok_or_else(not_found)?;
    Ok(Json(json!({
        "pk": 1,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
    })))
}

async fn handle_user_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let user = inner.users.last_mut().ok_or_else(not_found)?;
    if let Some(username) = body["username"].as_str() {
        user.username = username.to_string();
    }
    if let Some(first) = body["first_name"].as_str() {
        user.first_name = first.to_string();
    }
    if let Some(last) = body["last_name"].as_str() {
        user.last_name = last.to_string();
    }
    Ok(Json(json!({
        "pk": 1,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
    })))
}

async fn handle_password_change(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({"detail": "New password has been saved."})))
}

async fn handle_password_reset(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({"detail": "Password reset e-mail has been sent."}))
}

async fn handle_detail_ok(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({"detail": "ok"}))
}

// =============================================================================
// Chat handlers
// =============================================================================

async fn handle_chat_history(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(state.lock().messages.clone()))
}

async fn handle_chat_send(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<ChatMessage>, ApiError> {
    require_auth(&state, &headers)?;
    let text = body["text"].as_str().unwrap_or_default().to_string();

    let mut inner = state.lock();
    let user_id = inner.next_id();
    inner.messages.push(ChatMessage {
        id: user_id,
        conversation: 1,
        sender: Sender::User,
        payload: MessagePayload::Text(TextPayload { text: text.clone() }),
        timestamp: Utc::now(),
        status: "sent".to_string(),
    });

    // Chart requests get a chart payload back, like the reporting agent;
    // everything else is echoed as text.
    let payload = if text.to_lowercase().contains("chart") {
        MessagePayload::from_wire(
            "chart",
            json!({"labels": ["Jan", "Feb"], "values": [10.0, 20.0]}),
        )
    } else {
        MessagePayload::Text(TextPayload {
            text: format!("You said: {}", text),
        })
    };

    let reply_id = inner.next_id();
    let reply = ChatMessage {
        id: reply_id,
        conversation: 1,
        sender: Sender::Agent,
        payload,
        timestamp: Utc::now(),
        status: "sent".to_string(),
    };
    inner.messages.push(reply.clone());
    Ok(Json(reply))
}

// =============================================================================
// Account handlers
// =============================================================================

async fn handle_accounts_list(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Credential>>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(state.lock().accounts.clone()))
}

async fn handle_accounts_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<Credential>,
) -> Result<Json<Credential>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    body.id = inner.next_id();
    inner.accounts.push(body.clone());
    Ok(Json(body))
}

async fn handle_accounts_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Credential>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let account = inner
        .accounts
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(account))
}

async fn handle_accounts_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Credential>,
) -> Result<Json<Credential>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let account = inner
        .accounts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(not_found)?;
    body.id = id;
    *account = body.clone();
    Ok(Json(body))
}

async fn handle_accounts_patch(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<PatchedCredential>,
) -> Result<Json<Credential>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let account = inner
        .accounts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(not_found)?;
    if let Some(company) = patch.company {
        account.company = company;
    }
    if let Some(kind) = patch.kind {
        account.kind = kind;
    }
    if let Some(last_scanned) = patch.last_scanned {
        account.last_scanned = Some(last_scanned);
    }
    if let Some(info) = patch.additional_info {
        account.additional_info = Some(info);
    }
    if let Some(balance) = patch.balance {
        account.balance = balance;
    }
    Ok(Json(account.clone()))
}

async fn handle_accounts_delete(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let before = inner.accounts.len();
    inner.accounts.retain(|a| a.id != id);
    if inner.accounts.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_credential_types(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({
        "key": "demo_bank",
        "name": "Demo Bank",
        "fields": [{"id": "username", "label": "Username"}, {"id": "password", "label": "Password"}],
    })))
}

async fn handle_credential_types_post(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(body))
}

// =============================================================================
// Tag handlers
// =============================================================================

async fn handle_tags_list(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Tag>>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(state.lock().tags.clone()))
}

async fn handle_tags_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<Tag>,
) -> Result<Json<Tag>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    body.id = inner.next_id();
    inner.tags.push(body.clone());
    Ok(Json(body))
}

async fn handle_tags_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let tag = inner
        .tags
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(tag))
}

async fn handle_tags_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Tag>,
) -> Result<Json<Tag>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let tag = inner
        .tags
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    body.id = id;
    *tag = body.clone();
    Ok(Json(body))
}

async fn handle_tags_patch(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<PatchedTag>,
) -> Result<Json<Tag>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let tag = inner
        .tags
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    if let Some(key) = patch.key {
        tag.key = Some(key);
    }
    if let Some(name) = patch.name {
        tag.name = name;
    }
    if let Some(expense) = patch.expense {
        tag.expense = Some(expense);
    }
    if let Some(kind) = patch.kind {
        tag.kind = Some(kind);
    }
    if let Some(user) = patch.user {
        tag.user = Some(user);
    }
    Ok(Json(tag.clone()))
}

async fn handle_tags_delete(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let before = inner.tags.len();
    inner.tags.retain(|t| t.id != id);
    if inner.tags.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_goals_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<TagGoal>,
) -> Result<Json<TagGoal>, ApiError> {
    require_auth(&state, &headers)?;
    body.id = state.lock().next_id();
    Ok(Json(body))
}

// =============================================================================
// Transaction handlers
// =============================================================================

async fn handle_tx_list(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    require_auth(&state, &headers)?;

    let parse = |key: &str| -> Option<NaiveDate> {
        params
            .get(key)
            .and_then(|v| v.parse::<NaiveDate>().ok())
    };
    let date = parse("date");
    let gt = parse("date__gt");
    let gte = parse("date__gte");
    let lt = parse("date__lt");
    let lte = parse("date__lte");

    let transactions = state
        .lock()
        .transactions
        .iter()
        .filter(|t| date.map_or(true, |d| t.date == d))
        .filter(|t| gt.map_or(true, |d| t.date > d))
        .filter(|t| gte.map_or(true, |d| t.date >= d))
        .filter(|t| lt.map_or(true, |d| t.date < d))
        .filter(|t| lte.map_or(true, |d| t.date <= d))
        .cloned()
        .collect();
    Ok(Json(transactions))
}

async fn handle_tx_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<Transaction>,
) -> Result<Json<Transaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    body.id = inner.next_id();
    inner.transactions.push(body.clone());
    Ok(Json(body))
}

async fn handle_tx_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let tx = inner
        .transactions
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(tx))
}

async fn handle_tx_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Transaction>,
) -> Result<Json<Transaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let tx = inner
        .transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    body.id = id;
    *tx = body.clone();
    Ok(Json(body))
}

async fn handle_tx_patch(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<PatchedTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let tx = inner
        .transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    if let Some(tag_name) = patch.tag_name {
        tx.tag_name = tag_name;
    }
    if let Some(date) = patch.date {
        tx.date = date;
    }
    if let Some(name) = patch.name {
        tx.name = name;
    }
    if let Some(value) = patch.value {
        tx.value = value;
    }
    if let Some(month) = patch.month {
        tx.month = Some(month);
    }
    if let Some(month_date) = patch.month_date {
        tx.month_date = Some(month_date);
    }
    if let Some(bank) = patch.bank {
        tx.bank = Some(bank);
    }
    if let Some(identifier) = patch.identifier {
        tx.identifier = Some(identifier);
    }
    if let Some(user) = patch.user {
        tx.user = Some(user);
    }
    if let Some(credential) = patch.credential {
        tx.credential = Some(credential);
    }
    if let Some(tag) = patch.tag {
        tx.tag = Some(tag);
    }
    Ok(Json(tx.clone()))
}

async fn handle_tx_delete(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let before = inner.transactions.len();
    inner.transactions.retain(|t| t.id != id);
    if inner.transactions.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_tx_names(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    let names: Vec<String> = state
        .lock()
        .transactions
        .iter()
        .map(|t| t.name.clone())
        .collect();
    Ok(Json(json!({"name": names.join(",")})))
}

// =============================================================================
// Recurring transaction handlers
// =============================================================================

async fn handle_recurring_list(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<RecurringTransaction>>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(state.lock().recurring.clone()))
}

async fn handle_recurring_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<RecurringTransaction>,
) -> Result<Json<RecurringTransaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    body.id = inner.next_id();
    inner.recurring.push(body.clone());
    Ok(Json(body))
}

async fn handle_recurring_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<RecurringTransaction>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let recurring = inner
        .recurring
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(recurring))
}

async fn handle_recurring_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<RecurringTransaction>,
) -> Result<Json<RecurringTransaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let recurring = inner
        .recurring
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(not_found)?;
    body.id = id;
    *recurring = body.clone();
    Ok(Json(body))
}

async fn handle_recurring_patch(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<PatchedRecurringTransaction>,
) -> Result<Json<RecurringTransaction>, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let recurring = inner
        .recurring
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(not_found)?;
    if let Some(name) = patch.name {
        recurring.name = name;
    }
    if let Some(date) = patch.date {
        recurring.date = date;
    }
    if let Some(value) = patch.value {
        recurring.value = value;
    }
    if let Some(user) = patch.user {
        recurring.user = Some(user);
    }
    if let Some(credential) = patch.credential {
        recurring.credential = Some(credential);
    }
    Ok(Json(recurring.clone()))
}

async fn handle_recurring_delete(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&state, &headers)?;
    let mut inner = state.lock();
    let before = inner.recurring.len();
    inner.recurring.retain(|r| r.id != id);
    if inner.recurring.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Report handlers (canned payloads)
// =============================================================================

async fn handle_month_tracking(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({"text": "Tracking 2 months"})))
}

async fn handle_user_record(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    let inner = state.lock();
    let user = inner.users.last().ok_or_else(not_found)?;
    Ok(Json(json!({
        "id": 1,
        "password": "!hashed!",
        "username": user.username,
        "last_login": null,
        "email": user.email,
        "is_staff": false,
        "is_active": true,
        "date_joined": "2024-01-01T00:00:00Z",
        "groups": [],
        "user_permissions": [],
    })))
}

async fn handle_bank_info(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({"key": "balance", "value": 1024.5})))
}

async fn handle_month_category(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({
        "category_id": 1,
        "category": "Groceries",
        "key": "groceries",
        "value": 250.0,
        "goal": 300,
        "type": "CONTINUOUS",
        "percent": 83.3,
        "color": "#2753a7",
    })))
}

async fn handle_summary_widgets(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({
        "graphs": {},
        "average_expenses": 1200.0,
        "average_income": 2400.0,
        "number_of_months": 6,
        "average_bank_expenses": 900.0,
    })))
}

async fn handle_total_month_expenses(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_auth(&state, &headers)?;
    Ok(Json(json!({
        "moving_average": 1100.0,
        "value": 950.0,
        "text": "On track",
        "color": "green",
    })))
}
