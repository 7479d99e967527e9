//! Domain models for Moneta
//!
//! One type per backend schema. The serde derives are the runtime schema
//! layer: a required field is a plain type, a nullable field is `Option`
//! (explicit `null` admitted), and an optional field is `Option` with
//! `#[serde(default, skip_serializing_if = "Option::is_none")]` (may be
//! absent entirely). `Patched*` types are all-`Option` partial views used
//! only for PATCH bodies and never enforce required fields.
//!
//! Entities carry a flattened `extra` map so undeclared backend fields
//! survive a decode/encode round trip unchanged (passthrough).

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// =============================================================================
// Auth schemas
// =============================================================================

/// Full user record as stored by the backend
///
/// Only the admin user endpoint returns this shape; the session flows use
/// the trimmed [`UserDetails`] view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Write-only on the backend; reads return the hashed form.
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_permissions: Option<Vec<i64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Profile view returned by the session user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    pub pk: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial profile update (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchedUserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Session token returned by login and registration
///
/// The key is opaque (40 chars max, non-JWT); it carries no embedded expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub key: String,
}

/// Login body: the backend accepts username or email plus password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// Registration body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub password1: String,
    pub password2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub new_password1: String,
    pub new_password2: String,
    pub uid: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub key: String,
}

/// Generic `{"detail": "..."}` acknowledgement used by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDetail {
    pub detail: String,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

/// Validate a username against the backend's pattern (`^[\w.@+-]+$`)
///
/// Checked client-side before registration and profile updates so a bad
/// value fails fast instead of round-tripping as a 400.
pub fn validate_username(username: &str) -> Result<()> {
    let re = USERNAME_RE.get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("static pattern"));
    if username.is_empty() || username.len() > 150 || !re.is_match(username) {
        return Err(Error::InvalidData(format!(
            "Invalid username '{}': letters, digits and @/./+/-/_ only (150 chars max)",
            username
        )));
    }
    Ok(())
}

// =============================================================================
// Chat schemas
// =============================================================================

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

impl std::str::FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            _ => Err(format!("Unknown sender: {}", s)),
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message in a conversation (append-only on the backend)
///
/// On the wire the payload is a free JSON value tagged by a sibling
/// `content_type` string; here the two are fused into [`MessagePayload`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawChatMessage", into = "RawChatMessage")]
pub struct ChatMessage {
    pub id: i64,
    pub conversation: i64,
    pub sender: Sender,
    pub payload: MessagePayload,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

/// Wire shape of a message: sibling `content_type` + untyped `payload`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawChatMessage {
    id: i64,
    conversation: i64,
    sender: Sender,
    content_type: String,
    #[serde(default)]
    payload: Value,
    timestamp: DateTime<Utc>,
    status: String,
}

impl From<RawChatMessage> for ChatMessage {
    fn from(raw: RawChatMessage) -> Self {
        ChatMessage {
            id: raw.id,
            conversation: raw.conversation,
            sender: raw.sender,
            payload: MessagePayload::from_wire(&raw.content_type, raw.payload),
            timestamp: raw.timestamp,
            status: raw.status,
        }
    }
}

impl From<ChatMessage> for RawChatMessage {
    fn from(msg: ChatMessage) -> Self {
        let (content_type, payload) = msg.payload.to_wire();
        RawChatMessage {
            id: msg.id,
            conversation: msg.conversation,
            sender: msg.sender,
            content_type,
            payload,
            timestamp: msg.timestamp,
            status: msg.status,
        }
    }
}

/// Typed chat payload, one variant per known content type
///
/// A content type the client does not know, or a known type whose payload
/// does not match its shape, degrades to `Other` with the original value
/// preserved rather than failing the whole message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    Text(TextPayload),
    Image(ImagePayload),
    Buttons(ButtonsPayload),
    Chart(ChartPayload),
    Form(FormPayload),
    Other { content_type: String, payload: Value },
}

impl MessagePayload {
    /// The wire `content_type` tag for this payload
    pub fn content_type(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Buttons(_) => "buttons",
            Self::Chart(_) => "chart",
            Self::Form(_) => "form",
            Self::Other { content_type, .. } => content_type,
        }
    }

    /// Plain text of a `Text` payload, if that is what this is
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(&t.text),
            _ => None,
        }
    }

    pub(crate) fn from_wire(content_type: &str, payload: Value) -> Self {
        fn parse<T: DeserializeOwned>(payload: &Value) -> Option<T> {
            serde_json::from_value(payload.clone()).ok()
        }

        let known = match content_type {
            "text" => parse::<TextPayload>(&payload).map(Self::Text),
            "image" => parse::<ImagePayload>(&payload).map(Self::Image),
            "buttons" => parse::<ButtonsPayload>(&payload).map(Self::Buttons),
            "chart" => parse::<ChartPayload>(&payload).map(Self::Chart),
            "form" => parse::<FormPayload>(&payload).map(Self::Form),
            _ => None,
        };

        known.unwrap_or_else(|| Self::Other {
            content_type: content_type.to_string(),
            payload,
        })
    }

    pub(crate) fn to_wire(&self) -> (String, Value) {
        // Serializing these plain data types cannot fail; Null is the
        // defensive floor, not an expected outcome.
        let value = |v: std::result::Result<Value, serde_json::Error>| v.unwrap_or(Value::Null);
        match self {
            Self::Text(p) => ("text".to_string(), value(serde_json::to_value(p))),
            Self::Image(p) => ("image".to_string(), value(serde_json::to_value(p))),
            Self::Buttons(p) => ("buttons".to_string(), value(serde_json::to_value(p))),
            Self::Chart(p) => ("chart".to_string(), value(serde_json::to_value(p))),
            Self::Form(p) => ("form".to_string(), value(serde_json::to_value(p))),
            Self::Other {
                content_type,
                payload,
            } => (content_type.clone(), payload.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
}

/// Image payload; the agent emits either a direct `url` or an inline
/// base64 `chart_url` data URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
}

/// Quick-reply buttons offered by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonsPayload {
    pub buttons: Vec<String>,
}

/// Chart payload: either inline labels/values series or a pre-rendered
/// `chart_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
}

/// Form the agent asks the user to fill in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for sending a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSendRequest {
    pub text: String,
}

// =============================================================================
// Finance schemas
// =============================================================================

/// A linked bank/financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: i64,
    pub company: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<String>,
    /// Written by external account scanners; no stable shape exists, so the
    /// value stays opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    /// String-encoded decimal, exactly as the backend stores it
    pub balance: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial account update (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchedCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

/// Descriptor for a linkable account provider (key, display name, and the
/// fields its connection form needs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialTypes {
    pub key: String,
    pub name: String,
    pub fields: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tag cadence classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKind {
    #[serde(rename = "MONTHLY FIXED")]
    MonthlyFixed,
    #[serde(rename = "PERIODIC")]
    Periodic,
    #[serde(rename = "CONTINUOUS")]
    Continuous,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyFixed => "MONTHLY FIXED",
            Self::Periodic => "PERIODIC",
            Self::Continuous => "CONTINUOUS",
        }
    }
}

impl std::str::FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MONTHLY FIXED" | "MONTHLY_FIXED" | "FIXED" => Ok(Self::MonthlyFixed),
            "PERIODIC" => Ok(Self::Periodic),
            "CONTINUOUS" => Ok(Self::Continuous),
            _ => Err(format!("Unknown tag type: {}", s)),
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending category tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TagKind>,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial tag update (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchedTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TagKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<i64>,
}

/// Monthly spending goal attached to a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGoal {
    pub id: i64,
    pub value: f64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub tag: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub tag_name: String,
    pub date: NaiveDate,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub month_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<bool>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub credential: Option<i64>,
    #[serde(default)]
    pub tag: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial transaction update (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchedTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

/// Date-range filter for the transaction list endpoint
///
/// Every field is optional; only populated bounds are appended to the
/// query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "date__gt", skip_serializing_if = "Option::is_none")]
    pub date_gt: Option<NaiveDate>,
    #[serde(rename = "date__gte", skip_serializing_if = "Option::is_none")]
    pub date_gte: Option<NaiveDate>,
    #[serde(rename = "date__lt", skip_serializing_if = "Option::is_none")]
    pub date_lt: Option<NaiveDate>,
    #[serde(rename = "date__lte", skip_serializing_if = "Option::is_none")]
    pub date_lte: Option<NaiveDate>,
}

impl TransactionQuery {
    /// Inclusive [from, to] date window
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            date_gte: Some(from),
            date_lte: Some(to),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.date_gt.is_none()
            && self.date_gte.is_none()
            && self.date_lt.is_none()
            && self.date_lte.is_none()
    }
}

/// Distinct transaction names (autocomplete source)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionNames {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recurring transaction template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub credential: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial recurring-transaction update (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchedRecurringTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<i64>,
}

// =============================================================================
// Report schemas (read-only)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTracking {
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCategory {
    pub category_id: i64,
    pub category: String,
    pub key: String,
    pub value: f64,
    pub goal: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub percent: f64,
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryWidgets {
    pub graphs: Map<String, Value>,
    pub average_expenses: f64,
    pub average_income: f64,
    pub number_of_months: i64,
    pub average_bank_expenses: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalMonthExpenses {
    pub moving_average: f64,
    pub value: f64,
    pub text: String,
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankInfo {
    pub key: String,
    pub value: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_payload_text() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "id": 1,
            "conversation": 7,
            "sender": "user",
            "content_type": "text",
            "payload": {"text": "hello"},
            "timestamp": "2024-05-01T10:00:00Z",
            "status": "sent"
        }))
        .unwrap();

        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.payload.as_text(), Some("hello"));
        assert_eq!(msg.payload.content_type(), "text");
    }

    #[test]
    fn test_message_payload_buttons_and_chart() {
        let buttons = MessagePayload::from_wire("buttons", json!({"buttons": ["Yes", "No"]}));
        assert_eq!(
            buttons,
            MessagePayload::Buttons(ButtonsPayload {
                buttons: vec!["Yes".to_string(), "No".to_string()]
            })
        );

        let chart = MessagePayload::from_wire(
            "chart",
            json!({"labels": ["Jan", "Feb"], "values": [10.0, 20.0]}),
        );
        match chart {
            MessagePayload::Chart(c) => {
                assert_eq!(c.labels.unwrap(), vec!["Jan", "Feb"]);
                assert_eq!(c.values.unwrap(), vec![10.0, 20.0]);
                assert!(c.chart_url.is_none());
            }
            other => panic!("expected chart payload, got {:?}", other),
        }
    }

    #[test]
    fn test_message_payload_unknown_content_type_is_preserved() {
        let payload = json!({"widget": "spinner"});
        let parsed = MessagePayload::from_wire("widget", payload.clone());
        assert_eq!(
            parsed,
            MessagePayload::Other {
                content_type: "widget".to_string(),
                payload: payload.clone()
            }
        );

        // Round trip keeps the original tag and value
        let (ct, body) = parsed.to_wire();
        assert_eq!(ct, "widget");
        assert_eq!(body, payload);
    }

    #[test]
    fn test_message_payload_malformed_known_type_degrades() {
        // "text" without a text key does not match TextPayload; the value
        // must survive as Other instead of erroring the whole message.
        let parsed = MessagePayload::from_wire("text", json!({"body": "oops"}));
        assert!(matches!(parsed, MessagePayload::Other { .. }));
    }

    #[test]
    fn test_chat_message_round_trip() {
        let original = json!({
            "id": 3,
            "conversation": 1,
            "sender": "agent",
            "content_type": "buttons",
            "payload": {"buttons": ["Yes", "No"]},
            "timestamp": "2024-05-01T10:00:00Z",
            "status": "sent"
        });
        let msg: ChatMessage = serde_json::from_value(original.clone()).unwrap();
        let back = serde_json::to_value(&msg).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_missing_required_field_fails() {
        // No sender: the message must not decode into a partial entity
        let result: std::result::Result<ChatMessage, _> = serde_json::from_value(json!({
            "id": 1,
            "conversation": 7,
            "content_type": "text",
            "payload": {"text": "hello"},
            "timestamp": "2024-05-01T10:00:00Z",
            "status": "sent"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_tag_kind_wire_names() {
        let tag: Tag = serde_json::from_value(json!({
            "id": 4,
            "key": null,
            "name": "Rent",
            "type": "MONTHLY FIXED",
            "user": 1
        }))
        .unwrap();
        assert_eq!(tag.kind, Some(TagKind::MonthlyFixed));
        assert_eq!(tag.kind.unwrap().to_string(), "MONTHLY FIXED");

        let back = serde_json::to_value(&tag).unwrap();
        assert_eq!(back["type"], "MONTHLY FIXED");
    }

    #[test]
    fn test_passthrough_fields_survive_round_trip() {
        let raw = json!({
            "id": 9,
            "company": "Acme Bank",
            "type": "checking",
            "balance": "1024.50",
            "last_scanned": null,
            "color": "#ff0000"
        });
        let credential: Credential = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(credential.extra["color"], "#ff0000");

        let back = serde_json::to_value(&credential).unwrap();
        assert_eq!(back["color"], "#ff0000");
    }

    #[test]
    fn test_patched_tag_skips_absent_fields() {
        let patch = PatchedTag {
            name: Some("Groceries".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"name": "Groceries"}));
    }

    #[test]
    fn test_transaction_query_only_appends_present_bounds() {
        let query = TransactionQuery {
            date_gte: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(encoded, json!({"date__gte": "2024-01-01"}));

        assert!(TransactionQuery::default().is_empty());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice.smith@example.com").is_ok());
        assert!(validate_username("bob_42").is_ok());
        assert!(validate_username("no spaces").is_err());
        assert!(validate_username("").is_err());
    }
}
