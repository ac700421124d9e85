//! Serialization boundary for the RPC surface.
//!
//! Request types mirror the JSON bodies accepted by the server and sent by the
//! client. They are decoupled from the validated contract in [`crate::input`]
//! and convert into it with `TryFrom`, so the contract can be reused without
//! any particular transport.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    CreatePromptInput, DeletePromptInput, FieldUpdate, GetPromptInput, PromptId,
    UpdatePromptInput, ValidationError,
};

/// Procedure names exposed by the RPC router.
pub mod procedures {
    pub const HEALTHCHECK: &str = "healthcheck";
    pub const CREATE_PROMPT: &str = "createPrompt";
    pub const GET_PROMPTS: &str = "getPrompts";
    pub const GET_PROMPT: &str = "getPrompt";
    pub const UPDATE_PROMPT: &str = "updatePrompt";
    pub const DELETE_PROMPT: &str = "deletePrompt";
}

/// Decodes a JSON value into a wire type, reporting failures as validation errors.
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ValidationError> {
    Ok(serde_json::from_value(value)?)
}

/// Nullable field whose key must be present.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Wraps a present value in `Some`, so that with `#[serde(default)]` an absent
/// key stays `None` while `null` reaches the inner type.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body of `createPrompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePromptRequest {
    pub text: String,
    #[serde(deserialize_with = "required_nullable")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TryFrom<CreatePromptRequest> for CreatePromptInput {
    type Error = ValidationError;

    fn try_from(req: CreatePromptRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(req.text, req.description)?
            .with_tags(req.tags)
            .with_image_url(req.image_url))
    }
}

impl From<&CreatePromptInput> for CreatePromptRequest {
    fn from(input: &CreatePromptInput) -> Self {
        Self {
            text: input.text().to_owned(),
            description: input.description().map(str::to_owned),
            tags: input.tags().to_vec(),
            image_url: input.image_url().map(str::to_owned),
        }
    }
}

/// Body of `updatePrompt`.
///
/// Outer `None` means the key was absent. For nullable fields `Some(None)`
/// carries an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePromptRequest {
    pub id: PromptId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TryFrom<UpdatePromptRequest> for UpdatePromptInput {
    type Error = ValidationError;

    fn try_from(req: UpdatePromptRequest) -> Result<Self, Self::Error> {
        let mut input = Self::new(req.id);
        if let Some(text) = req.text {
            input = input.with_text(text)?;
        }
        if let Some(description) = req.description {
            input = input.with_description(description);
        }
        if let Some(image_url) = req.image_url {
            input = input.with_image_url(image_url);
        }
        if let Some(tags) = req.tags {
            input = input.with_tags(tags);
        }
        Ok(input)
    }
}

impl From<&UpdatePromptInput> for UpdatePromptRequest {
    fn from(input: &UpdatePromptInput) -> Self {
        fn wire<T: Clone>(field: &FieldUpdate<T>) -> Option<T> {
            field.as_set().cloned()
        }
        Self {
            id: input.id(),
            text: wire(input.text()),
            description: wire(input.description()),
            image_url: wire(input.image_url()),
            tags: wire(input.tags()),
        }
    }
}

/// Body of `getPrompt` and `deletePrompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: PromptId,
}

impl From<IdRequest> for GetPromptInput {
    fn from(req: IdRequest) -> Self {
        Self { id: req.id }
    }
}

impl From<IdRequest> for DeletePromptInput {
    fn from(req: IdRequest) -> Self {
        Self { id: req.id }
    }
}

/// Output of `healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    #[must_use]
    pub fn ok() -> Self {
        Self { status: "ok".to_owned(), timestamp: Utc::now() }
    }
}

/// Error codes carried in an RPC error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorCode {
    BadRequest,
    NotFound,
    MethodNotSupported,
    InternalServerError,
}

impl std::fmt::Display for RpcErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotSupported => "METHOD_NOT_SUPPORTED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        };
        f.write_str(s)
    }
}

/// `{"result": {"data": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSuccess<T> {
    pub result: RpcData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcData<T> {
    pub data: T,
}

impl<T> RpcSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { result: RpcData { data } }
    }
}

/// `{"error": {"code": ..., "message": ..., "procedure": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcFailure {
    pub error: RpcErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: RpcErrorCode,
    pub message: String,
    pub procedure: String,
}

/// Lenient timestamp codec.
///
/// Serializes RFC 3339 in UTC. Deserializes RFC 3339, naive
/// `YYYY-MM-DD[ T]HH:MM:SS[.f]` (taken as UTC), a bare `YYYY-MM-DD`, or
/// integer milliseconds since the Unix epoch.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::ValidationError;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DateLike {
            Millis(i64),
            Text(String),
        }

        match DateLike::deserialize(deserializer)? {
            DateLike::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
            DateLike::Text(s) => parse(&s).map_err(D::Error::custom),
        }
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
        let s = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ValidationError::InvalidDate(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Prompt;
    use serde_json::json;

    #[test]
    fn create_requires_description_key() {
        let err = decode::<CreatePromptRequest>(json!({"text": "a cat"})).unwrap_err();
        assert!(err.to_string().contains("description"), "{err}");
    }

    #[test]
    fn create_accepts_null_description_and_defaults_tags() {
        let req: CreatePromptRequest =
            decode(json!({"text": "Write a story", "description": null})).unwrap();
        let input = CreatePromptInput::try_from(req).unwrap();
        assert_eq!(input.description(), None);
        assert!(input.tags().is_empty());
    }

    #[test]
    fn create_rejects_empty_text_after_decoding() {
        let req: CreatePromptRequest = decode(json!({"text": "", "description": null})).unwrap();
        assert_eq!(
            CreatePromptInput::try_from(req).unwrap_err(),
            ValidationError::Empty { field: "text" }
        );
    }

    #[test]
    fn create_rejects_wrong_primitive_types() {
        assert!(decode::<CreatePromptRequest>(json!({"text": 5, "description": null})).is_err());
        assert!(
            decode::<CreatePromptRequest>(json!({"text": "x", "description": null, "tags": "a"}))
                .is_err()
        );
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let absent: UpdatePromptRequest = decode(json!({"id": 3})).unwrap();
        let cleared: UpdatePromptRequest = decode(json!({"id": 3, "description": null})).unwrap();

        let absent = UpdatePromptInput::try_from(absent).unwrap();
        let cleared = UpdatePromptInput::try_from(cleared).unwrap();

        assert_eq!(absent.description(), &FieldUpdate::Unset);
        assert_eq!(cleared.description(), &FieldUpdate::Set(None));
        assert!(absent.is_content_noop());
        assert!(!cleared.is_content_noop());
    }

    #[test]
    fn update_rejects_null_text_and_tags() {
        assert!(decode::<UpdatePromptRequest>(json!({"id": 1, "text": null})).is_err());
        assert!(decode::<UpdatePromptRequest>(json!({"id": 1, "tags": null})).is_err());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let input = UpdatePromptInput::new(PromptId(9)).with_image_url(None);
        let value = serde_json::to_value(UpdatePromptRequest::from(&input)).unwrap();
        assert_eq!(value, json!({"id": 9, "image_url": null}));
    }

    #[test]
    fn id_request_requires_integer() {
        assert!(decode::<IdRequest>(json!({"id": "1"})).is_err());
        assert_eq!(decode::<IdRequest>(json!({"id": 1})).unwrap().id, PromptId(1));
    }

    #[test]
    fn prompt_dates_coerce_from_date_like_values() {
        let prompt: Prompt = decode(json!({
            "id": 1,
            "text": "x",
            "description": null,
            "tags": ["a", "b", "c"],
            "created_at": "2024-03-01 10:00:00.250",
            "updated_at": 1_709_287_200_250_i64,
        }))
        .unwrap();
        assert_eq!(prompt.created_at, prompt.updated_at);
        assert_eq!(prompt.tags, vec!["a", "b", "c"]);
        assert_eq!(prompt.image_url, None);
    }

    #[test]
    fn timestamp_parse_rejects_garbage() {
        assert!(timestamp::parse("yesterday").is_err());
        assert!(timestamp::parse("2024-03-01").is_ok());
        assert!(timestamp::parse("2024-03-01T10:00:00+02:00").is_ok());
    }

    #[test]
    fn error_envelope_uses_screaming_codes() {
        let failure = RpcFailure {
            error: RpcErrorBody {
                code: RpcErrorCode::BadRequest,
                message: "text must not be empty".to_owned(),
                procedure: procedures::CREATE_PROMPT.to_owned(),
            },
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["error"]["code"], "BAD_REQUEST");
    }
}
