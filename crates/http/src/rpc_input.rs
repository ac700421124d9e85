//! Decoding procedure input from the request.
//!
//! Queries carry input as a JSON string in `?input=`, mutations as the JSON
//! request body. Both end in [`wire::decode`], so every decoding failure is a
//! `ValidationError` and becomes `BAD_REQUEST`. So do extractor rejections
//! (bad query strings, unreadable or oversized bodies), via [`accepted`].

use std::fmt::Display;

use prompt_curator_core::ValidationError;
use prompt_curator_core::wire;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::rpc_error::RpcError;

/// `?input=<json>` on query procedures.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub input: Option<String>,
}

fn parse_json(raw: &[u8]) -> Result<serde_json::Value, ValidationError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_slice(raw)?)
}

/// Unwraps an extractor result, turning its rejection into a `BAD_REQUEST`
/// envelope instead of axum's plain-text reply.
pub fn accepted<T>(procedure: &str, extracted: Result<T, impl Display>) -> Result<T, RpcError> {
    extracted.map_err(|rejection| {
        RpcError::validation(procedure, &ValidationError::Malformed(rejection.to_string()))
    })
}

pub fn query_input<T: DeserializeOwned>(
    procedure: &str,
    params: &QueryParams,
) -> Result<T, RpcError> {
    let raw = params.input.as_deref().unwrap_or_default();
    parse_json(raw.as_bytes())
        .and_then(wire::decode)
        .map_err(|e| RpcError::validation(procedure, &e))
}

pub fn mutation_input<T: DeserializeOwned>(procedure: &str, body: &[u8]) -> Result<T, RpcError> {
    parse_json(body).and_then(wire::decode).map_err(|e| RpcError::validation(procedure, &e))
}
