//! Typed RPC error for procedure handlers.
//!
//! Converts validation and service errors into the JSON error envelope with a
//! matching HTTP status. Handlers return `Result<Json<RpcSuccess<T>>, RpcError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prompt_curator_core::ValidationError;
use prompt_curator_core::wire::{RpcErrorBody, RpcErrorCode, RpcFailure};
use prompt_curator_service::ServiceError;

/// Error envelope: `{"error": {"code", "message", "procedure"}}`.
///
/// Storage failures log the real error server-side and send a static
/// message to the caller.
#[derive(Debug)]
pub struct RpcError {
    code: RpcErrorCode,
    message: String,
    procedure: String,
}

impl RpcError {
    fn new(code: RpcErrorCode, procedure: &str, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), procedure: procedure.to_owned() }
    }

    /// 400: input rejected by the schema. Storage was not touched.
    pub fn validation(procedure: &str, err: &ValidationError) -> Self {
        tracing::debug!(procedure, error = %err, "input rejected");
        Self::new(RpcErrorCode::BadRequest, procedure, err.to_string())
    }

    /// 500: handler failed. Details are logged, not exposed.
    pub fn internal(procedure: &str, err: &ServiceError) -> Self {
        tracing::error!(procedure, error = ?err, transient = err.is_transient(), "procedure failed");
        Self::new(RpcErrorCode::InternalServerError, procedure, "internal server error")
    }

    /// 404: no procedure with this name.
    pub fn unknown_procedure(procedure: &str) -> Self {
        Self::new(RpcErrorCode::NotFound, procedure, format!("no procedure named '{procedure}'"))
    }

    /// 405: query called as a mutation or the other way round.
    pub fn method_not_supported(procedure: &str) -> Self {
        Self::new(
            RpcErrorCode::MethodNotSupported,
            procedure,
            "queries use GET, mutations use POST",
        )
    }

    #[must_use]
    pub fn code(&self) -> RpcErrorCode {
        self.code
    }

    fn status(&self) -> StatusCode {
        match self.code {
            RpcErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            RpcErrorCode::NotFound => StatusCode::NOT_FOUND,
            RpcErrorCode::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            RpcErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = RpcFailure {
            error: RpcErrorBody { code: self.code, message: self.message, procedure: self.procedure },
        };
        (status, Json(body)).into_response()
    }
}
