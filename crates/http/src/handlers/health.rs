use axum::Json;
use axum::extract::Path;
use prompt_curator_core::wire::{HealthStatus, RpcSuccess};

use crate::api_types::VersionResponse;
use crate::rpc_error::RpcError;

/// `healthcheck` query. Never touches storage.
#[tracing::instrument(name = "rpc", skip_all, fields(procedure = "healthcheck"))]
pub async fn healthcheck() -> Json<RpcSuccess<HealthStatus>> {
    Json(RpcSuccess::new(HealthStatus::ok()))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

pub async fn unknown_procedure(Path(procedure): Path<String>) -> RpcError {
    tracing::debug!(%procedure, "unknown procedure");
    RpcError::unknown_procedure(&procedure)
}
