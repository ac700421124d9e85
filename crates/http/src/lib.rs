//! HTTP RPC server for prompt-curator.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

mod api_types;
mod handlers;
pub mod rpc_error;
mod rpc_input;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use axum::routing::{MethodRouter, any, get, post};
use prompt_curator_core::wire::procedures;
use prompt_curator_service::PromptService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use api_types::VersionResponse;
pub use rpc_error::RpcError;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub prompt_service: Arc<PromptService>,
}

impl AppState {
    #[must_use]
    pub fn new(prompt_service: PromptService) -> Self {
        Self { prompt_service: Arc::new(prompt_service) }
    }
}

/// GET-only route; any other method gets a `METHOD_NOT_SUPPORTED` envelope.
fn query<H, T>(procedure: &'static str, handler: H) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    get(handler).fallback(move || async move { RpcError::method_not_supported(procedure) })
}

/// POST-only route; any other method gets a `METHOD_NOT_SUPPORTED` envelope.
fn mutation<H, T>(procedure: &'static str, handler: H) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    post(handler).fallback(move || async move { RpcError::method_not_supported(procedure) })
}

pub fn create_router(state: Arc<AppState>) -> Router {
    use handlers::{health, prompts};

    Router::new()
        .route("/health", get(health::health))
        .route("/api/version", get(health::version))
        .route(
            &format!("/rpc/{}", procedures::HEALTHCHECK),
            query(procedures::HEALTHCHECK, health::healthcheck),
        )
        .route(
            &format!("/rpc/{}", procedures::GET_PROMPTS),
            query(procedures::GET_PROMPTS, prompts::get_prompts),
        )
        .route(
            &format!("/rpc/{}", procedures::GET_PROMPT),
            query(procedures::GET_PROMPT, prompts::get_prompt),
        )
        .route(
            &format!("/rpc/{}", procedures::CREATE_PROMPT),
            mutation(procedures::CREATE_PROMPT, prompts::create_prompt),
        )
        .route(
            &format!("/rpc/{}", procedures::UPDATE_PROMPT),
            mutation(procedures::UPDATE_PROMPT, prompts::update_prompt),
        )
        .route(
            &format!("/rpc/{}", procedures::DELETE_PROMPT),
            mutation(procedures::DELETE_PROMPT, prompts::delete_prompt),
        )
        .route("/rpc/{procedure}", any(health::unknown_procedure))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = create_router(state);
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}
