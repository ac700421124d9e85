use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use prompt_curator_core::wire::{
    CreatePromptRequest, IdRequest, RpcSuccess, UpdatePromptRequest, procedures,
};
use prompt_curator_core::{
    CreatePromptInput, DeletePromptInput, GetPromptInput, Prompt, UpdatePromptInput,
};

use crate::AppState;
use crate::rpc_error::RpcError;
use crate::rpc_input::{QueryParams, accepted, mutation_input, query_input};

type RpcResult<T> = Result<Json<RpcSuccess<T>>, RpcError>;
type RawBody = Result<Bytes, BytesRejection>;

#[tracing::instrument(name = "rpc", skip_all, fields(procedure = procedures::CREATE_PROMPT))]
pub async fn create_prompt(State(state): State<Arc<AppState>>, body: RawBody) -> RpcResult<Prompt> {
    let name = procedures::CREATE_PROMPT;
    let request: CreatePromptRequest = mutation_input(name, &accepted(name, body)?)?;
    let input =
        CreatePromptInput::try_from(request).map_err(|e| RpcError::validation(name, &e))?;
    let prompt = state
        .prompt_service
        .create_prompt(input)
        .await
        .map_err(|e| RpcError::internal(name, &e))?;
    Ok(Json(RpcSuccess::new(prompt)))
}

#[tracing::instrument(name = "rpc", skip_all, fields(procedure = procedures::GET_PROMPTS))]
pub async fn get_prompts(State(state): State<Arc<AppState>>) -> RpcResult<Vec<Prompt>> {
    let prompts = state
        .prompt_service
        .get_prompts()
        .await
        .map_err(|e| RpcError::internal(procedures::GET_PROMPTS, &e))?;
    Ok(Json(RpcSuccess::new(prompts)))
}

#[tracing::instrument(name = "rpc", skip_all, fields(procedure = procedures::GET_PROMPT))]
pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> RpcResult<Option<Prompt>> {
    let name = procedures::GET_PROMPT;
    let Query(params) = accepted(name, params)?;
    let request: IdRequest = query_input(name, &params)?;
    let prompt = state
        .prompt_service
        .get_prompt(GetPromptInput::from(request))
        .await
        .map_err(|e| RpcError::internal(name, &e))?;
    Ok(Json(RpcSuccess::new(prompt)))
}

#[tracing::instrument(name = "rpc", skip_all, fields(procedure = procedures::UPDATE_PROMPT))]
pub async fn update_prompt(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> RpcResult<Option<Prompt>> {
    let name = procedures::UPDATE_PROMPT;
    let request: UpdatePromptRequest = mutation_input(name, &accepted(name, body)?)?;
    let input =
        UpdatePromptInput::try_from(request).map_err(|e| RpcError::validation(name, &e))?;
    let prompt = state
        .prompt_service
        .update_prompt(input)
        .await
        .map_err(|e| RpcError::internal(name, &e))?;
    Ok(Json(RpcSuccess::new(prompt)))
}

#[tracing::instrument(name = "rpc", skip_all, fields(procedure = procedures::DELETE_PROMPT))]
pub async fn delete_prompt(State(state): State<Arc<AppState>>, body: RawBody) -> RpcResult<bool> {
    let name = procedures::DELETE_PROMPT;
    let request: IdRequest = mutation_input(name, &accepted(name, body)?)?;
    let deleted = state
        .prompt_service
        .delete_prompt(DeletePromptInput::from(request))
        .await
        .map_err(|e| RpcError::internal(name, &e))?;
    Ok(Json(RpcSuccess::new(deleted)))
}
