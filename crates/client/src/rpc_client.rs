//! Calls the server's `/rpc/{name}` procedures over HTTP.
//!
//! Requests wait as long as the server takes; there is no client-side
//! deadline.

use async_trait::async_trait;
use prompt_curator_core::wire::{
    CreatePromptRequest, HealthStatus, IdRequest, RpcFailure, RpcSuccess, UpdatePromptRequest,
    procedures,
};
use prompt_curator_core::{CreatePromptInput, Prompt, PromptId, UpdatePromptInput};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, PromptApi};

/// HTTP client for the `/rpc/{name}` procedures.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:2022`).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/rpc/{procedure}", self.base_url)
    }

    async fn query<I, T>(&self, procedure: &str, input: Option<&I>) -> Result<T, ClientError>
    where
        I: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.client.get(self.url(procedure));
        if let Some(input) = input {
            let encoded = serde_json::to_string(input)
                .map_err(|e| ClientError::Decode(format!("{procedure}: {e}")))?;
            request = request.query(&[("input", encoded)]);
        }
        let response = request.send().await?;
        Self::decode(procedure, response).await
    }

    async fn mutation<I, T>(&self, procedure: &str, input: &I) -> Result<T, ClientError>
    where
        I: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(procedure)).json(input).send().await?;
        Self::decode(procedure, response).await
    }

    async fn decode<T: DeserializeOwned>(
        procedure: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if let Ok(failure) = serde_json::from_slice::<RpcFailure>(&body) {
            tracing::debug!(procedure, code = %failure.error.code, "rpc error envelope");
            return Err(ClientError::Rpc {
                code: failure.error.code,
                message: failure.error.message,
            });
        }
        if !status.is_success() {
            return Err(ClientError::Decode(format!("{procedure}: HTTP {status}")));
        }
        serde_json::from_slice::<RpcSuccess<T>>(&body)
            .map(|success| success.result.data)
            .map_err(|e| ClientError::Decode(format!("{procedure}: {e}")))
    }
}

#[async_trait]
impl PromptApi for RpcClient {
    async fn healthcheck(&self) -> Result<HealthStatus, ClientError> {
        self.query::<(), _>(procedures::HEALTHCHECK, None).await
    }

    async fn create_prompt(&self, input: &CreatePromptInput) -> Result<Prompt, ClientError> {
        self.mutation(procedures::CREATE_PROMPT, &CreatePromptRequest::from(input)).await
    }

    async fn get_prompts(&self) -> Result<Vec<Prompt>, ClientError> {
        self.query::<(), _>(procedures::GET_PROMPTS, None).await
    }

    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, ClientError> {
        self.query(procedures::GET_PROMPT, Some(&IdRequest { id })).await
    }

    async fn update_prompt(
        &self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, ClientError> {
        self.mutation(procedures::UPDATE_PROMPT, &UpdatePromptRequest::from(input)).await
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<bool, ClientError> {
        self.mutation(procedures::DELETE_PROMPT, &IdRequest { id }).await
    }
}
