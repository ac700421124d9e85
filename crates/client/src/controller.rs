//! List state for a prompt browser.
//!
//! Holds the loaded prompts and the current filter. Mutations patch the local
//! list only after the server confirms them.

use prompt_curator_core::{CreatePromptInput, Prompt, PromptId, UpdatePromptInput};

use crate::view::{SortOrder, TagFilter, ViewFilter, derive_view, tag_counts};
use crate::{ClientError, PromptApi};

/// Local copy of the prompt list, kept in step with server confirmations.
///
/// Mutations are applied only after the server answers. A failed call is
/// logged and returned, and the list is left as it was.
pub struct PromptListController<A: PromptApi> {
    api: A,
    prompts: Vec<Prompt>,
    loading: bool,
    filter: ViewFilter,
}

impl<A: PromptApi> PromptListController<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api, prompts: Vec::new(), loading: false, filter: ViewFilter::default() }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Replaces the local list with the server's. `loading` is cleared on
    /// both outcomes.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.api.get_prompts().await;
        self.loading = false;
        match result {
            Ok(prompts) => {
                tracing::debug!(count = prompts.len(), "prompts loaded");
                self.prompts = prompts;
                Ok(())
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch prompts");
                Err(e)
            },
        }
    }

    pub async fn create(&mut self, input: &CreatePromptInput) -> Result<Prompt, ClientError> {
        match self.api.create_prompt(input).await {
            Ok(prompt) => {
                self.prompts.push(prompt.clone());
                Ok(prompt)
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to create prompt");
                Err(e)
            },
        }
    }

    /// Replaces the matching entry when the server returns a record.
    /// `Ok(None)` means the server no longer has the prompt.
    pub async fn update(
        &mut self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, ClientError> {
        let id = input.id();
        match self.api.update_prompt(input).await {
            Ok(Some(prompt)) => {
                if let Some(slot) = self.prompts.iter_mut().find(|p| p.id == id) {
                    *slot = prompt.clone();
                }
                Ok(Some(prompt))
            },
            Ok(None) => {
                tracing::warn!(%id, "update target missing on server");
                Ok(None)
            },
            Err(e) => {
                tracing::error!(error = %e, %id, "failed to update prompt");
                Err(e)
            },
        }
    }

    /// Removes the entry when the server reports a deletion.
    pub async fn delete(&mut self, id: PromptId) -> Result<bool, ClientError> {
        match self.api.delete_prompt(id).await {
            Ok(true) => {
                self.prompts.retain(|p| p.id != id);
                Ok(true)
            },
            Ok(false) => {
                tracing::debug!(%id, "delete target already gone");
                Ok(false)
            },
            Err(e) => {
                tracing::error!(error = %e, %id, "failed to delete prompt");
                Err(e)
            },
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn set_tag_filter(&mut self, tag: TagFilter) {
        self.filter.tag = tag;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.filter.sort = sort;
    }

    /// Empty search, all tags, newest first.
    pub fn clear_filters(&mut self) {
        self.filter = ViewFilter::default();
    }

    #[must_use]
    pub fn view(&self) -> Vec<Prompt> {
        derive_view(&self.prompts, &self.filter)
    }

    #[must_use]
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        tag_counts(&self.prompts)
    }
}
