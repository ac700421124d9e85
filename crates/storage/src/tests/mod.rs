//! Test utilities and module declarations for storage tests.

use crate::SqliteStorage;
use prompt_curator_core::CreatePromptInput;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn create_test_storage() -> SqliteStorage {
    SqliteStorage::in_memory().await.unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn create_file_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let url = sqlite_url(&temp_dir);
    let storage = SqliteStorage::new(&url).await.unwrap();
    (storage, temp_dir)
}

pub fn sqlite_url(temp_dir: &TempDir) -> String {
    format!("sqlite://{}", temp_dir.path().join("prompts.db").display())
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_input(text: &str, tags: &[&str]) -> CreatePromptInput {
    CreatePromptInput::new(text, Some(format!("description of {text}")))
        .unwrap()
        .with_tags(tags.iter().map(|t| (*t).to_owned()).collect())
}
