//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=postgres://... cargo test -p prompt-curator-storage -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use prompt_curator_core::{CreatePromptInput, PromptId, UpdatePromptInput};
use prompt_curator_storage::PgStorage;
use prompt_curator_storage::traits::PromptStore;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn input(text: &str, tags: &[&str]) -> CreatePromptInput {
    CreatePromptInput::new(text, None)
        .unwrap()
        .with_tags(tags.iter().map(|t| (*t).to_owned()).collect())
}

#[tokio::test]
#[ignore]
async fn pg_create_and_get_prompt() {
    let storage = create_pg_storage().await;
    let created = storage.create_prompt(&input("pg create", &["a", "b", "c"])).await.unwrap();

    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.description, None);

    let fetched = storage.get_prompt(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.tags, vec!["a", "b", "c"]);
    assert_eq!(fetched.text, "pg create");
}

#[tokio::test]
#[ignore]
async fn pg_noop_update_bumps_updated_at() {
    let storage = create_pg_storage().await;
    let before = storage.create_prompt(&input("pg noop", &["x"])).await.unwrap();

    let after = storage.update_prompt(&UpdatePromptInput::new(before.id)).await.unwrap().unwrap();

    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.text, before.text);
    assert_eq!(after.tags, before.tags);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
#[ignore]
async fn pg_update_clears_description_and_sets_tags() {
    let storage = create_pg_storage().await;
    let created = storage
        .create_prompt(&CreatePromptInput::new("pg clear", Some("desc".to_owned())).unwrap())
        .await
        .unwrap();

    let update = UpdatePromptInput::new(created.id)
        .with_description(None)
        .with_tags(vec!["y".to_owned(), "x".to_owned()]);
    let updated = storage.update_prompt(&update).await.unwrap().unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.tags, vec!["y", "x"]);
    assert_eq!(updated.text, "pg clear");
}

#[tokio::test]
#[ignore]
async fn pg_missing_ids_are_soft() {
    let storage = create_pg_storage().await;
    let missing = PromptId(i64::MAX);

    assert!(storage.get_prompt(missing).await.unwrap().is_none());
    assert!(storage.update_prompt(&UpdatePromptInput::new(missing)).await.unwrap().is_none());
    assert!(!storage.delete_prompt(missing).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn pg_delete_twice() {
    let storage = create_pg_storage().await;
    let created = storage.create_prompt(&input("pg delete", &[])).await.unwrap();

    assert!(storage.delete_prompt(created.id).await.unwrap());
    assert!(!storage.delete_prompt(created.id).await.unwrap());

    let next = storage.create_prompt(&input("pg after delete", &[])).await.unwrap();
    assert!(next.id > created.id);
    let listed = storage.list_prompts().await.unwrap();
    assert!(listed.iter().all(|p| p.id != created.id));
}
