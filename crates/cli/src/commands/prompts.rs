use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use prompt_curator_client::{
    CardAction, PromptApi, PromptCard, PromptDraft, PromptListController, RpcClient, SortOrder,
    TagFilter,
};
use prompt_curator_core::{Prompt, PromptId};

/// Field changes for `edit`. `None` keeps the current value.
pub(crate) struct Edit {
    pub text: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

fn print_cards(prompts: &[Prompt]) {
    for (i, prompt) in prompts.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", PromptCard::new(prompt.clone()).render());
    }
}

pub(crate) async fn run_list(
    url: &str,
    search: String,
    tag: TagFilter,
    sort: SortOrder,
    json: bool,
) -> Result<()> {
    let mut controller = PromptListController::new(RpcClient::new(url)?);
    controller.load().await?;
    controller.set_search(search);
    controller.set_tag_filter(tag);
    controller.set_sort(sort);

    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if view.is_empty() {
        println!("No prompts found ({} total)", controller.prompts().len());
    } else {
        print_cards(&view);
    }
    Ok(())
}

pub(crate) async fn run_tags(url: &str) -> Result<()> {
    let mut controller = PromptListController::new(RpcClient::new(url)?);
    controller.load().await?;
    for (tag, count) in controller.tag_counts() {
        println!("{tag}\t{count}");
    }
    Ok(())
}

pub(crate) async fn run_get(url: &str, id: i64) -> Result<()> {
    let client = RpcClient::new(url)?;
    match client.get_prompt(PromptId(id)).await? {
        Some(prompt) => println!("{}", PromptCard::new(prompt).render()),
        None => println!("Prompt not found: {id}"),
    }
    Ok(())
}

pub(crate) async fn run_add(
    url: &str,
    text: String,
    description: Option<String>,
    image_url: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let mut draft = PromptDraft::new();
    draft.set_text(text)?;
    if let Some(description) = description {
        draft.set_description(description)?;
    }
    if let Some(image_url) = image_url {
        draft.set_image_url(image_url);
    }
    for tag in &tags {
        draft.add_tag(tag)?;
    }
    if !draft.can_submit() {
        bail!("prompt text must not be blank");
    }

    let mut controller = PromptListController::new(RpcClient::new(url)?);
    let created = controller.create(&draft.to_create_input()?).await?;
    println!("{}", PromptCard::new(created).render());
    Ok(())
}

pub(crate) async fn run_edit(url: &str, id: i64, edit: Edit) -> Result<()> {
    let id = PromptId(id);
    let mut controller = PromptListController::new(RpcClient::new(url)?);
    let current = controller
        .api()
        .get_prompt(id)
        .await?
        .ok_or_else(|| anyhow!("Prompt not found: {id}"))?;

    let mut draft = PromptDraft::from_prompt(&current);
    if let Some(text) = edit.text {
        draft.set_text(text)?;
    }
    if let Some(description) = edit.description {
        draft.set_description(description)?;
    }
    if let Some(image_url) = edit.image_url {
        draft.set_image_url(image_url);
    }
    for tag in &edit.remove_tags {
        if !draft.remove_tag(tag) {
            tracing::warn!(tag = %tag, "tag not present, skipping");
        }
    }
    for tag in &edit.add_tags {
        draft.add_tag(tag)?;
    }
    if !draft.can_submit() {
        bail!("prompt text must not be blank");
    }

    match controller.update(&draft.to_update_input(id)?).await? {
        Some(updated) => println!("{}", PromptCard::new(updated).render()),
        None => println!("Prompt not found: {id}"),
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer).context("reading confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub(crate) async fn run_delete(url: &str, id: i64, yes: bool) -> Result<()> {
    let id = PromptId(id);
    let mut controller = PromptListController::new(RpcClient::new(url)?);
    let Some(prompt) = controller.api().get_prompt(id).await? else {
        println!("Prompt not found: {id}");
        return Ok(());
    };

    let mut card = PromptCard::new(prompt);
    card.request_delete();
    if !yes {
        println!("{}", card.render());
        if !confirm("Delete this prompt?")? {
            card.cancel_delete();
        }
    }

    match card.confirm_delete() {
        Some(CardAction::Delete(id)) => {
            if controller.delete(id).await? {
                println!("Deleted prompt {id}");
            } else {
                println!("Prompt not found: {id}");
            }
        },
        _ => println!("Cancelled"),
    }
    Ok(())
}

pub(crate) async fn run_health(url: &str) -> Result<()> {
    let client = RpcClient::new(url)?;
    let started = Instant::now();
    let health = client.healthcheck().await?;
    tracing::debug!(elapsed = ?started.elapsed(), "healthcheck answered");
    println!("{} at {}", health.status, health.timestamp.to_rfc3339());
    Ok(())
}
