//! Service layer for prompt-curator
//!
//! The persistence handlers sit between the RPC router and storage.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod prompt_service;

pub use error::ServiceError;
pub use prompt_service::PromptService;
