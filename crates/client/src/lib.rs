//! Client side of prompt-curator.
//!
//! [`RpcClient`] speaks the RPC envelope over HTTP. [`PromptListController`]
//! keeps the local list in step with server confirmations and derives the
//! filtered view. [`PromptDraft`] and [`PromptCard`] hold form and card state.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

pub mod api;
pub mod card;
pub mod controller;
pub mod error;
pub mod form;
pub mod rpc_client;
pub mod view;

pub use api::PromptApi;
pub use card::{CardAction, ImageStatus, PromptCard};
pub use controller::PromptListController;
pub use error::ClientError;
pub use form::{FieldTooLong, PromptDraft, TagError};
pub use rpc_client::RpcClient;
pub use view::{SortOrder, TagFilter, ViewFilter, derive_view, tag_counts};
