//! Core types for prompt-curator
//!
//! This crate holds the prompt record, the validated input contract used by the
//! persistence handlers, and the serde wire boundary shared by server and client.

mod constants;
mod env_config;
mod error;
mod input;
mod prompt;
pub mod wire;

pub use constants::*;
pub use env_config::{env_parse_with_default, env_string_with_default};
pub use error::*;
pub use input::*;
pub use prompt::*;
