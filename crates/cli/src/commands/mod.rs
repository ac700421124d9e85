pub(crate) mod prompts;
pub(crate) mod serve;
