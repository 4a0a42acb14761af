mod format_validator;
mod message;
mod planner;
mod providers;

pub use format_validator::*;
pub use message::*;
pub use planner::*;
pub use providers::chat_completions::ChatCompletionsProvider;
pub use providers::{LlmError, LlmProvider};
