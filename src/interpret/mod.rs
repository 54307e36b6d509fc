//! The text-generation boundary.
//!
//! The core only ever asks one question per reading: given a system prompt and a user prompt,
//! what is the interpretation? [`OpenAiInterpreter`] answers it over HTTP and
//! [`FixedInterpreter`] answers it with a constant, which keeps reading tests hermetic.

mod fixed;
mod openai;

use async_trait::async_trait;

use crate::foundation::error::ArcanaResult;

pub use fixed::FixedInterpreter;
pub use openai::OpenAiInterpreter;

/// A single request/response text backend.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Return the raw interpretation. An empty `system_prompt` means "no system message".
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> ArcanaResult<String>;
}
