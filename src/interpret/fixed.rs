use async_trait::async_trait;

use super::Interpreter;
use crate::foundation::error::ArcanaResult;

const CANNED_READING: &str = "根据三张牌的含义和您所问的问题，解读如下：

首先，第一张牌揭示了您当前的处境：事情仍在酝酿之中，表面平静，暗处却有变化在积累。

其次，第二张牌指出了阻碍所在：犹豫与过度的担忧让您迟迟没有迈出关键的一步。

最后，第三张牌预示了走向：只要顺势而为，局面会在不久之后逐渐明朗。";

/// Answers every request with the same text.
#[derive(Clone, Debug)]
pub struct FixedInterpreter {
    text: String,
}

impl FixedInterpreter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// A plausible multi-paragraph reading, for demos and layout checks.
    pub fn canned() -> Self {
        Self::new(CANNED_READING)
    }
}

#[async_trait]
impl Interpreter for FixedInterpreter {
    async fn chat(&self, _system_prompt: &str, _user_prompt: &str) -> ArcanaResult<String> {
        Ok(self.text.clone())
    }
}
