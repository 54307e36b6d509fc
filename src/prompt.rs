//! Prompt templating for the interpreter.
//!
//! Templates carry `{{question}}` and `{{card1}}`..`{{card3}}` tokens. Rendering is a single
//! left-to-right pass: substituted values are never scanned again, and tokens without a fill are
//! copied through untouched.

use crate::deck::Selection;

/// Default system-role template.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "你是一位神秘的塔罗牌占卜师，解读时语言简练精辟客观。";

/// Default user-role template.
pub const DEFAULT_USER_TEMPLATE: &str = "我想要占卜的事情是 “{{question}}”，我抽到的三张牌分别是：{{card1}}，{{card2}}，{{card3}}。
请根据三张牌面和这件具体事情进行解读，语言简练精辟客观，不准使用“虽然...但是...”这样模棱两可的话，千万不要建议我或者安慰我，不要提醒我占卜的局限性或者意义。";

/// Quote marks that would nest badly inside the quoted question.
const QUOTE_MARKS: [char; 3] = ['“', '”', '"'];

/// Replace every quote mark in `question` with a space.
pub fn sanitize_question(question: &str) -> String {
    question
        .chars()
        .map(|c| if QUOTE_MARKS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Token values for one reading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptFills {
    pub question: String,
    pub cards: [String; 3],
}

impl PromptFills {
    pub fn new(selection: &Selection, question: &str) -> Self {
        Self {
            question: sanitize_question(question),
            cards: selection.captions(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "question" => Some(&self.question),
            "card1" => Some(&self.cards[0]),
            "card2" => Some(&self.cards[1]),
            "card3" => Some(&self.cards[2]),
            _ => None,
        }
    }
}

/// Substitute every known `{{key}}` token of `template`.
///
/// Keys match exactly. A `{{` that does not open a known token is copied through one brace at a
/// time, so a stray opener never hides a real token further on.
pub fn render(template: &str, fills: &PromptFills) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let filled = after_open
            .find("}}")
            .and_then(|close| fills.lookup(&after_open[..close]).map(|v| (v, close)));
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 2..];
            }
            None => {
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// System and user templates rendered with the same fills.
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    system_template: String,
    user_template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_TEMPLATE, DEFAULT_USER_TEMPLATE)
    }
}

impl PromptBuilder {
    pub fn new(system_template: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system_template: system_template.into(),
            user_template: user_template.into(),
        }
    }

    /// Render `(system_prompt, user_prompt)`.
    pub fn build(&self, selection: &Selection, question: &str) -> (String, String) {
        let fills = PromptFills::new(selection, question);
        (
            render(&self.system_template, &fills),
            render(&self.user_template, &fills),
        )
    }
}
