use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ArcanaError, ArcanaResult};
use crate::prompt::{DEFAULT_SYSTEM_TEMPLATE, DEFAULT_USER_TEMPLATE};

/// Reading configuration. Every field has a default, so a config file only lists overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Probability that a drawn card lands reversed.
    pub reversal_probability: f64,
    /// Template for the system-role prompt.
    pub system_template: String,
    /// Template for the user-role prompt.
    pub user_template: String,
    /// Text shown in the answer region while a detached reading is pending.
    pub answer_placeholder: Option<String>,
    /// Canvas geometry used by the compositor.
    pub layout: CanvasLayout,
    /// Text backend settings.
    pub backend: BackendConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            reversal_probability: 0.5,
            system_template: DEFAULT_SYSTEM_TEMPLATE.to_string(),
            user_template: DEFAULT_USER_TEMPLATE.to_string(),
            answer_placeholder: Some("正在解读……".to_string()),
            layout: CanvasLayout::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Read a JSON config file; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> ArcanaResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the selector or compositor cannot work with.
    pub fn validate(&self) -> ArcanaResult<()> {
        let p = self.reversal_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ArcanaError::precondition(
                "reversal_probability must be within [0, 1]",
            ));
        }
        self.layout.validate()?;
        if self.backend.timeout_secs == 0 {
            return Err(ArcanaError::precondition("backend.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Pixel geometry of the composited reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    /// Horizontal gap around and between the three card slots.
    pub slot_span: u32,
    /// Y of the top edge of every card.
    pub card_top: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub icon_size: u32,
    pub caption_size_px: f32,
    pub body_size_px: f32,
    pub line_spacing: f32,
    /// Left edge of the question/answer column.
    pub text_left: u32,
    /// Wrap width of the question/answer column.
    pub text_width: u32,
    /// Gap between the bottom of the cards and the question/answer column.
    pub text_top_gap: u32,
    /// Vertical padding between stacked blocks.
    pub block_padding: u32,
    /// Gap between an icon and its label, and between a caption and its card.
    pub label_gap: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 720,
            slot_span: 100,
            card_top: 120,
            card_width: 120,
            card_height: 212,
            icon_size: 30,
            caption_size_px: 26.0,
            body_size_px: 20.0,
            line_spacing: 1.4,
            text_left: 100,
            text_width: 1000,
            text_top_gap: 24,
            block_padding: 12,
            label_gap: 8,
        }
    }
}

impl CanvasLayout {
    /// Width of one card slot.
    pub fn slot_width(&self) -> u32 {
        self.width.saturating_sub(self.slot_span.saturating_mul(4)) / 3
    }

    /// Horizontal centre of slot `idx` (0..3).
    pub fn slot_center(&self, idx: usize) -> u32 {
        let w = self.slot_width();
        let step = self.slot_span.saturating_add(w);
        self.slot_span
            .saturating_add(step.saturating_mul(idx as u32))
            .saturating_add(w / 2)
    }

    pub fn validate(&self) -> ArcanaResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ArcanaError::precondition("canvas size must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(ArcanaError::precondition("canvas size exceeds u16"));
        }
        if self.slot_span.saturating_mul(4) >= self.width {
            return Err(ArcanaError::precondition(
                "slot_span leaves no room for the cards",
            ));
        }
        if self.card_width == 0 || self.card_height == 0 || self.icon_size == 0 {
            return Err(ArcanaError::precondition(
                "card and icon sizes must be non-zero",
            ));
        }
        for (name, v) in [
            ("caption_size_px", self.caption_size_px),
            ("body_size_px", self.body_size_px),
            ("line_spacing", self.line_spacing),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ArcanaError::precondition(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// OpenAI-compatible chat completion endpoint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}
