use std::sync::Arc;
use std::time::Instant;

use image::RgbaImage;
use tokio::task::JoinHandle;

use crate::assets::AssetBundle;
use crate::deck::{Selection, Selector};
use crate::foundation::config::{CanvasLayout, ReaderConfig};
use crate::foundation::error::{ArcanaError, ArcanaResult};
use crate::interpret::Interpreter;
use crate::prompt::PromptBuilder;
use crate::reading::state::{Lifecycle, ReadingState};
use crate::render::{Compositor, DisplayOptions};

/// A finished reading. Owned by the caller.
#[derive(Clone, Debug)]
pub struct Reading {
    pub selection: Selection,
    pub image: RgbaImage,
    pub text: String,
}

/// What [`Reader::run_async`] hands back before the interpretation arrives.
#[derive(Debug)]
pub struct PendingReading {
    pub selection: Selection,
    /// The reading with the placeholder (or nothing) in the answer region.
    pub image: RgbaImage,
    handle: JoinHandle<()>,
}

impl PendingReading {
    /// Stop the background task. A cancelled task never invokes its callback.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the background task, callback included, to finish.
    pub async fn join(self) -> ArcanaResult<()> {
        self.handle
            .await
            .map_err(|e| ArcanaError::Other(anyhow::anyhow!("reading task ended abnormally: {e}")))
    }
}

/// Runs readings against a shared asset bundle and one interpreter.
///
/// Cloning is cheap; clones share the bundle and the interpreter.
#[derive(Clone)]
pub struct Reader {
    interpreter: Arc<dyn Interpreter>,
    assets: Arc<AssetBundle>,
    selector: Selector,
    prompts: PromptBuilder,
    layout: Arc<CanvasLayout>,
}

impl Reader {
    pub fn new(
        interpreter: Arc<dyn Interpreter>,
        assets: Arc<AssetBundle>,
        config: &ReaderConfig,
    ) -> ArcanaResult<Self> {
        config.validate()?;
        Ok(Self {
            interpreter,
            assets,
            selector: Selector::new(config.reversal_probability)?,
            prompts: PromptBuilder::new(&config.system_template, &config.user_template),
            layout: Arc::new(config.layout.clone()),
        })
    }

    pub fn assets(&self) -> &Arc<AssetBundle> {
        &self.assets
    }

    pub fn choose(&self) -> Selection {
        let selection = self.selector.choose(&self.assets.deck);
        tracing::info!(cards = %selection, "chosen cards");
        selection
    }

    /// `(system_prompt, user_prompt)` for `selection` and `question`.
    pub fn build_prompts(&self, selection: &Selection, question: &str) -> (String, String) {
        self.prompts.build(selection, question)
    }

    pub fn render(
        &self,
        selection: &Selection,
        question: &str,
        answer: &str,
        options: &DisplayOptions,
    ) -> ArcanaResult<RgbaImage> {
        Compositor::new(&self.assets, &self.layout).render(selection, question, answer, options)
    }

    /// One interpreter round-trip. Errors come back wrapped as [`ArcanaError::Interpretation`].
    pub async fn interpret(&self, selection: &Selection, question: &str) -> ArcanaResult<String> {
        let (system, user) = self.build_prompts(selection, question);
        tracing::info!("calling interpreter");
        let started = Instant::now();
        let result = self.interpreter.chat(&system, &user).await;
        tracing::info!(
            elapsed_s = started.elapsed().as_secs_f64(),
            "interpreter returned"
        );
        result.map_err(|e| {
            tracing::warn!(error = %e, "interpreter failed");
            ArcanaError::interpretation(e)
        })
    }

    /// Select, interpret and render in one go. No image is produced when interpretation fails.
    pub async fn run_sync(&self, question: &str, options: &DisplayOptions) -> ArcanaResult<Reading> {
        let mut lifecycle = Lifecycle::new();
        let selection = self.choose();
        lifecycle.advance(ReadingState::Selected);

        lifecycle.advance(ReadingState::InterpretationPending);
        let text = match self.interpret(&selection, question).await {
            Ok(text) => text,
            Err(e) => {
                lifecycle.advance(ReadingState::Failed);
                return Err(e);
            }
        };
        lifecycle.advance(ReadingState::InterpretationDone);

        let image = self.render(&selection, question, &text, options)?;
        lifecycle.advance(ReadingState::Rendered);
        lifecycle.advance(ReadingState::Complete);

        Ok(Reading {
            selection,
            image,
            text,
        })
    }

    /// Select and render right away, then interpret in a spawned task.
    ///
    /// The returned image carries `options.placeholder` (or nothing) as the answer. When the
    /// task finishes it re-renders with the real answer and calls `callback` exactly once with
    /// the final reading or the error that stopped it. Must be called inside a Tokio runtime.
    pub fn run_async<F>(
        &self,
        question: &str,
        options: &DisplayOptions,
        callback: F,
    ) -> ArcanaResult<PendingReading>
    where
        F: FnOnce(ArcanaResult<Reading>) + Send + 'static,
    {
        let mut lifecycle = Lifecycle::new();
        let selection = self.choose();
        lifecycle.advance(ReadingState::Selected);

        let placeholder = options.placeholder.as_deref().unwrap_or("");
        let image = self.render(&selection, question, placeholder, options)?;
        lifecycle.advance(ReadingState::InterpretationPending);

        let reader = self.clone();
        let task_selection = selection.clone();
        let question = question.to_string();
        let options = options.clone();
        let handle = tokio::spawn(async move {
            let outcome = reader
                .finish_reading(&mut lifecycle, task_selection, &question, &options)
                .await;
            if outcome.is_err() && !lifecycle.state().is_terminal() {
                lifecycle.advance(ReadingState::Failed);
            }
            callback(outcome);
        });

        Ok(PendingReading {
            selection,
            image,
            handle,
        })
    }

    async fn finish_reading(
        &self,
        lifecycle: &mut Lifecycle,
        selection: Selection,
        question: &str,
        options: &DisplayOptions,
    ) -> ArcanaResult<Reading> {
        let text = self.interpret(&selection, question).await?;
        lifecycle.advance(ReadingState::InterpretationDone);
        let image = self.render(&selection, question, &text, options)?;
        lifecycle.advance(ReadingState::Rendered);
        lifecycle.advance(ReadingState::Complete);
        Ok(Reading {
            selection,
            image,
            text,
        })
    }
}
