//! arcana draws three cards, asks a text backend to interpret them and composites the cards,
//! the question and the answer into one image.
//!
//! - Build an [`AssetBundle`] once (directly, via [`AssetBundle::load`] or through an
//!   [`AssetCell`])
//! - Create a [`Reader`] with an [`Interpreter`]
//! - Call [`Reader::run_sync`] for a finished [`Reading`], or [`Reader::run_async`] to get the
//!   cards and a placeholder image immediately and the answer through a callback
#![forbid(unsafe_code)]

pub mod assets;
pub mod deck;
pub mod foundation;
pub mod interpret;
pub mod layout;
pub mod prompt;
pub mod reading;
pub mod render;

pub use crate::assets::{AssetBundle, AssetCell, FontAsset};
pub use crate::deck::{Card, Deck, DrawnCard, Orientation, Selection, Selector};
pub use crate::foundation::config::{BackendConfig, CanvasLayout, ReaderConfig};
pub use crate::foundation::error::{ArcanaError, ArcanaResult};
pub use crate::interpret::{FixedInterpreter, Interpreter, OpenAiInterpreter};
pub use crate::layout::{Align, GlyphMetrics, TextShaper, wrap};
pub use crate::prompt::PromptBuilder;
pub use crate::reading::{PendingReading, Reader, Reading, ReadingState};
pub use crate::render::{Compositor, DisplayOptions};
