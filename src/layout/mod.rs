//! Text measurement and line wrapping.

pub mod shaper;
pub mod wrap;

pub use shaper::{ShapedMetrics, TextBrushRgba8, TextShaper, TextStyle};
pub use wrap::{Align, FULL_WIDTH_GLYPH, GlyphMetrics, WrappedBlock, measure, wrap};
