//! Greedy glyph-by-glyph wrapping for mixed CJK and Latin text.
//!
//! Whitespace is widened so that a space lines up with one full-width glyph: each space becomes
//! `round(advance('中') / advance(' '))` spaces and a tab twice that.

/// Glyph used to size whitespace.
pub const FULL_WIDTH_GLYPH: char = '中';

/// Horizontal advances and line height of the active face at the active size.
pub trait GlyphMetrics {
    fn advance(&mut self, ch: char) -> f32;
    fn line_height(&mut self) -> f32;
}

/// Horizontal alignment of a line inside its block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    fn factor(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Number of spaces emitted per source space, and their total advance.
fn whitespace_run(metrics: &mut impl GlyphMetrics) -> (usize, f32) {
    let space = metrics.advance(' ');
    let full = metrics.advance(FULL_WIDTH_GLYPH);
    if !space.is_finite() || space <= 0.0 {
        return (1, full.max(0.0));
    }
    let n = (full / space).round().max(1.0) as usize;
    (n, n as f32 * space)
}

/// Total advance of `s` as drawn.
pub fn measure(s: &str, metrics: &mut impl GlyphMetrics) -> f32 {
    s.chars().map(|c| metrics.advance(c)).sum()
}

/// Break `text` into lines no wider than `max_width`.
///
/// Every source line yields at least one output line, so blank lines survive. A glyph wider than
/// `max_width` is put on a line of its own. A non-positive width yields no lines at all.
pub fn wrap(text: &str, max_width: f32, metrics: &mut impl GlyphMetrics) -> Vec<String> {
    if !max_width.is_finite() || max_width <= 0.0 {
        return Vec::new();
    }
    let (spaces, space_width) = whitespace_run(metrics);

    let mut out = Vec::new();
    for source in text.split('\n') {
        let source = source.strip_suffix('\r').unwrap_or(source);
        let mut line = String::new();
        let mut width = 0.0f32;
        for ch in source.chars() {
            let (repeat, advance) = match ch {
                '\t' => (spaces * 2, space_width * 2.0),
                c if c.is_whitespace() => (spaces, space_width),
                c => (1, metrics.advance(c)),
            };
            if !line.is_empty() && width + advance > max_width {
                out.push(std::mem::take(&mut line));
                width = 0.0;
            }
            if ch.is_whitespace() {
                line.extend(std::iter::repeat_n(' ', repeat));
            } else {
                line.push(ch);
            }
            width += advance;
        }
        out.push(line);
    }
    out
}

/// A wrapped paragraph resolved against its anchor.
///
/// `(ax, ay)` is a fractional point of the block's bounding box (`max_width` wide) that lands on
/// the anchor: `(0, 0)` puts the top-left corner there, `(1, 1)` the bottom-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedBlock {
    pub lines: Vec<String>,
    pub line_widths: Vec<f32>,
    pub line_height: f32,
    pub spacing: f32,
    pub max_width: f32,
    pub left: f32,
    pub top: f32,
    pub height: f32,
}

impl WrappedBlock {
    #[allow(clippy::too_many_arguments)]
    pub fn layout(
        text: &str,
        x: f32,
        y: f32,
        ax: f32,
        ay: f32,
        max_width: f32,
        spacing: f32,
        metrics: &mut impl GlyphMetrics,
    ) -> Self {
        let lines = wrap(text, max_width, metrics);
        let line_widths = lines.iter().map(|l| measure(l, metrics)).collect();
        let line_height = metrics.line_height();
        let height = if lines.is_empty() {
            0.0
        } else {
            // The last line carries no trailing gap.
            lines.len() as f32 * line_height * spacing - (spacing - 1.0) * line_height
        };
        let max_width = max_width.max(0.0);
        Self {
            lines,
            line_widths,
            line_height,
            spacing,
            max_width,
            left: x - ax * max_width,
            top: y - ay * height,
            height,
        }
    }

    /// Top-left corner of line `idx` under `align`.
    pub fn line_origin(&self, idx: usize, align: Align) -> (f32, f32) {
        let width = self.line_widths.get(idx).copied().unwrap_or(0.0);
        let x = self.left + align.factor() * (self.max_width - width);
        let y = self.top + idx as f32 * self.line_height * self.spacing;
        (x, y)
    }

    /// Y just below the block.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
