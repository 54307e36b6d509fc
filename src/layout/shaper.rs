use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::error::{ArcanaError, ArcanaResult};
use crate::layout::wrap::{FULL_WIDTH_GLYPH, GlyphMetrics};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Size and color of a run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: TextBrushRgba8,
}

impl TextStyle {
    pub fn white(size_px: f32) -> Self {
        Self {
            size_px,
            color: TextBrushRgba8::WHITE,
        }
    }
}

/// Register `font_bytes` with `font_ctx` and return the family name Parley knows it by.
pub(crate) fn register_family(
    font_ctx: &mut parley::FontContext,
    font_bytes: &[u8],
) -> ArcanaResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        ArcanaError::precondition("no font families registered from font bytes")
    })?;

    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| ArcanaError::precondition("registered font family has no name"))?
        .to_string())
}

/// Shapes single lines of text with one registered font.
///
/// Line breaking is left to [`crate::layout::wrap`]; every layout produced here is one line.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextShaper {
    pub fn new(font_bytes: &[u8]) -> ArcanaResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, font_bytes)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(&mut self, text: &str, style: TextStyle) -> parley::Layout<TextBrushRgba8> {
        let family_name = self.family_name.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(style.color));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Sum of glyph advances of `text`, trailing whitespace included.
    pub fn advance_of(&mut self, text: &str, size_px: f32) -> f32 {
        let layout = self.layout_line(text, TextStyle::white(size_px));
        layout_advance(&layout)
    }

    /// Height of one line at `size_px`.
    pub fn line_height(&mut self, size_px: f32) -> f32 {
        let mut buf = [0u8; 4];
        let layout = self.layout_line(
            FULL_WIDTH_GLYPH.encode_utf8(&mut buf),
            TextStyle::white(size_px),
        );
        layout.height()
    }

    /// Glyph metrics at `size_px`, cached per character.
    pub fn metrics(&mut self, size_px: f32) -> ShapedMetrics<'_> {
        ShapedMetrics {
            shaper: self,
            size_px,
            advances: HashMap::new(),
            line_height: None,
        }
    }
}

fn layout_advance(layout: &parley::Layout<TextBrushRgba8>) -> f32 {
    let mut advance = 0.0;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            advance += run.glyphs().map(|g| g.advance).sum::<f32>();
        }
    }
    advance
}

/// [`GlyphMetrics`] backed by a [`TextShaper`].
pub struct ShapedMetrics<'a> {
    shaper: &'a mut TextShaper,
    size_px: f32,
    advances: HashMap<char, f32>,
    line_height: Option<f32>,
}

impl GlyphMetrics for ShapedMetrics<'_> {
    fn advance(&mut self, ch: char) -> f32 {
        if let Some(&w) = self.advances.get(&ch) {
            return w;
        }
        let w = if ch.is_whitespace() {
            // Measured between two glyphs so line-end whitespace trimming cannot hide it.
            let framed = format!("x{ch}x");
            self.shaper.advance_of(&framed, self.size_px) - self.shaper.advance_of("xx", self.size_px)
        } else {
            let mut buf = [0u8; 4];
            self.shaper.advance_of(ch.encode_utf8(&mut buf), self.size_px)
        };
        self.advances.insert(ch, w);
        w
    }

    fn line_height(&mut self) -> f32 {
        if let Some(h) = self.line_height {
            return h;
        }
        let h = self.shaper.line_height(self.size_px);
        self.line_height = Some(h);
        h
    }
}
