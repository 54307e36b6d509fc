use std::borrow::Cow;
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::AssetBundle;
use crate::deck::{DrawnCard, Selection};
use crate::foundation::config::CanvasLayout;
use crate::foundation::error::ArcanaResult;
use crate::layout::{Align, TextShaper, TextStyle};
use crate::render::canvas::Canvas;

/// Who is asking, who is answering, and what to show while the answer is pending.
#[derive(Clone, Debug)]
pub struct DisplayOptions {
    pub asker_label: String,
    /// Replaces the bundle's asker icon when set.
    pub asker_icon: Option<Arc<RgbaImage>>,
    pub reader_label: String,
    /// Replaces the bundle's reader icon when set.
    pub reader_icon: Option<Arc<RgbaImage>>,
    /// Answer text for the first image of a detached reading.
    pub placeholder: Option<String>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            asker_label: "提问者".to_string(),
            asker_icon: None,
            reader_label: "占卜师".to_string(),
            reader_icon: None,
            placeholder: None,
        }
    }
}

/// A new image holding `img` turned upside down. The source is left untouched.
pub fn rotate_half_turn(img: &RgbaImage) -> RgbaImage {
    imageops::rotate180(img)
}

/// `icon` at `size`², resized only when it is not that size already.
pub fn fit_icon(icon: &RgbaImage, size: u32) -> Cow<'_, RgbaImage> {
    if icon.dimensions() == (size, size) {
        Cow::Borrowed(icon)
    } else {
        Cow::Owned(imageops::resize(icon, size, size, FilterType::Lanczos3))
    }
}

fn oriented_artwork(drawn: &DrawnCard) -> Cow<'_, RgbaImage> {
    if drawn.orientation.is_reversed() {
        Cow::Owned(rotate_half_turn(&drawn.card.artwork))
    } else {
        Cow::Borrowed(&drawn.card.artwork)
    }
}

/// Paints a reading: background, the three cards with captions, then the question and answer
/// stacked under their speakers' icons.
pub struct Compositor<'a> {
    assets: &'a AssetBundle,
    layout: &'a CanvasLayout,
}

impl<'a> Compositor<'a> {
    pub fn new(assets: &'a AssetBundle, layout: &'a CanvasLayout) -> Self {
        Self { assets, layout }
    }

    pub fn render(
        &self,
        selection: &Selection,
        question: &str,
        answer: &str,
        options: &DisplayOptions,
    ) -> ArcanaResult<RgbaImage> {
        let layout = self.layout;
        layout.validate()?;
        let mut canvas = Canvas::new(layout.width, layout.height, &self.assets.font)?;
        let mut shaper = TextShaper::new(self.assets.font.bytes())?;

        canvas.fill([0, 0, 0, 255]);
        canvas.draw_image(&self.assets.background, 0.0, 0.0)?;

        let caption_style = TextStyle::white(layout.caption_size_px);
        let card_top = layout.card_top as f32;
        let mut cards_bottom = card_top;
        for (slot, drawn) in selection.iter().enumerate() {
            let art = oriented_artwork(drawn);
            let cx = layout.slot_center(slot) as f32;
            canvas.draw_image(&art, cx - (art.width() / 2) as f32, card_top)?;
            canvas.draw_text_anchored(
                &mut shaper,
                &drawn.caption(),
                cx,
                card_top - layout.label_gap as f32,
                0.5,
                1.0,
                caption_style,
            );
            cards_bottom = cards_bottom.max(card_top + art.height() as f32);
        }

        let asker_icon = options
            .asker_icon
            .as_deref()
            .unwrap_or(&self.assets.asker_icon);
        let reader_icon = options
            .reader_icon
            .as_deref()
            .unwrap_or(&self.assets.reader_icon);

        let mut y = cards_bottom + layout.text_top_gap as f32;
        y = self.draw_speaker(&mut canvas, &mut shaper, asker_icon, &options.asker_label, y)?;
        y = self.draw_body(&mut canvas, &mut shaper, question, y);
        y = self.draw_speaker(&mut canvas, &mut shaper, reader_icon, &options.reader_label, y)?;
        self.draw_body(&mut canvas, &mut shaper, answer, y);

        Ok(canvas.finish())
    }

    /// Icon at the text column's left edge with the label centred beside it.
    /// Returns the Y below the icon.
    fn draw_speaker(
        &self,
        canvas: &mut Canvas,
        shaper: &mut TextShaper,
        icon: &RgbaImage,
        label: &str,
        top: f32,
    ) -> ArcanaResult<f32> {
        let size = self.layout.icon_size;
        let icon = fit_icon(icon, size);
        let left = self.layout.text_left as f32;
        canvas.draw_image(&icon, left, top)?;
        canvas.draw_text_anchored(
            shaper,
            label,
            left + (size + self.layout.label_gap) as f32,
            top + size as f32 / 2.0,
            0.0,
            0.5,
            TextStyle::white(self.layout.body_size_px),
        );
        Ok(top + size as f32)
    }

    fn draw_body(&self, canvas: &mut Canvas, shaper: &mut TextShaper, text: &str, top: f32) -> f32 {
        let padding = self.layout.block_padding as f32;
        let bottom = canvas.draw_wrapped(
            shaper,
            text,
            self.layout.text_left as f32,
            top + padding,
            0.0,
            0.0,
            self.layout.text_width as f32,
            self.layout.line_spacing,
            Align::Left,
            TextStyle::white(self.layout.body_size_px),
        );
        bottom + padding
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
