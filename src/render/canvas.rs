use std::sync::Arc;

use image::RgbaImage;

use crate::assets::FontAsset;
use crate::assets::decode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::foundation::error::{ArcanaError, ArcanaResult};
use crate::layout::{Align, GlyphMetrics, TextShaper, TextStyle, WrappedBlock, measure};

/// A fixed-size drawing surface. Draw calls are recorded and rasterized by [`Canvas::finish`].
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    font: vello_cpu::peniko::FontData,
}

impl Canvas {
    pub fn new(width: u32, height: u32, font: &FontAsset) -> ArcanaResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ArcanaError::precondition("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ArcanaError::precondition("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(ArcanaError::precondition("canvas size must be non-zero"));
        }
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            font,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn reset_paint_state(&mut self) {
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Cover the whole canvas with a straight-alpha RGBA color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        self.reset_paint_state();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Paint `img` with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, img: &RgbaImage, x: f32, y: f32) -> ArcanaResult<()> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }
        let paint = image_paint(img)?;
        self.reset_paint_state();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        Ok(())
    }

    /// Draw one line of text with its layout box's top-left corner at `(x, y)`.
    pub fn draw_text(
        &mut self,
        shaper: &mut TextShaper,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = shaper.layout_line(text, style);
        self.reset_paint_state();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Draw one line so that the fractional point `(ax, ay)` of its box lands on `(x, y)`.
    /// Returns the box size.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_anchored(
        &mut self,
        shaper: &mut TextShaper,
        text: &str,
        x: f32,
        y: f32,
        ax: f32,
        ay: f32,
        style: TextStyle,
    ) -> (f32, f32) {
        let (w, h) = {
            let mut metrics = shaper.metrics(style.size_px);
            let w = measure(text, &mut metrics);
            let h = metrics.line_height();
            (w, h)
        };
        self.draw_text(shaper, text, x - ax * w, y - ay * h, style);
        (w, h)
    }

    /// Wrap `text` to `max_width`, anchor the block at `(x, y)` and draw every line with
    /// `align`. Returns the Y just below the block.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_wrapped(
        &mut self,
        shaper: &mut TextShaper,
        text: &str,
        x: f32,
        y: f32,
        ax: f32,
        ay: f32,
        max_width: f32,
        spacing: f32,
        align: Align,
        style: TextStyle,
    ) -> f32 {
        let block = {
            let mut metrics = shaper.metrics(style.size_px);
            WrappedBlock::layout(text, x, y, ax, ay, max_width, spacing, &mut metrics)
        };
        for (idx, line) in block.lines.iter().enumerate() {
            let (lx, ly) = block.line_origin(idx, align);
            self.draw_text(shaper, line, lx, ly, style);
        }
        block.bottom()
    }

    /// Rasterize everything drawn so far into a straight-alpha image.
    pub fn finish(mut self) -> RgbaImage {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        // Buffer length is width * height * 4 by construction.
        RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), bytes)
            .unwrap_or_else(|| RgbaImage::new(u32::from(self.width), u32::from(self.height)))
    }
}

fn image_paint(img: &RgbaImage) -> ArcanaResult<vello_cpu::Image> {
    let (width, height) = img.dimensions();
    let w: u16 = width
        .try_into()
        .map_err(|_| ArcanaError::precondition("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ArcanaError::precondition("image height exceeds u16"))?;

    let mut bytes = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut bytes);
    // Pixmap stores PremulRgba8; the bytes are premultiplied above.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
