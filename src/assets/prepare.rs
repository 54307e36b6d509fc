//! One-time image preparation done while building an [`crate::assets::AssetBundle`].

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Compose the reading background: `portrait` scaled to the canvas height, faded out towards its
/// left and right edges and centred over black.
pub fn faded_background(portrait: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    if portrait.width() == 0 || portrait.height() == 0 {
        return canvas;
    }

    let scaled_w = ((portrait.width() as f64 * height as f64) / portrait.height() as f64)
        .round()
        .max(1.0) as u32;
    let scaled = imageops::resize(portrait, scaled_w, height, FilterType::Lanczos3);
    let half = scaled_w as f64 / 2.0;
    let left = (i64::from(width) - i64::from(scaled_w)) / 2;
    for (x, y, px) in scaled.enumerate_pixels() {
        let Ok(cx) = u32::try_from(left + i64::from(x)) else {
            continue;
        };
        if cx >= width {
            continue;
        }
        let keep = 1.0 - ((x as f64 - half).abs() / half).min(1.0);
        let alpha = px.0[3] as f64 / 255.0 * keep * keep;
        // Blended over opaque black, so the result stays opaque.
        let [r, g, b, _] = px.0;
        let scale = |c: u8| (c as f64 * alpha).round() as u8;
        canvas.put_pixel(cx, y, Rgba([scale(r), scale(g), scale(b), 255]));
    }
    canvas
}

/// Resize `icon` to `size`² and paint everything outside the inscribed circle black.
pub fn circle_icon(icon: &RgbaImage, size: u32) -> RgbaImage {
    let mut out = if icon.dimensions() == (size, size) {
        icon.clone()
    } else {
        imageops::resize(icon, size, size, FilterType::Lanczos3)
    };
    let r = size as f64 / 2.0;
    for (x, y, px) in out.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - r;
        let dy = y as f64 + 0.5 - r;
        if dx * dx + dy * dy > r * r {
            *px = Rgba([0, 0, 0, 255]);
        }
    }
    out
}
