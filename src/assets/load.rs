//! Filesystem layout of an asset directory:
//!
//! - `cards.json`: array of `{ "name", "zh_name" }`, paired by index with `{index}.jpg|png`
//! - `font.ttf|otf`
//! - `reader.jpg|png`: portrait faded into the background
//! - `asker_icon.*`, `reader_icon.*`: default avatars, circle-masked on load

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::Deserialize;

use crate::assets::bundle::{AssetBundle, FontAsset};
use crate::assets::decode::read_image;
use crate::assets::prepare::{circle_icon, faded_background};
use crate::deck::{Card, Deck};
use crate::foundation::config::CanvasLayout;
use crate::foundation::error::{ArcanaError, ArcanaResult};

const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg"];
const FONT_EXTS: &[&str] = &["ttf", "otf"];

#[derive(Deserialize)]
struct CardRecord {
    name: String,
    #[serde(alias = "zh_name")]
    localized_name: String,
}

fn find_file(root: &Path, stem: &str, exts: &[&str]) -> ArcanaResult<PathBuf> {
    exts.iter()
        .map(|ext| root.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            ArcanaError::asset(format!(
                "missing '{stem}.{{{}}}' in '{}'",
                exts.join(","),
                root.display()
            ))
        })
}

fn fit_exact(img: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img;
    }
    imageops::resize(&img, width, height, FilterType::Lanczos3)
}

/// Load `cards.json` and the artwork paired with each record by index.
pub fn load_deck(root: &Path, card_width: u32, card_height: u32) -> ArcanaResult<Deck> {
    let path = root.join("cards.json");
    let raw = std::fs::read_to_string(&path).map_err(|e| {
        ArcanaError::asset(format!("failed to read '{}': {e}", path.display()))
    })?;
    let records: Vec<CardRecord> = serde_json::from_str(&raw)?;

    let mut cards = Vec::with_capacity(records.len());
    for (id, record) in records.into_iter().enumerate() {
        let art_path = find_file(root, &id.to_string(), IMAGE_EXTS)?;
        let artwork = fit_exact(read_image(&art_path)?, card_width, card_height);
        cards.push(Card {
            id,
            name: record.name,
            localized_name: record.localized_name,
            artwork,
        });
    }
    Deck::new(cards)
}

pub fn load_font(root: &Path) -> ArcanaResult<FontAsset> {
    let path = find_file(root, "font", FONT_EXTS)?;
    let bytes = std::fs::read(&path).map_err(|e| {
        ArcanaError::asset(format!("failed to read font '{}': {e}", path.display()))
    })?;
    FontAsset::from_bytes(bytes)
}

impl AssetBundle {
    /// Load and prepare every asset under `root`. Fails on the first missing or broken file.
    pub fn load(root: &Path, layout: &CanvasLayout) -> ArcanaResult<Self> {
        let deck = load_deck(root, layout.card_width, layout.card_height)?;
        let font = load_font(root)?;
        let portrait = read_image(&find_file(root, "reader", IMAGE_EXTS)?)?;
        let background = faded_background(&portrait, layout.width, layout.height);
        let asker_icon = circle_icon(
            &read_image(&find_file(root, "asker_icon", IMAGE_EXTS)?)?,
            layout.icon_size,
        );
        let reader_icon = circle_icon(
            &read_image(&find_file(root, "reader_icon", IMAGE_EXTS)?)?,
            layout.icon_size,
        );
        Ok(Self {
            deck,
            background,
            font,
            asker_icon,
            reader_icon,
        })
    }
}
