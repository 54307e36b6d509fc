use std::sync::{Arc, Mutex, OnceLock};

use image::RgbaImage;

use crate::deck::Deck;
use crate::foundation::error::ArcanaResult;
use crate::layout::shaper::register_family;

/// Raw font bytes, checked to contain at least one usable family.
#[derive(Clone, Debug)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl FontAsset {
    pub fn from_bytes(bytes: Vec<u8>) -> ArcanaResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family_name,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

/// Everything a reading is drawn from. Immutable once built; share it through `Arc`.
///
/// Icons are expected to be masked already; the compositor only resizes them.
#[derive(Debug)]
pub struct AssetBundle {
    pub deck: Deck,
    pub background: RgbaImage,
    pub font: FontAsset,
    pub asker_icon: RgbaImage,
    pub reader_icon: RgbaImage,
}

/// One-time, race-free construction of the shared [`AssetBundle`].
///
/// The first caller of [`AssetCell::get_or_try_init`] runs its initializer while later callers
/// wait; a failed initializer leaves the cell empty so nothing half-built is ever handed out.
#[derive(Debug, Default)]
pub struct AssetCell {
    cell: OnceLock<Arc<AssetBundle>>,
    init: Mutex<()>,
}

impl AssetCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Option<Arc<AssetBundle>> {
        self.cell.get().cloned()
    }

    pub fn get_or_try_init(
        &self,
        init: impl FnOnce() -> ArcanaResult<AssetBundle>,
    ) -> ArcanaResult<Arc<AssetBundle>> {
        if let Some(bundle) = self.cell.get() {
            return Ok(bundle.clone());
        }
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bundle) = self.cell.get() {
            return Ok(bundle.clone());
        }
        let bundle = Arc::new(init()?);
        tracing::info!(
            cards = bundle.deck.len(),
            font = %bundle.font.family_name(),
            "assets initialized"
        );
        Ok(self.cell.get_or_init(|| bundle).clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bundle.rs"]
mod tests;
