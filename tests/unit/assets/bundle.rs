use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use image::Rgba;

use super::*;
use crate::deck::Card;
use crate::foundation::error::ArcanaError;

fn font() -> FontAsset {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    FontAsset::from_bytes(bytes).unwrap()
}

fn bundle() -> AssetBundle {
    let cards = (0..3)
        .map(|id| Card {
            id,
            name: format!("Card {id}"),
            localized_name: format!("牌{id}"),
            artwork: RgbaImage::from_pixel(4, 4, Rgba([id as u8, 0, 0, 255])),
        })
        .collect();
    AssetBundle {
        deck: Deck::new(cards).unwrap(),
        background: RgbaImage::new(8, 8),
        font: font(),
        asker_icon: RgbaImage::new(2, 2),
        reader_icon: RgbaImage::new(2, 2),
    }
}

#[test]
fn font_asset_reports_family() {
    let font = font();
    assert!(!font.family_name().trim().is_empty());
    assert!(!font.bytes().is_empty());
}

#[test]
fn font_asset_rejects_garbage() {
    assert!(FontAsset::from_bytes(b"definitely not a font".to_vec()).is_err());
}

#[test]
fn cell_initializes_exactly_once_under_races() {
    let cell = Arc::new(AssetCell::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cell = cell.clone();
            let calls = calls.clone();
            thread::spawn(move || {
                cell.get_or_try_init(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(bundle())
                })
                .unwrap()
            })
        })
        .collect();
    let bundles: Vec<Arc<AssetBundle>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for b in &bundles[1..] {
        assert!(Arc::ptr_eq(&bundles[0], b));
    }
}

#[test]
fn failed_initialization_leaves_cell_empty() {
    let cell = AssetCell::new();
    let err = cell
        .get_or_try_init(|| Err(ArcanaError::asset("missing cards.json")))
        .unwrap_err();
    assert!(matches!(err, ArcanaError::Asset(_)));
    assert!(cell.get().is_none());

    let ok = cell.get_or_try_init(|| Ok(bundle())).unwrap();
    assert!(Arc::ptr_eq(&ok, &cell.get().unwrap()));
}
