use image::Rgba;

use super::*;
use crate::assets::FontAsset;
use crate::deck::{Card, Deck, Orientation};
use crate::foundation::error::ArcanaError;

const RED: Rgba<u8> = Rgba([220, 20, 20, 255]);
const BLUE: Rgba<u8> = Rgba([20, 20, 220, 255]);
const GREEN: Rgba<u8> = Rgba([20, 220, 20, 255]);

/// 120x212 artwork: red top half, blue bottom half.
fn two_tone_art() -> RgbaImage {
    RgbaImage::from_fn(120, 212, |_, y| if y < 106 { RED } else { BLUE })
}

fn bundle() -> AssetBundle {
    let cards = (0..3)
        .map(|id| Card {
            id,
            name: format!("Card {id}"),
            localized_name: format!("Card{id}"),
            artwork: two_tone_art(),
        })
        .collect();
    AssetBundle {
        deck: Deck::new(cards).unwrap(),
        background: RgbaImage::from_pixel(1200, 720, Rgba([0, 0, 0, 255])),
        font: FontAsset::from_bytes(std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap())
            .unwrap(),
        asker_icon: RgbaImage::from_pixel(30, 30, RED),
        reader_icon: RgbaImage::from_pixel(30, 30, RED),
    }
}

fn selection(bundle: &AssetBundle, orientations: [Orientation; 3]) -> Selection {
    let cards = bundle.deck.cards();
    Selection::new(std::array::from_fn(|i| {
        DrawnCard::new(cards[i].clone(), orientations[i])
    }))
    .unwrap()
}

fn close(a: &Rgba<u8>, b: &Rgba<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 8)
}

#[test]
fn half_turn_twice_is_identity_and_source_is_untouched() {
    let art = RgbaImage::from_fn(7, 5, |x, y| Rgba([x as u8 * 30, y as u8 * 40, 7, 255]));
    let before = art.clone();
    let once = rotate_half_turn(&art);
    assert_eq!(art, before);
    assert_ne!(once, art);
    assert_eq!(once.get_pixel(0, 0), art.get_pixel(6, 4));
    assert_eq!(rotate_half_turn(&once), art);
}

#[test]
fn fit_icon_only_resizes_when_needed() {
    let sized = RgbaImage::new(30, 30);
    assert!(matches!(fit_icon(&sized, 30), Cow::Borrowed(_)));
    let big = RgbaImage::new(64, 48);
    let fitted = fit_icon(&big, 30);
    assert!(matches!(fitted, Cow::Owned(_)));
    assert_eq!(fitted.dimensions(), (30, 30));
}

#[test]
fn renders_at_reference_size() {
    let bundle = bundle();
    let layout = CanvasLayout::default();
    let sel = selection(&bundle, [Orientation::Upright; 3]);
    let img = Compositor::new(&bundle, &layout)
        .render(&sel, "Q", "A", &DisplayOptions::default())
        .unwrap();
    assert_eq!(img.dimensions(), (1200, 720));
}

#[test]
fn unvalidated_layout_is_a_precondition_error() {
    let bundle = bundle();
    let layout = CanvasLayout {
        width: 300,
        slot_span: 100,
        ..CanvasLayout::default()
    };
    let sel = selection(&bundle, [Orientation::Upright; 3]);
    let err = Compositor::new(&bundle, &layout)
        .render(&sel, "Q", "A", &DisplayOptions::default())
        .unwrap_err();
    assert!(matches!(err, ArcanaError::Precondition(_)), "{err}");
}

#[test]
fn reversed_cards_are_pasted_upside_down() {
    let bundle = bundle();
    let layout = CanvasLayout::default();
    let sel = selection(
        &bundle,
        [Orientation::Upright, Orientation::Reversed, Orientation::Upright],
    );
    let img = Compositor::new(&bundle, &layout)
        .render(&sel, "Q", "A", &DisplayOptions::default())
        .unwrap();

    // Sample the middle of each card's upper and lower quarter.
    let top = layout.card_top + 50;
    let bottom = layout.card_top + 160;
    for slot in 0..3 {
        let cx = layout.slot_center(slot);
        let (want_top, want_bottom) = if slot == 1 { (BLUE, RED) } else { (RED, BLUE) };
        assert!(close(img.get_pixel(cx, top), &want_top), "slot {slot} top");
        assert!(close(img.get_pixel(cx, bottom), &want_bottom), "slot {slot} bottom");
    }
    // The deck artwork itself stays upright.
    assert_eq!(bundle.deck.cards()[1].artwork.get_pixel(60, 10), &RED);
}

#[test]
fn caller_icons_replace_bundle_defaults() {
    let bundle = bundle();
    let layout = CanvasLayout::default();
    let sel = selection(&bundle, [Orientation::Upright; 3]);
    let options = DisplayOptions {
        asker_icon: Some(Arc::new(RgbaImage::from_pixel(60, 60, GREEN))),
        ..DisplayOptions::default()
    };
    let img = Compositor::new(&bundle, &layout)
        .render(&sel, "Q", "A", &options)
        .unwrap();

    let icon_top = layout.card_top + layout.card_height + layout.text_top_gap;
    let px = img.get_pixel(layout.text_left + 15, icon_top + 15);
    assert!(close(px, &GREEN), "{px:?}");
}

#[test]
fn answer_text_changes_the_image() {
    let bundle = bundle();
    let layout = CanvasLayout::default();
    let sel = selection(&bundle, [Orientation::Upright; 3]);
    let compositor = Compositor::new(&bundle, &layout);
    let blank = compositor
        .render(&sel, "Q", "", &DisplayOptions::default())
        .unwrap();
    let answered = compositor
        .render(&sel, "Q", "The tower falls.", &DisplayOptions::default())
        .unwrap();
    assert_ne!(blank, answered);

    let again = compositor
        .render(&sel, "Q", "The tower falls.", &DisplayOptions::default())
        .unwrap();
    assert_eq!(answered, again);
}
