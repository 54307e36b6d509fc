use super::*;

fn card(id: usize) -> Card {
    Card {
        id,
        name: format!("Card {id}"),
        localized_name: format!("牌{id}"),
        artwork: RgbaImage::new(2, 2),
    }
}

#[test]
fn deck_requires_three_cards() {
    let err = Deck::new(vec![card(0), card(1)]).unwrap_err();
    assert!(matches!(err, ArcanaError::Precondition(_)));
    assert_eq!(Deck::new(vec![card(0), card(1), card(2)]).unwrap().len(), 3);
}

#[test]
fn deck_rejects_duplicate_ids() {
    assert!(Deck::new(vec![card(0), card(1), card(1)]).is_err());
}

#[test]
fn caption_uses_fullwidth_parentheses() {
    let drawn = DrawnCard::new(Arc::new(card(7)), Orientation::Reversed);
    assert_eq!(drawn.caption(), "牌7（逆位）");
    let drawn = DrawnCard::new(Arc::new(card(7)), Orientation::Upright);
    assert_eq!(drawn.caption(), "牌7（正位）");
}

#[test]
fn selection_rejects_repeated_card() {
    let shared = Arc::new(card(0));
    let cards = [
        DrawnCard::new(shared.clone(), Orientation::Upright),
        DrawnCard::new(Arc::new(card(1)), Orientation::Upright),
        DrawnCard::new(shared, Orientation::Reversed),
    ];
    assert!(Selection::new(cards).is_err());
}

#[test]
fn selection_display_lists_captions_in_slot_order() {
    let cards = [
        DrawnCard::new(Arc::new(card(2)), Orientation::Upright),
        DrawnCard::new(Arc::new(card(0)), Orientation::Reversed),
        DrawnCard::new(Arc::new(card(1)), Orientation::Upright),
    ];
    let selection = Selection::new(cards).unwrap();
    assert_eq!(selection.to_string(), "牌2（正位）, 牌0（逆位）, 牌1（正位）");
}
