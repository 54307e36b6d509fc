use std::collections::HashSet;
use std::sync::Arc;

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::deck::card::Card;

fn deck(n: usize) -> Deck {
    Deck::new(
        (0..n)
            .map(|id| Card {
                id,
                name: format!("Card {id}"),
                localized_name: format!("牌{id}"),
                artwork: RgbaImage::new(1, 1),
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn draws_three_distinct_cards() {
    let mut rng = StdRng::seed_from_u64(7);
    let selector = Selector::default();
    for n in [3, 4, 22, 78] {
        let deck = deck(n);
        for _ in 0..200 {
            let selection = selector.choose_with(&deck, &mut rng);
            let ids: HashSet<usize> = selection.iter().map(|c| c.card.id).collect();
            assert_eq!(ids.len(), 3);
            assert!(ids.iter().all(|&id| id < n));
        }
    }
}

#[test]
fn three_card_deck_uses_every_card() {
    let deck = deck(3);
    let selection = Selector::default().choose_with(&deck, &mut StdRng::seed_from_u64(1));
    let mut ids: Vec<usize> = selection.iter().map(|c| c.card.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn reversal_frequency_tracks_probability_per_slot() {
    let deck = deck(22);
    let mut rng = StdRng::seed_from_u64(42);
    for p in [0.0, 0.4, 0.5, 1.0] {
        let selector = Selector::new(p).unwrap();
        let draws = 20_000;
        let mut reversed = [0usize; 3];
        for _ in 0..draws {
            let selection = selector.choose_with(&deck, &mut rng);
            for (slot, drawn) in selection.iter().enumerate() {
                if drawn.orientation.is_reversed() {
                    reversed[slot] += 1;
                }
            }
        }
        for count in reversed {
            let freq = count as f64 / draws as f64;
            assert!((freq - p).abs() < 0.02, "p={p} freq={freq}");
        }
    }
}

#[test]
fn every_card_can_be_drawn() {
    let deck = deck(10);
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        for drawn in Selector::default().choose_with(&deck, &mut rng).iter() {
            seen.insert(drawn.card.id);
        }
    }
    assert_eq!(seen.len(), 10);
}

#[test]
fn selection_shares_deck_artwork() {
    let deck = deck(3);
    let selection = Selector::default().choose(&deck);
    for drawn in selection.iter() {
        let original = deck.get(drawn.card.id).unwrap();
        assert!(Arc::ptr_eq(original, &drawn.card));
    }
}

#[test]
fn invalid_probability_is_rejected() {
    assert!(Selector::new(-0.1).is_err());
    assert!(Selector::new(f64::NAN).is_err());
    assert_eq!(Selector::new(0.4).unwrap().reversal_probability(), 0.4);
}
