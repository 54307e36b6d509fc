use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::error::{ArcanaError, ArcanaResult};

/// One card of the deck. Never mutated after loading; selections share it through `Arc`.
#[derive(Debug)]
pub struct Card {
    /// Position of the card in the deck data, which is also its artwork index.
    pub id: usize,
    pub name: String,
    pub localized_name: String,
    pub artwork: RgbaImage,
}

/// Orientation a card lands in when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    /// Localized label used in captions and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Upright => "正位",
            Self::Reversed => "逆位",
        }
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed)
    }
}

/// A card bound to the orientation it was drawn in.
#[derive(Clone, Debug)]
pub struct DrawnCard {
    pub card: Arc<Card>,
    pub orientation: Orientation,
}

impl DrawnCard {
    pub fn new(card: Arc<Card>, orientation: Orientation) -> Self {
        Self { card, orientation }
    }

    /// `"{localized name}（{orientation label}）"`, shared by prompts and captions.
    pub fn caption(&self) -> String {
        format!("{}（{}）", self.card.localized_name, self.orientation.label())
    }
}

/// The ordered triple of drawn cards of one reading. Slot order maps to layout order.
#[derive(Clone, Debug)]
pub struct Selection {
    cards: [DrawnCard; 3],
}

impl Selection {
    /// Build a selection, rejecting repeated cards.
    pub fn new(cards: [DrawnCard; 3]) -> ArcanaResult<Self> {
        let [a, b, c] = &cards;
        if a.card.id == b.card.id || a.card.id == c.card.id || b.card.id == c.card.id {
            return Err(ArcanaError::precondition(
                "a selection must hold three distinct cards",
            ));
        }
        Ok(Self { cards })
    }

    pub(crate) fn from_distinct(cards: [DrawnCard; 3]) -> Self {
        debug_assert!(Self::new(cards.clone()).is_ok());
        Self { cards }
    }

    pub fn cards(&self) -> &[DrawnCard; 3] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnCard> {
        self.cards.iter()
    }

    pub fn captions(&self) -> [String; 3] {
        std::array::from_fn(|i| self.cards[i].caption())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.captions();
        write!(f, "{a}, {b}, {c}")
    }
}

/// Immutable card catalogue. Holds at least three cards with unique ids.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Arc<Card>>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> ArcanaResult<Self> {
        if cards.len() < 3 {
            return Err(ArcanaError::precondition(format!(
                "a deck needs at least 3 cards, got {}",
                cards.len()
            )));
        }
        let mut ids: Vec<usize> = cards.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != cards.len() {
            return Err(ArcanaError::precondition("deck card ids must be unique"));
        }
        Ok(Self {
            cards: cards.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Arc<Card>> {
        self.cards.get(idx)
    }

    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/card.rs"]
mod tests;
