use rand::Rng;
use rand::seq::index;

use crate::deck::card::{Deck, DrawnCard, Orientation, Selection};
use crate::foundation::error::{ArcanaError, ArcanaResult};

/// Draws three distinct cards and flips each one independently.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    reversal_probability: f64,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            reversal_probability: 0.5,
        }
    }
}

impl Selector {
    pub fn new(reversal_probability: f64) -> ArcanaResult<Self> {
        if !reversal_probability.is_finite() || !(0.0..=1.0).contains(&reversal_probability) {
            return Err(ArcanaError::precondition(
                "reversal probability must be within [0, 1]",
            ));
        }
        Ok(Self {
            reversal_probability,
        })
    }

    pub fn reversal_probability(&self) -> f64 {
        self.reversal_probability
    }

    /// Draw from the thread-local generator.
    pub fn choose(&self, deck: &Deck) -> Selection {
        self.choose_with(deck, &mut rand::rng())
    }

    /// Draw from `rng`. Cards are sampled without replacement first; orientations are drawn
    /// afterwards, one per slot.
    pub fn choose_with<R: Rng + ?Sized>(&self, deck: &Deck, rng: &mut R) -> Selection {
        let picks = index::sample(rng, deck.len(), 3).into_vec();
        let cards = std::array::from_fn(|slot| {
            let orientation = if rng.random_bool(self.reversal_probability) {
                Orientation::Reversed
            } else {
                Orientation::Upright
            };
            DrawnCard::new(deck.cards()[picks[slot]].clone(), orientation)
        });
        // Distinct picks from a deck with unique ids always form a valid selection.
        Selection::from_distinct(cards)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/selector.rs"]
mod tests;
