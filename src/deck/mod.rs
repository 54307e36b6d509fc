//! Card catalogue and three-card selection.

pub mod card;
pub mod selector;

pub use card::{Card, Deck, DrawnCard, Orientation, Selection};
pub use selector::Selector;
