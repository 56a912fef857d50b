pub mod annotations;
pub mod deck;

pub use annotations::TajweedRule;
pub use deck::{Ayah, DerivationRecord, Deck, Occurrence, Word};
