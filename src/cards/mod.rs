//! Card system: templates, match cards, keywords, costs, and the catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Authored card description
//! - `Card`: A template with a match identity, heat, and damage
//! - `KeywordSet`: Taunt / First Strike / Haste
//! - `Cost`, `ResourcePools`: Sinew, sigil and oath amounts
//! - `CardCatalog`: Named template lookup and the standard pool

pub mod definition;
pub mod keywords;
pub mod registry;
pub mod resources;

pub use definition::{Card, CardId, CardTemplate, CardType, ParseCardIdError, Rarity, World};
pub use keywords::{Keyword, KeywordSet};
pub use registry::{CardCatalog, STANDARD_DEAL};
pub use resources::{Cost, ResourcePools};
