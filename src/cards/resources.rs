//! Resource pools and card costs.
//!
//! Three independent currencies: sinew (physical), sigil (arcane) and
//! oath (social). Pools are unsigned, so they can never go negative; a
//! payment either covers every component or changes nothing.

use serde::{Deserialize, Serialize};

/// Amount of each currency a card costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub sinew: u32,
    pub sigil: u32,
    pub oath: u32,
}

impl Cost {
    #[must_use]
    pub const fn new(sinew: u32, sigil: u32, oath: u32) -> Self {
        Self { sinew, sigil, oath }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{} G{} O{}", self.sinew, self.sigil, self.oath)
    }
}

/// A player's available currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePools {
    pub sinew: u32,
    pub sigil: u32,
    pub oath: u32,
}

impl ResourcePools {
    #[must_use]
    pub const fn new(sinew: u32, sigil: u32, oath: u32) -> Self {
        Self { sinew, sigil, oath }
    }

    /// Every pool holds at least the matching cost component.
    #[must_use]
    pub const fn covers(&self, cost: &Cost) -> bool {
        self.sinew >= cost.sinew && self.sigil >= cost.sigil && self.oath >= cost.oath
    }

    /// Pools after paying `cost`, or `None` if any pool is short.
    #[must_use]
    pub fn after_paying(&self, cost: &Cost) -> Option<ResourcePools> {
        Some(ResourcePools {
            sinew: self.sinew.checked_sub(cost.sinew)?,
            sigil: self.sigil.checked_sub(cost.sigil)?,
            oath: self.oath.checked_sub(cost.oath)?,
        })
    }

    /// Pay `cost` all-or-nothing. Returns false and leaves the pools
    /// untouched when any component is short.
    pub fn try_pay(&mut self, cost: &Cost) -> bool {
        match self.after_paying(cost) {
            Some(remaining) => {
                *self = remaining;
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for ResourcePools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sinew {}, Sigil {}, Oath {}",
            self.sinew, self.sigil, self.oath
        )
    }
}
