//! Per-species calorimeter energy fractions
//!
//! Each particle species deposits a configured fraction of its energy in the
//! electromagnetic compartment and another in the hadronic compartment.
//! Species that are not explicitly configured fall back to a wildcard entry.

use crate::numeric::Float;
use std::collections::HashMap;

/// Species identifier of the wildcard fraction entry
pub const WILDCARD_ID: i32 = 0;

/// Electromagnetic and hadronic energy fractions of one species
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyFractions {
    /// Fraction of the energy deposited in the electromagnetic compartment
    pub em: Float,

    /// Fraction of the energy deposited in the hadronic compartment
    pub had: Float,
}

/// Immutable species id -> energy fraction mapping
pub struct SpeciesFractionTable {
    /// Explicitly configured species
    entries: HashMap<i32, EnergyFractions>,

    /// Fallback used for species absent from `entries`
    wildcard: EnergyFractions,
}
//
impl SpeciesFractionTable {
    /// Build the table from configured (species, fractions) pairs
    ///
    /// A pair for the reserved id 0 overrides the wildcard, which otherwise
    /// treats unknown species as fully hadronic.
    ///
    pub fn new(pairs: impl IntoIterator<Item = (i32, EnergyFractions)>) -> Self {
        let mut entries: HashMap<i32, EnergyFractions> = pairs.into_iter().collect();
        let wildcard = entries
            .remove(&WILDCARD_ID)
            .unwrap_or(EnergyFractions { em: 0., had: 1. });
        Self { entries, wildcard }
    }

    /// Resolve the fractions of a species, falling back to the wildcard
    pub fn lookup(&self, pid: i32) -> EnergyFractions {
        self.entries.get(&pid).copied().unwrap_or(self.wildcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_species_resolve_to_their_entry() {
        let table = SpeciesFractionTable::new([(22, EnergyFractions { em: 1., had: 0. })]);
        assert_eq!(table.lookup(22), EnergyFractions { em: 1., had: 0. });
    }

    #[test]
    fn unknown_species_fall_back_to_the_default_wildcard() {
        let table = SpeciesFractionTable::new([]);
        assert_eq!(table.lookup(321), EnergyFractions { em: 0., had: 1. });
    }

    #[test]
    fn wildcard_can_be_overridden() {
        let table = SpeciesFractionTable::new([(0, EnergyFractions { em: 0.3, had: 0.7 })]);
        assert_eq!(table.lookup(-211), EnergyFractions { em: 0.3, had: 0.7 });
    }
}
