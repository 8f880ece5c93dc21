//! Resource stockpile and the affordability check used by placement.
//!
//! All amounts are unsigned integers; spending is all-or-nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cells::{BuildCost, Resource};

/// Answers whether a cost can currently be paid.
pub trait ResourceLedger {
    /// Check if every requirement in `cost` is covered.
    fn can_afford(&self, cost: &BuildCost) -> bool;
}

/// Settlement resource stockpile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stockpile {
    amounts: BTreeMap<Resource, u32>,
}

impl Stockpile {
    /// Create an empty stockpile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial amount.
    #[must_use]
    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        self.deposit(resource, amount);
        self
    }

    /// Current amount of a resource.
    #[must_use]
    pub fn amount(&self, resource: Resource) -> u32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Add resources.
    pub fn deposit(&mut self, resource: Resource, amount: u32) {
        let entry = self.amounts.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Spend a cost if affordable.
    ///
    /// Returns true if the transaction succeeded; nothing is removed otherwise.
    pub fn spend(&mut self, cost: &BuildCost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (resource, amount) in cost.iter() {
            if let Some(entry) = self.amounts.get_mut(&resource) {
                *entry -= amount;
            }
        }
        true
    }

    fn required(cost: &BuildCost) -> BTreeMap<Resource, u32> {
        // Costs may list a resource more than once.
        let mut totals = BTreeMap::new();
        for (resource, amount) in cost.iter() {
            let entry: &mut u32 = totals.entry(resource).or_insert(0);
            *entry = entry.saturating_add(amount);
        }
        totals
    }
}

impl ResourceLedger for Stockpile {
    fn can_afford(&self, cost: &BuildCost) -> bool {
        Self::required(cost)
            .into_iter()
            .all(|(resource, amount)| self.amount(resource) >= amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(wood: u32, stone: u32) -> BuildCost {
        BuildCost::free()
            .with(Resource::Wood, wood)
            .with(Resource::Stone, stone)
    }

    #[test]
    fn test_can_afford() {
        let stockpile = Stockpile::new()
            .with(Resource::Wood, 10)
            .with(Resource::Stone, 5);

        assert!(stockpile.can_afford(&cost(10, 5)));
        assert!(!stockpile.can_afford(&cost(11, 0)));
        assert!(!stockpile.can_afford(&BuildCost::free().with(Resource::Coin, 1)));
        assert!(stockpile.can_afford(&BuildCost::free()));
    }

    #[test]
    fn test_duplicate_requirements_are_summed() {
        let stockpile = Stockpile::new().with(Resource::Wood, 10);
        let doubled = BuildCost::free()
            .with(Resource::Wood, 6)
            .with(Resource::Wood, 6);
        assert!(!stockpile.can_afford(&doubled));
    }

    #[test]
    fn test_spend_all_or_nothing() {
        let mut stockpile = Stockpile::new()
            .with(Resource::Wood, 10)
            .with(Resource::Stone, 2);

        assert!(!stockpile.spend(&cost(5, 3)));
        assert_eq!(stockpile.amount(Resource::Wood), 10);
        assert_eq!(stockpile.amount(Resource::Stone), 2);

        assert!(stockpile.spend(&cost(5, 2)));
        assert_eq!(stockpile.amount(Resource::Wood), 5);
        assert_eq!(stockpile.amount(Resource::Stone), 0);
    }
}
