use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Which side of a reaction a molecule sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An input that can be joined, or the output of breaking a product.
    Reactant,
    /// A compound that results from a join and can be broken again.
    Product,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Reactant => f.write_str("reactant"),
            Role::Product => f.write_str("product"),
        }
    }
}

/// Element multiset: element symbol → atom count.
///
/// Zero counts are never stored, so two compositions are equal exactly when
/// every element appears with the same nonzero count in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Composition {
    counts: BTreeMap<String, u32>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(element, count)` pairs. Repeated elements are summed.
    /// `None` if a summed count overflows.
    pub fn from_counts<I, S>(counts: I) -> Option<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut composition = Self::new();
        for (element, count) in counts {
            composition.add(element, count)?;
        }
        Some(composition)
    }

    /// Add `count` atoms of `element`. `None` on overflow, with the
    /// composition left unchanged.
    pub fn add(&mut self, element: impl Into<String>, count: u32) -> Option<()> {
        if count == 0 {
            return Some(());
        }
        let slot = self.counts.entry(element.into()).or_insert(0);
        *slot = slot.checked_add(count)?;
        Some(())
    }

    /// Add every element of `other`, multiplied by `factor`. `None` on
    /// overflow, with the composition left unchanged.
    pub fn add_scaled(&mut self, other: &Composition, factor: u32) -> Option<()> {
        let mut counts = self.counts.clone();
        for (element, count) in &other.counts {
            let scaled = count.checked_mul(factor)?;
            if scaled == 0 {
                continue;
            }
            let slot = counts.entry(element.clone()).or_insert(0);
            *slot = slot.checked_add(scaled)?;
        }
        self.counts = counts;
        Some(())
    }

    /// Atom count for `element` (0 when absent).
    pub fn get(&self, element: &str) -> u32 {
        self.counts.get(element).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Iterate `(element, count)` in element order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(element, count)| (element.as_str(), *count))
    }
}

/// A molecule the lab knows about. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoleculeDefinition {
    pub symbol: String,
    pub role: Role,
    pub composition: Composition,
}

impl MoleculeDefinition {
    pub fn new(symbol: impl Into<String>, role: Role, composition: Composition) -> Self {
        Self {
            symbol: symbol.into(),
            role,
            composition,
        }
    }

    pub fn reactant(symbol: impl Into<String>, composition: Composition) -> Self {
        Self::new(symbol, Role::Reactant, composition)
    }

    pub fn product(symbol: impl Into<String>, composition: Composition) -> Self {
        Self::new(symbol, Role::Product, composition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_are_dropped() {
        let a = Composition::from_counts([("C", 1), ("H", 0)]).unwrap();
        let b = Composition::from_counts([("C", 1)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a.get("H"), 0);
    }

    #[test]
    fn repeated_elements_are_summed() {
        let c = Composition::from_counts([("O", 1), ("O", 1)]).unwrap();
        assert_eq!(c.get("O"), 2);
    }

    #[test]
    fn add_scaled_multiplies() {
        let hydrogen = Composition::from_counts([("H", 2)]).unwrap();
        let mut total = Composition::from_counts([("C", 6)]).unwrap();
        assert_eq!(total.add_scaled(&hydrogen, 3), Some(()));
        assert_eq!(total, Composition::from_counts([("C", 6), ("H", 6)]).unwrap());
    }

    #[test]
    fn add_scaled_by_zero_is_noop() {
        let oxygen = Composition::from_counts([("O", 2)]).unwrap();
        let mut total = Composition::new();
        assert_eq!(total.add_scaled(&oxygen, 0), Some(()));
        assert!(total.is_empty());
    }

    #[test]
    fn overflowing_add_scaled_leaves_total_unchanged() {
        let heavy = Composition::from_counts([("C", 3_000_000_000)]).unwrap();
        let mut total = Composition::from_counts([("H", 1)]).unwrap();
        assert_eq!(total.add_scaled(&heavy, 2), None);
        assert_eq!(total.add_scaled(&heavy, 1), Some(()));
        assert_eq!(total.add_scaled(&heavy, 1), None);
        assert_eq!(total.get("C"), 3_000_000_000);
        assert_eq!(total.get("H"), 1);
    }

    #[test]
    fn overflowing_repeated_element_is_rejected() {
        assert_eq!(Composition::from_counts([("O", u32::MAX), ("O", 1)]), None);
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Reactant.to_string(), "reactant");
        assert_eq!(Role::Product.to_string(), "product");
    }
}
