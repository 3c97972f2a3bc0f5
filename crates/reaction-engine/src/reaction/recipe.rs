//! The fixed recipe table.
//!
//! Each recipe is read in both directions: joining its reactants yields the
//! product, breaking the product yields its reactants. The table is checked in
//! declared order.

use crate::catalog::{Composition, MoleculeCatalog};

pub const CARBON: &str = "C";
pub const HYDROGEN: &str = "H2";
pub const OXYGEN: &str = "O2";
pub const CARBON_DIOXIDE: &str = "CO2";
pub const BENZENE: &str = "C6H6";

/// A reaction between a reactant multiset and a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionRecipe {
    /// Reactant symbols with required counts, in decomposition order.
    pub reactants: &'static [(&'static str, u32)],
    pub product: &'static str,
}

/// Every known reaction.
pub const RECIPES: &[ReactionRecipe] = &[
    ReactionRecipe {
        reactants: &[(CARBON, 1), (OXYGEN, 1)],
        product: CARBON_DIOXIDE,
    },
    ReactionRecipe {
        reactants: &[(CARBON, 6), (HYDROGEN, 3)],
        product: BENZENE,
    },
];

impl ReactionRecipe {
    /// Element multiset required by this recipe, summed from the reactants'
    /// catalog compositions. `None` if any reactant is not registered or
    /// the sum overflows.
    pub fn element_signature(&self, catalog: &MoleculeCatalog) -> Option<Composition> {
        let mut signature = Composition::new();
        for (symbol, count) in self.reactants {
            let def = catalog.get(symbol)?;
            signature.add_scaled(&def.composition, *count)?;
        }
        Some(signature)
    }

    /// The reactant list produced by breaking this recipe's product.
    pub fn decomposition(&self) -> Vec<(String, u32)> {
        self.reactants
            .iter()
            .map(|(symbol, count)| (symbol.to_string(), *count))
            .collect()
    }
}

/// Find the recipe that produces `product`.
pub fn recipe_for_product(product: &str) -> Option<&'static ReactionRecipe> {
    RECIPES.iter().find(|recipe| recipe.product == product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_dioxide_is_declared_first() {
        assert_eq!(RECIPES[0].product, CARBON_DIOXIDE);
        assert_eq!(RECIPES[1].product, BENZENE);
    }

    #[test]
    fn benzene_signature_from_catalog() {
        let catalog = MoleculeCatalog::builtin().unwrap();
        let signature = recipe_for_product(BENZENE)
            .and_then(|r| r.element_signature(&catalog))
            .unwrap();
        assert_eq!(signature, Composition::from_counts([("C", 6), ("H", 6)]).unwrap());
    }

    #[test]
    fn signature_needs_registered_reactants() {
        let catalog = MoleculeCatalog::new();
        assert!(RECIPES[0].element_signature(&catalog).is_none());
    }

    #[test]
    fn decomposition_keeps_declared_order() {
        let pieces = recipe_for_product(CARBON_DIOXIDE).unwrap().decomposition();
        assert_eq!(pieces, vec![("C".to_string(), 1), ("O2".to_string(), 1)]);
    }

    #[test]
    fn unknown_product_has_no_recipe() {
        assert!(recipe_for_product("H2O").is_none());
    }
}
