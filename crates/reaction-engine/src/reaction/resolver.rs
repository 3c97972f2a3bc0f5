//! Reaction zone bookkeeping and recipe matching.
//!
//! No scene or rendering dependencies: the scene layer passes symbols in and
//! reads outcomes back.

use log::{debug, info, warn};

use crate::api::types::SelectionHandle;
use crate::catalog::{CatalogError, Composition, MoleculeCatalog, MoleculeDefinition, Role};
use crate::reaction::recipe::{recipe_for_product, ReactionRecipe, RECIPES};
use crate::reaction::selection::Selection;
use crate::reaction::tally::{ZoneMode, ZoneTally};

/// Reactant slots on the reaction panel (a 3×3 grid).
pub const DEFAULT_ZONE_CAPACITY: usize = 9;

/// Result of dropping a molecule into the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The molecule was counted.
    Added,
    /// The symbol is not in the catalog; nothing changed.
    Ignored,
    /// Every reactant slot is taken; nothing changed.
    CapacityExceeded,
}

/// Tracks molecules dropped into the reaction zone and resolves them against
/// the recipe table. Also owns the single "currently grabbed" slot.
#[derive(Debug, Clone)]
pub struct ReactionResolver {
    catalog: MoleculeCatalog,
    tally: ZoneTally,
    selection: Selection,
    capacity: usize,
}

impl ReactionResolver {
    /// Empty catalog, default capacity.
    pub fn new() -> Self {
        Self::with_catalog(MoleculeCatalog::new())
    }

    pub fn with_catalog(catalog: MoleculeCatalog) -> Self {
        Self {
            catalog,
            tally: ZoneTally::new(),
            selection: Selection::new(),
            capacity: DEFAULT_ZONE_CAPACITY,
        }
    }

    /// Override the reactant slot limit.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replace the catalog. The tally and selection refer to the old
    /// symbols, so both are cleared.
    pub fn set_catalog(&mut self, catalog: MoleculeCatalog) {
        self.catalog = catalog;
        self.tally.clear();
        self.selection.release();
        info!("catalog replaced: {} molecules", self.catalog.len());
    }

    pub fn register_reactant(&mut self, def: MoleculeDefinition) -> Result<(), CatalogError> {
        let symbol = def.symbol.clone();
        self.catalog.register_reactant(def).inspect_err(|err| {
            warn!("reactant {} rejected: {}", symbol, err);
        })
    }

    pub fn register_product(&mut self, def: MoleculeDefinition) -> Result<(), CatalogError> {
        let symbol = def.symbol.clone();
        self.catalog.register_product(def).inspect_err(|err| {
            warn!("product {} rejected: {}", symbol, err);
        })
    }

    /// Drop a molecule into the zone.
    ///
    /// A molecule of the other role starts a fresh tally. A product always
    /// replaces whatever was there; reactants accumulate up to the capacity.
    pub fn add_to_zone(&mut self, symbol: &str) -> AddOutcome {
        let Some(role) = self.catalog.role_of(symbol) else {
            debug!("zone ignored unknown molecule {}", symbol);
            return AddOutcome::Ignored;
        };

        match role {
            Role::Reactant => {
                let mode = ZoneMode::AccumulatingReactants;
                let occupied = if self.tally.mode() == mode {
                    self.tally.total() as usize
                } else {
                    0
                };
                if occupied >= self.capacity {
                    warn!("zone full ({} reactants), {} rejected", self.capacity, symbol);
                    return AddOutcome::CapacityExceeded;
                }
                if self.tally.mode() != mode {
                    self.tally.clear();
                }
                self.tally.increment(symbol, mode);
            }
            Role::Product => {
                self.tally.clear();
                self.tally.increment(symbol, ZoneMode::AccumulatingProduct);
            }
        }

        debug!("zone + {} ({} total)", symbol, self.tally.total());
        AddOutcome::Added
    }

    /// Join the tallied reactants.
    ///
    /// Succeeds only when the tally's element multiset equals a recipe's
    /// exactly. On success the tally is cleared; otherwise it is left as is.
    pub fn try_resolve_join(&mut self) -> Option<String> {
        if self.tally.mode() != ZoneMode::AccumulatingReactants {
            return None;
        }

        let mut elements = Composition::new();
        for (symbol, count) in self.tally.iter() {
            let def = self.catalog.get(symbol)?;
            if elements.add_scaled(&def.composition, count).is_none() {
                debug!("join rejected: element count overflow on {}", symbol);
                return None;
            }
        }

        let product = RECIPES
            .iter()
            .filter(|recipe| self.is_recipe_available(recipe))
            .find(|recipe| recipe.element_signature(&self.catalog).as_ref() == Some(&elements))
            .map(|recipe| recipe.product.to_string())?;

        info!("join produced {}", product);
        self.tally.clear();
        Some(product)
    }

    /// Break the tallied product into its reactants, in recipe order.
    /// Clears the tally on success.
    pub fn try_resolve_break(&mut self) -> Option<Vec<(String, u32)>> {
        if self.tally.mode() != ZoneMode::AccumulatingProduct {
            return None;
        }
        let product = self.tally.first_symbol()?;
        let recipe = recipe_for_product(product)?;
        let pieces = recipe.decomposition();

        info!("break split {} into {:?}", product, pieces);
        self.tally.clear();
        Some(pieces)
    }

    /// Empty the zone.
    pub fn reset(&mut self) {
        if !self.tally.is_empty() {
            debug!("zone reset ({} cleared)", self.tally.total());
        }
        self.tally.clear();
    }

    /// Grab a molecule. Fails if one is already held.
    pub fn select(&mut self, handle: SelectionHandle) -> bool {
        self.selection.select(handle)
    }

    /// Let go of the held molecule, if any.
    pub fn release(&mut self) -> Option<SelectionHandle> {
        self.selection.release()
    }

    pub fn selected(&self) -> Option<SelectionHandle> {
        self.selection.current()
    }

    pub fn catalog(&self) -> &MoleculeCatalog {
        &self.catalog
    }

    pub fn reactants(&self) -> &[MoleculeDefinition] {
        self.catalog.reactants()
    }

    pub fn products(&self) -> &[MoleculeDefinition] {
        self.catalog.products()
    }

    pub fn tally(&self) -> &ZoneTally {
        &self.tally
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A recipe is usable once its product and all of its reactants are
    // registered under the right roles.
    fn is_recipe_available(&self, recipe: &ReactionRecipe) -> bool {
        self.catalog.role_of(recipe.product) == Some(Role::Product)
            && recipe
                .reactants
                .iter()
                .all(|(symbol, _)| self.catalog.role_of(symbol) == Some(Role::Reactant))
    }
}

impl Default for ReactionResolver {
    fn default() -> Self {
        Self::new()
    }
}
