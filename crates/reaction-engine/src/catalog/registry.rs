use super::definition::{MoleculeDefinition, Role};
use super::error::CatalogError;
use super::manifest::CatalogManifest;

/// Registry of known molecules, built from a [`CatalogManifest`] or by
/// registering definitions one at a time.
///
/// Reactants and products keep registration order. Indices are stable:
/// reactants occupy `0..reactants().len()`, products follow.
#[derive(Debug, Clone, Default)]
pub struct MoleculeCatalog {
    reactants: Vec<MoleculeDefinition>,
    products: Vec<MoleculeDefinition>,
}

impl MoleculeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in classroom catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_manifest(&CatalogManifest::builtin()?)
    }

    /// Parse a JSON manifest and build a catalog from it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_manifest(&CatalogManifest::from_json(json)?)
    }

    /// Build a catalog from a parsed manifest. Fails on the first invalid entry.
    pub fn from_manifest(manifest: &CatalogManifest) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        let sections = [
            (Role::Reactant, &manifest.reactants),
            (Role::Product, &manifest.products),
        ];
        for (role, entries) in sections {
            for entry in entries {
                let composition = entry.composition()?;
                catalog.register(MoleculeDefinition::new(entry.symbol.as_str(), role, composition))?;
            }
        }
        Ok(catalog)
    }

    /// Register a definition under its own role.
    pub fn register(&mut self, def: MoleculeDefinition) -> Result<(), CatalogError> {
        if def.symbol.trim().is_empty() {
            return Err(CatalogError::EmptySymbol);
        }
        if self.get(&def.symbol).is_some() {
            return Err(CatalogError::DuplicateSymbol(def.symbol));
        }
        if def.composition.is_empty() {
            return Err(CatalogError::EmptyComposition(def.symbol));
        }
        match def.role {
            Role::Reactant => self.reactants.push(def),
            Role::Product => self.products.push(def),
        }
        Ok(())
    }

    /// Register a definition that must be a reactant.
    pub fn register_reactant(&mut self, def: MoleculeDefinition) -> Result<(), CatalogError> {
        self.register_as(Role::Reactant, def)
    }

    /// Register a definition that must be a product.
    pub fn register_product(&mut self, def: MoleculeDefinition) -> Result<(), CatalogError> {
        self.register_as(Role::Product, def)
    }

    fn register_as(&mut self, expected: Role, def: MoleculeDefinition) -> Result<(), CatalogError> {
        if def.role != expected {
            return Err(CatalogError::RoleMismatch {
                symbol: def.symbol,
                expected,
                actual: def.role,
            });
        }
        self.register(def)
    }

    /// Look up a molecule by symbol.
    pub fn get(&self, symbol: &str) -> Option<&MoleculeDefinition> {
        self.iter().find(|def| def.symbol == symbol)
    }

    /// The role of a registered symbol, or `None` if it is unknown.
    pub fn role_of(&self, symbol: &str) -> Option<Role> {
        self.get(symbol).map(|def| def.role)
    }

    /// Stable index of a symbol (reactants first, then products).
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.iter().position(|def| def.symbol == symbol)
    }

    /// Look up a molecule by its stable index.
    pub fn by_index(&self, index: usize) -> Option<&MoleculeDefinition> {
        if index < self.reactants.len() {
            self.reactants.get(index)
        } else {
            self.products.get(index - self.reactants.len())
        }
    }

    pub fn reactants(&self) -> &[MoleculeDefinition] {
        &self.reactants
    }

    pub fn products(&self) -> &[MoleculeDefinition] {
        &self.products
    }

    /// All molecules, reactants first.
    pub fn iter(&self) -> impl Iterator<Item = &MoleculeDefinition> {
        self.reactants.iter().chain(self.products.iter())
    }

    pub fn len(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Composition;

    fn carbon() -> MoleculeDefinition {
        MoleculeDefinition::reactant("C", Composition::from_counts([("C", 1)]).unwrap())
    }

    #[test]
    fn loads_builtin() {
        let catalog = MoleculeCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.role_of("O2"), Some(Role::Reactant));
        assert_eq!(catalog.role_of("CO2"), Some(Role::Product));
        assert_eq!(catalog.role_of("Xx"), None);
    }

    #[test]
    fn indices_put_reactants_first() {
        let catalog = MoleculeCatalog::builtin().unwrap();
        assert_eq!(catalog.index_of("C"), Some(0));
        assert_eq!(catalog.index_of("C6H6"), Some(3));
        assert_eq!(catalog.by_index(4).map(|d| d.symbol.as_str()), Some("CO2"));
        assert!(catalog.by_index(5).is_none());
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let mut catalog = MoleculeCatalog::new();
        catalog.register_reactant(carbon()).unwrap();
        let carbon_product = Composition::from_counts([("C", 1)]).unwrap();
        let dup = MoleculeDefinition::product("C", carbon_product);
        match catalog.register(dup) {
            Err(CatalogError::DuplicateSymbol(symbol)) => assert_eq!(symbol, "C"),
            other => panic!("expected DuplicateSymbol, got {:?}", other),
        }
        assert_eq!(catalog.len(), 1);
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn wrong_role_is_rejected() {
        let mut catalog = MoleculeCatalog::new();
        let err = catalog.register_product(carbon()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::RoleMismatch { expected: Role::Product, actual: Role::Reactant, .. }
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn empty_composition_is_rejected() {
        let mut catalog = MoleculeCatalog::new();
        let err = catalog
            .register(MoleculeDefinition::reactant("Ghost", Composition::new()))
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyComposition(_)));
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let mut catalog = MoleculeCatalog::new();
        let def = MoleculeDefinition::reactant("  ", carbon().composition);
        assert!(matches!(catalog.register(def), Err(CatalogError::EmptySymbol)));
    }

    #[test]
    fn manifest_with_duplicate_fails() {
        let json = r#"{
            "reactants": [ { "symbol": "C", "composition": { "C": 1 } } ],
            "products": [ { "symbol": "C", "composition": { "C": 1 } } ]
        }"#;
        assert!(matches!(
            MoleculeCatalog::from_json(json),
            Err(CatalogError::DuplicateSymbol(_))
        ));
    }
}
