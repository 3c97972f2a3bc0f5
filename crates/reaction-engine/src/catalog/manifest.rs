use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::{Composition, MoleculeDefinition};
use super::error::CatalogError;
use super::registry::MoleculeCatalog;

/// The classroom's molecules, embedded at compile time.
const BUILTIN_MANIFEST_JSON: &str = include_str!("../../data/molecules.json");

/// Manifest describing every molecule a lab offers.
/// Loaded from JSON; reactants and products are listed separately and keep
/// their declared order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub reactants: Vec<MoleculeEntry>,
    #[serde(default)]
    pub products: Vec<MoleculeEntry>,
}

/// One molecule in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeEntry {
    /// Display symbol, also the identity used by the resolver (e.g. "CO2").
    pub symbol: String,
    /// Element → atom count (e.g. `{ "C": 1, "O": 2 }`).
    pub composition: BTreeMap<String, u32>,
}

impl MoleculeEntry {
    pub(crate) fn composition(&self) -> Result<Composition, CatalogError> {
        Composition::from_counts(
            self.composition.iter().map(|(element, count)| (element.as_str(), *count)),
        )
        .ok_or_else(|| CatalogError::CountOverflow(self.symbol.clone()))
    }

    fn from_definition(def: &MoleculeDefinition) -> Self {
        Self {
            symbol: def.symbol.clone(),
            composition: def
                .composition
                .iter()
                .map(|(element, count)| (element.to_string(), count))
                .collect(),
        }
    }
}

impl CatalogManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The built-in classroom manifest (C, H2, O2 → C6H6, CO2).
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::from_json(BUILTIN_MANIFEST_JSON)?)
    }

    /// Snapshot a catalog back into manifest form.
    pub fn from_catalog(catalog: &MoleculeCatalog) -> Self {
        Self {
            reactants: catalog.reactants().iter().map(MoleculeEntry::from_definition).collect(),
            products: catalog.products().iter().map(MoleculeEntry::from_definition).collect(),
        }
    }

    /// Serialize to a JSON string for the scene layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
