//! Maps scene meshes to catalog molecules.
//!
//! The scene assigns mesh ids at load time; a molecule's root mesh and all of
//! its child meshes are bound to the same catalog index so a pick on any part
//! of it resolves to the molecule.

use std::collections::HashMap;

use reaction_engine::{MoleculeCatalog, MoleculeDefinition, SelectionHandle};

/// Manages mesh → molecule bindings.
pub struct InteractionSystem {
    bindings: HashMap<u32, usize>,
}

impl InteractionSystem {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a mesh id to a catalog index. Returns `false` if the index is
    /// not in the catalog.
    pub fn bind(&mut self, mesh_id: u32, index: usize, catalog: &MoleculeCatalog) -> bool {
        if catalog.by_index(index).is_none() {
            log::warn!("mesh {} bound to unknown molecule index {}", mesh_id, index);
            return false;
        }
        self.bindings.insert(mesh_id, index);
        true
    }

    /// Catalog index of the molecule a handle refers to.
    pub fn molecule_index(&self, handle: SelectionHandle) -> Option<usize> {
        self.bindings.get(&handle.0).copied()
    }

    /// The molecule a handle refers to.
    pub fn molecule<'a>(
        &self,
        handle: SelectionHandle,
        catalog: &'a MoleculeCatalog,
    ) -> Option<(usize, &'a MoleculeDefinition)> {
        let index = self.molecule_index(handle)?;
        catalog.by_index(index).map(|def| (index, def))
    }

    /// Drop every binding (after a catalog swap).
    pub fn reset(&mut self) {
        self.bindings.clear();
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new()
    }
}
