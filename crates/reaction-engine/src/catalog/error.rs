//! Errors raised while loading or extending the molecule catalog.

use thiserror::Error;

use super::definition::Role;

/// Errors that can occur while building a [`MoleculeCatalog`](super::MoleculeCatalog).
///
/// A failed registration never modifies the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON manifest could not be parsed.
    #[error("failed to parse molecule manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// A molecule with this symbol is already registered (as either role).
    #[error("molecule {0} is already registered")]
    DuplicateSymbol(String),

    /// A definition was registered through the wrong role's entry point.
    #[error("molecule {symbol} is a {actual}, expected a {expected}")]
    RoleMismatch {
        symbol: String,
        expected: Role,
        actual: Role,
    },

    /// The symbol is empty or whitespace.
    #[error("molecule symbol must not be empty")]
    EmptySymbol,

    /// The molecule has no atoms, so it can never take part in a recipe.
    #[error("molecule {0} has an empty composition")]
    EmptyComposition(String),

    /// An element count in the manifest does not fit in a `u32`.
    #[error("molecule {0} has an element count that overflows")]
    CountOverflow(String),
}
