//! Reaction zone rules: recipes, the zone tally, selection and the resolver.

pub mod recipe;
pub mod resolver;
pub mod selection;
pub mod tally;

pub use recipe::{ReactionRecipe, RECIPES};
pub use resolver::{AddOutcome, ReactionResolver, DEFAULT_ZONE_CAPACITY};
pub use selection::Selection;
pub use tally::{ZoneMode, ZoneTally};
