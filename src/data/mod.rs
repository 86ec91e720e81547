//! Concept dataset: record types, snapshot loading and view filters.

mod concept;
mod filter;
mod loader;

pub use concept::{Concept, Node, to_nodes};
pub use filter::{ConceptFilter, year_bounds};
pub use loader::{
	BUNDLED_SNAPSHOT, ConceptCache, categories, dangling_dependencies, load_bundled,
	parse_concepts,
};
