use std::cell::OnceCell;
use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use super::concept::Concept;
use crate::error::DataError;
use crate::timeline::CLUSTER_ID_PREFIXES;

/// The snapshot shipped with the app.
pub const BUNDLED_SNAPSHOT: &str = include_str!("../../assets/concepts.json");

/// Parse a snapshot, either a bare array or `{ "concepts": [...] }`.
pub fn parse_concepts(json: &str) -> Result<Vec<Concept>, DataError> {
	let list = match serde_json::from_str::<Value>(json)? {
		Value::Object(mut map) => match map.remove("concepts") {
			Some(list) => list,
			None => Value::Object(map),
		},
		other => other,
	};
	let concepts: Vec<Concept> = serde_json::from_value(list)?;

	let mut seen = HashSet::with_capacity(concepts.len());
	for concept in &concepts {
		if concept.id.is_empty() {
			return Err(DataError::EmptyId(concept.name.clone()));
		}
		if !seen.insert(concept.id.as_str()) {
			return Err(DataError::DuplicateId(concept.id.clone()));
		}
		if CLUSTER_ID_PREFIXES.iter().any(|p| concept.id.starts_with(p)) {
			return Err(DataError::ReservedId(concept.id.clone()));
		}
	}

	for (owner, missing) in dangling_dependencies(&concepts) {
		warn!("concept {owner:?} depends on unknown id {missing:?}");
	}
	debug!("parsed {} concepts", concepts.len());
	Ok(concepts)
}

/// Parse the bundled snapshot, falling back to an empty dataset.
pub fn load_bundled() -> Vec<Concept> {
	parse_concepts(BUNDLED_SNAPSHOT).unwrap_or_else(|e| {
		warn!("bundled concept snapshot unusable, starting empty: {e}");
		Vec::new()
	})
}

/// `(concept id, missing dependency id)` for every reference that does not
/// resolve. Self references are reported too.
pub fn dangling_dependencies(concepts: &[Concept]) -> Vec<(String, String)> {
	let ids: HashSet<&str> = concepts.iter().map(|c| c.id.as_str()).collect();
	let mut dangling = Vec::new();
	for concept in concepts {
		for dep in &concept.dependencies {
			if *dep == concept.id || !ids.contains(dep.as_str()) {
				dangling.push((concept.id.clone(), dep.clone()));
			}
		}
	}
	dangling
}

/// Distinct categories in first-seen order.
pub fn categories(concepts: &[Concept]) -> Vec<String> {
	let mut seen = HashSet::new();
	concepts
		.iter()
		.filter(|c| seen.insert(c.category.as_str()))
		.map(|c| c.category.clone())
		.collect()
}

/// Populate-once, read-many holder for the loaded dataset. Owned by whoever
/// loads data; the graph and timeline transforms never see it.
#[derive(Debug, Default)]
pub struct ConceptCache {
	cell: OnceCell<Vec<Concept>>,
}

impl ConceptCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached list, running `load` only on first access.
	pub fn get_or_load(&self, load: impl FnOnce() -> Vec<Concept>) -> &[Concept] {
		self.cell.get_or_init(|| {
			let concepts = load();
			debug!("concept cache populated with {} entries", concepts.len());
			concepts
		})
	}

	pub fn get(&self) -> Option<&[Concept]> {
		self.cell.get().map(Vec::as_slice)
	}

	pub fn is_loaded(&self) -> bool {
		self.cell.get().is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"[
		{"id": "a", "name": "A", "year": 1950, "category": "X", "dependencies": []},
		{"id": "b", "name": "B", "year": "1960", "category": "Y", "dependencies": ["a", "ghost"]}
	]"#;

	#[test]
	fn parses_bare_and_wrapped_snapshots() {
		let bare = parse_concepts(SAMPLE).unwrap();
		assert_eq!(bare.len(), 2);
		assert_eq!(bare[1].year, 1960);

		let wrapped = format!("{{\"concepts\": {SAMPLE}}}");
		assert_eq!(parse_concepts(&wrapped).unwrap(), bare);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let json = r#"[
			{"id": "a", "name": "A", "year": 1950, "category": "X"},
			{"id": "a", "name": "A2", "year": 1951, "category": "X"}
		]"#;
		match parse_concepts(json) {
			Err(DataError::DuplicateId(id)) => assert_eq!(id, "a"),
			other => panic!("expected duplicate id error, got {other:?}"),
		}
	}

	#[test]
	fn rejects_cluster_id_prefixes() {
		let json = r#"[
			{"id": "a", "name": "A", "year": 2003, "category": "Z"},
			{"id": "b", "name": "B", "year": 2003, "category": "Z"},
			{"id": "year-cat-cluster-2003-Z", "name": "C", "year": 1990, "category": "Q"}
		]"#;
		match parse_concepts(json) {
			Err(DataError::ReservedId(id)) => assert_eq!(id, "year-cat-cluster-2003-Z"),
			other => panic!("expected reserved id error, got {other:?}"),
		}

		let json = r#"[{"id": "decade-cluster-1990", "name": "D", "year": 1990, "category": "X"}]"#;
		assert!(matches!(parse_concepts(json), Err(DataError::ReservedId(_))));
		// only the prefix is reserved
		let json = r#"[{"id": "my-decade-cluster-1990", "name": "D", "year": 1990, "category": "X"}]"#;
		assert!(parse_concepts(json).is_ok());
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(matches!(parse_concepts("{ nope"), Err(DataError::Parse(_))));
		assert!(matches!(
			parse_concepts(r#"[{"id": "a", "name": "A", "year": "soon", "category": "X"}]"#),
			Err(DataError::Parse(_))
		));
	}

	#[test]
	fn reports_dangling_dependencies() {
		let concepts = parse_concepts(SAMPLE).unwrap();
		assert_eq!(
			dangling_dependencies(&concepts),
			vec![("b".to_string(), "ghost".to_string())]
		);
	}

	#[test]
	fn bundled_snapshot_is_clean() {
		let concepts = parse_concepts(BUNDLED_SNAPSHOT).unwrap();
		assert!(!concepts.is_empty());
		assert!(concepts.len() <= 25);
		assert!(dangling_dependencies(&concepts).is_empty());
		assert_eq!(load_bundled(), concepts);
	}

	#[test]
	fn categories_in_first_seen_order() {
		let concepts = parse_concepts(SAMPLE).unwrap();
		assert_eq!(categories(&concepts), vec!["X", "Y"]);
	}

	#[test]
	fn cache_loads_once() {
		let cache = ConceptCache::new();
		assert!(!cache.is_loaded());
		assert!(cache.get().is_none());

		let mut calls = 0;
		let first = cache
			.get_or_load(|| {
				calls += 1;
				parse_concepts(SAMPLE).unwrap()
			})
			.len();
		let second = cache.get_or_load(|| unreachable!("already populated")).len();
		assert_eq!(calls, 1);
		assert_eq!(first, second);
		assert!(cache.is_loaded());
	}
}
