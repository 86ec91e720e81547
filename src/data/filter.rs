use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::concept::Concept;

/// User-selected view restriction. The default matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptFilter {
	pub year_min: Option<i32>,
	pub year_max: Option<i32>,
	#[serde(default)]
	pub hidden_categories: BTreeSet<String>,
}

impl ConceptFilter {
	pub fn matches(&self, concept: &Concept) -> bool {
		self.year_min.is_none_or(|min| concept.year >= min)
			&& self.year_max.is_none_or(|max| concept.year <= max)
			&& !self.hidden_categories.contains(&concept.category)
	}

	/// Concepts passing the filter, in input order.
	pub fn apply(&self, concepts: &[Concept]) -> Vec<Concept> {
		concepts.iter().filter(|c| self.matches(c)).cloned().collect()
	}

	pub fn is_active(&self) -> bool {
		*self != Self::default()
	}

	pub fn toggle_category(&mut self, category: &str, visible: bool) {
		if visible {
			self.hidden_categories.remove(category);
		} else {
			self.hidden_categories.insert(category.to_string());
		}
	}
}

/// Inclusive `(min, max)` year span of a dataset.
pub fn year_bounds(concepts: &[Concept]) -> Option<(i32, i32)> {
	let min = concepts.iter().map(|c| c.year).min()?;
	let max = concepts.iter().map(|c| c.year).max()?;
	Some((min, max))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn concept(id: &str, year: i32, category: &str) -> Concept {
		Concept {
			id: id.into(),
			name: id.to_uppercase(),
			year,
			description: String::new(),
			category: category.into(),
			dependencies: Vec::new(),
		}
	}

	#[test]
	fn default_matches_everything() {
		let filter = ConceptFilter::default();
		assert!(!filter.is_active());
		assert!(filter.matches(&concept("a", -300, "x")));
	}

	#[test]
	fn year_range_is_inclusive() {
		let concepts = vec![
			concept("a", 1950, "x"),
			concept("b", 1960, "x"),
			concept("c", 1970, "x"),
		];
		let filter = ConceptFilter {
			year_min: Some(1960),
			year_max: Some(1970),
			..Default::default()
		};
		let ids: Vec<_> = filter.apply(&concepts).into_iter().map(|c| c.id).collect();
		assert_eq!(ids, vec!["b", "c"]);
	}

	#[test]
	fn hidden_categories_are_dropped() {
		let concepts = vec![concept("a", 1950, "x"), concept("b", 1960, "y")];
		let mut filter = ConceptFilter::default();
		filter.toggle_category("y", false);
		assert!(filter.is_active());
		assert_eq!(filter.apply(&concepts).len(), 1);
		filter.toggle_category("y", true);
		assert_eq!(filter.apply(&concepts).len(), 2);
	}

	#[test]
	fn bounds_of_empty_dataset() {
		assert_eq!(year_bounds(&[]), None);
		assert_eq!(
			year_bounds(&[concept("a", 1990, "x"), concept("b", 1956, "y")]),
			Some((1956, 1990))
		);
	}
}
