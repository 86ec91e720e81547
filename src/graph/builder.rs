use std::collections::HashSet;

use log::debug;

use super::infer::infer_links;
use super::{Graph, GraphOptions, Link};
use crate::data::{Concept, ConceptFilter, Node};

/// Unordered pair registry; `(a, b)` and `(b, a)` occupy the same slot.
#[derive(Debug, Default)]
pub(super) struct PairSet {
	seen: HashSet<(String, String)>,
}

impl PairSet {
	fn key(a: &str, b: &str) -> (String, String) {
		if a <= b {
			(a.to_string(), b.to_string())
		} else {
			(b.to_string(), a.to_string())
		}
	}

	pub(super) fn contains(&self, a: &str, b: &str) -> bool {
		self.seen.contains(&Self::key(a, b))
	}

	/// Claims the slot for `a`-`b`. False for self-loops and taken slots.
	pub(super) fn claim(&mut self, a: &str, b: &str) -> bool {
		a != b && self.seen.insert(Self::key(a, b))
	}
}

/// Explicit-dependency graph.
pub fn build_graph(concepts: &[Concept]) -> Graph {
	build_graph_with(concepts, GraphOptions::default())
}

pub fn build_graph_with(concepts: &[Concept], options: GraphOptions) -> Graph {
	let nodes: Vec<Node> = concepts.iter().map(Node::from).collect();
	let mut pairs = PairSet::default();
	let mut links = Vec::new();

	for concept in concepts {
		for dep in &concept.dependencies {
			if pairs.claim(dep, &concept.id) {
				links.push(Link::declared(dep.as_str(), concept.id.as_str()));
			}
		}
	}
	let declared = links.len();

	if options.infer_links {
		infer_links(&nodes, &mut pairs, &mut links);
	}

	debug!(
		"built graph: {} nodes, {} declared links, {} inferred",
		nodes.len(),
		declared,
		links.len() - declared
	);
	Graph { nodes, links }
}

/// Graph over the concepts passing `filter`. Links into filtered-out
/// concepts are kept as dangling edges, same as unknown ids.
pub fn build_filtered_graph(
	concepts: &[Concept],
	filter: &ConceptFilter,
	options: GraphOptions,
) -> Graph {
	build_graph_with(&filter.apply(concepts), options)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::LinkKind;

	fn concept(id: &str, year: i32, category: &str, deps: &[&str]) -> Concept {
		Concept {
			id: id.into(),
			name: id.to_uppercase(),
			year,
			description: String::new(),
			category: category.into(),
			dependencies: deps.iter().map(|d| d.to_string()).collect(),
		}
	}

	fn pairs(graph: &Graph) -> Vec<(&str, &str)> {
		graph
			.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect()
	}

	#[test]
	fn single_dependency() {
		let concepts = vec![
			concept("a", 1950, "X", &[]),
			concept("b", 1960, "Y", &["a"]),
		];
		let graph = build_graph(&concepts);
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["a", "b"]);
		assert_eq!(graph.links, vec![Link::declared("a", "b")]);
	}

	#[test]
	fn links_follow_insertion_order() {
		let concepts = vec![
			concept("a", 1950, "X", &[]),
			concept("b", 1960, "X", &["a"]),
			concept("c", 1970, "X", &["a", "b"]),
		];
		let graph = build_graph(&concepts);
		assert_eq!(pairs(&graph), vec![("a", "b"), ("a", "c"), ("b", "c")]);
	}

	#[test]
	fn reverse_and_self_links_are_dropped() {
		let concepts = vec![
			concept("a", 1950, "X", &["b", "a"]),
			concept("b", 1960, "X", &["a", "a"]),
		];
		let graph = build_graph(&concepts);
		assert_eq!(pairs(&graph), vec![("b", "a")]);
	}

	#[test]
	fn dangling_dependencies_still_produce_links() {
		let concepts = vec![concept("a", 1950, "X", &["missing"])];
		let graph = build_graph(&concepts);
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(pairs(&graph), vec![("missing", "a")]);
	}

	#[test]
	fn empty_input() {
		assert_eq!(build_graph(&[]), Graph::default());
		let options = GraphOptions { infer_links: true };
		assert_eq!(build_graph_with(&[], options), Graph::default());
	}

	#[test]
	fn building_twice_is_identical() {
		let concepts = vec![
			concept("a", 1950, "X", &[]),
			concept("b", 1951, "X", &["a"]),
			concept("c", 1951, "X", &[]),
			concept("d", 1970, "Y", &["b"]),
		];
		let options = GraphOptions { infer_links: true };
		assert_eq!(build_graph(&concepts), build_graph(&concepts));
		let first = build_graph_with(&concepts, options);
		let second = build_graph_with(&concepts, options);
		assert_eq!(first, second);
		assert_eq!(
			serde_json::to_string(&first).unwrap(),
			serde_json::to_string(&second).unwrap()
		);
	}

	#[test]
	fn inference_is_off_by_default() {
		let concepts = vec![concept("a", 1950, "X", &[]), concept("b", 1951, "X", &[])];
		assert!(build_graph(&concepts).links.is_empty());
		let inferred = build_graph_with(&concepts, GraphOptions { infer_links: true });
		assert!(inferred.links.iter().all(|l| l.kind == LinkKind::Inferred));
		assert!(!inferred.links.is_empty());
	}

	#[test]
	fn filtered_graph_drops_nodes_only() {
		let concepts = vec![
			concept("a", 1950, "X", &[]),
			concept("b", 1960, "Y", &["a"]),
			concept("c", 1990, "Y", &["b"]),
		];
		let filter = ConceptFilter {
			year_min: Some(1955),
			..Default::default()
		};
		let graph = build_filtered_graph(&concepts, &filter, GraphOptions::default());
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "c"]);
		assert_eq!(pairs(&graph), vec![("a", "b"), ("b", "c")]);
	}

	#[test]
	fn neighbors_in_both_directions() {
		let concepts = vec![
			concept("a", 1950, "X", &[]),
			concept("b", 1960, "Y", &["a"]),
			concept("c", 1970, "Y", &["b"]),
		];
		let graph = build_graph(&concepts);
		let mut around_b: Vec<_> = graph.neighbors("b").collect();
		around_b.sort();
		assert_eq!(around_b, vec!["a", "c"]);
	}
}
