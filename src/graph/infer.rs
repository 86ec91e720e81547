//! Heuristic links for sparse datasets.
//!
//! Each node may gain one link per rule, always pointing forward in time (or
//! towards the lexicographically larger id for same-year pairs). Candidates
//! are ranked by `(year, id)` so the result does not depend on input order
//! beyond which node claims a pair first.

use super::Link;
use super::builder::PairSet;
use crate::data::Node;

pub(super) fn infer_links(nodes: &[Node], pairs: &mut PairSet, links: &mut Vec<Link>) {
	let mut ranked: Vec<&Node> = nodes.iter().collect();
	ranked.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.id.cmp(&b.id)));

	for node in nodes {
		if let Some(peer) = contemporary(node, &ranked, pairs)
			&& pairs.claim(&node.id, &peer.id)
		{
			links.push(Link::inferred(node.id.as_str(), peer.id.as_str()));
		}
		if let Some(next) = successor(node, &ranked, pairs)
			&& pairs.claim(&node.id, &next.id)
		{
			links.push(Link::inferred(node.id.as_str(), next.id.as_str()));
		}
	}
}

/// Same category, same year or the year after.
fn contemporary<'a>(node: &Node, ranked: &[&'a Node], pairs: &PairSet) -> Option<&'a Node> {
	ranked.iter().copied().find(|other| {
		other.id != node.id
			&& other.category == node.category
			&& (other.year == node.year || node.year.checked_add(1) == Some(other.year))
			&& (other.year != node.year || node.id < other.id)
			&& !pairs.contains(&node.id, &other.id)
	})
}

/// Earliest later node of the same category.
fn successor<'a>(node: &Node, ranked: &[&'a Node], pairs: &PairSet) -> Option<&'a Node> {
	ranked.iter().copied().find(|other| {
		other.category == node.category
			&& other.year > node.year
			&& !pairs.contains(&node.id, &other.id)
	})
}
