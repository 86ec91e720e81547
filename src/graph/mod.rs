//! Concept list to node/link graph.

mod builder;
mod infer;

use serde::{Deserialize, Serialize};

use crate::data::Node;

pub use builder::{build_filtered_graph, build_graph, build_graph_with};

/// Where a link came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
	#[default]
	Declared,
	Inferred,
}

/// Directed edge: `source` is the dependency, `target` the dependent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub kind: LinkKind,
}

impl Link {
	pub fn declared(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind: LinkKind::Declared,
		}
	}

	pub fn inferred(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind: LinkKind::Inferred,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl Graph {
	/// Ids adjacent to `id` in either direction.
	pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.links.iter().filter_map(move |link| {
			if link.source == id {
				Some(link.target.as_str())
			} else if link.target == id {
				Some(link.source.as_str())
			} else {
				None
			}
		})
	}
}

/// Graph construction switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphOptions {
	/// Synthesize same-category links from temporal proximity.
	pub infer_links: bool,
}
