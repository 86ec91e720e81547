use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::config::{Resolution, ZoomThresholds};
use super::palette::CategoryPalette;
use crate::data::Node;

/// Category reported by decade clusters.
pub const DECADE_CLUSTER_CATEGORY: &str = "timeline_decade_cluster";

/// One glyph on the timeline: a single node or a cluster of nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
	/// Node id, or a cluster id stable for the resolution.
	pub id: String,
	pub label: String,
	pub year: i32,
	pub category: String,
	pub is_cluster: bool,
	pub count: usize,
	/// Constituent nodes. Unclustered items hold exactly their own node.
	pub child_nodes: Vec<Node>,
	pub categories_in_cluster: Vec<String>,
	pub category_colors_in_cluster: Vec<String>,
}

impl TimelineItem {
	fn single(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			label: node.name.clone(),
			year: node.year,
			category: node.category.clone(),
			is_cluster: false,
			count: 1,
			child_nodes: vec![node.clone()],
			categories_in_cluster: Vec::new(),
			category_colors_in_cluster: Vec::new(),
		}
	}

	fn cluster(
		id: String,
		label: String,
		year: i32,
		category: String,
		members: &[&Node],
		palette: &CategoryPalette,
	) -> Self {
		let mut categories: Vec<String> = Vec::new();
		for node in members {
			if !categories.contains(&node.category) {
				categories.push(node.category.clone());
			}
		}
		let colors = categories
			.iter()
			.map(|c| palette.color(c).to_string())
			.collect();
		Self {
			id,
			label,
			year,
			category,
			is_cluster: true,
			count: members.len(),
			child_nodes: members.iter().map(|n| (*n).clone()).collect(),
			categories_in_cluster: categories,
			category_colors_in_cluster: colors,
		}
	}

	/// The nodes this item stands for, whether clustered or not.
	pub fn members(&self) -> &[Node] {
		&self.child_nodes
	}
}

pub fn decade_of(year: i32) -> i32 {
	year.div_euclid(10).saturating_mul(10)
}

/// Id prefixes of synthesized clusters. Node ids must not start with these.
pub const CLUSTER_ID_PREFIXES: [&str; 2] = [DECADE_CLUSTER_PREFIX, YEAR_CATEGORY_CLUSTER_PREFIX];
const DECADE_CLUSTER_PREFIX: &str = "decade-cluster-";
const YEAR_CATEGORY_CLUSTER_PREFIX: &str = "year-cat-cluster-";

pub fn decade_cluster_id(decade: i32) -> String {
	format!("{DECADE_CLUSTER_PREFIX}{decade}")
}

pub fn year_category_cluster_id(year: i32, category: &str) -> String {
	format!("{YEAR_CATEGORY_CLUSTER_PREFIX}{year}-{category}")
}

/// Zoom-dependent level-of-detail grouping for the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimelineAggregator {
	pub thresholds: ZoomThresholds,
}

impl TimelineAggregator {
	pub fn new(thresholds: ZoomThresholds) -> Self {
		Self { thresholds }
	}

	pub fn resolution(&self, zoom_scale: f64) -> Resolution {
		self.thresholds.resolution(zoom_scale)
	}

	/// Group `nodes` for `zoom_scale`, coloring clusters from the categories
	/// of `nodes` themselves.
	pub fn aggregate(&self, nodes: &[Node], zoom_scale: f64) -> Vec<TimelineItem> {
		self.aggregate_with_palette(nodes, zoom_scale, &CategoryPalette::from_nodes(nodes))
	}

	/// Output is sorted by `(year, id)`; callers should still key by id.
	pub fn aggregate_with_palette(
		&self,
		nodes: &[Node],
		zoom_scale: f64,
		palette: &CategoryPalette,
	) -> Vec<TimelineItem> {
		let resolution = self.resolution(zoom_scale);
		let mut items = match resolution {
			Resolution::Decade => by_decade(nodes, palette),
			Resolution::YearCategory => by_year_category(nodes, palette),
			Resolution::Individual => nodes.iter().map(TimelineItem::single).collect(),
		};
		items.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.id.cmp(&b.id)));
		debug!(
			"timeline at scale {zoom_scale:.2} ({resolution:?}): {} nodes -> {} items",
			nodes.len(),
			items.len()
		);
		items
	}
}

/// [`TimelineAggregator::aggregate`] with the default thresholds.
pub fn aggregate(nodes: &[Node], zoom_scale: f64) -> Vec<TimelineItem> {
	TimelineAggregator::default().aggregate(nodes, zoom_scale)
}

fn by_decade(nodes: &[Node], palette: &CategoryPalette) -> Vec<TimelineItem> {
	let mut buckets: BTreeMap<i32, Vec<&Node>> = BTreeMap::new();
	for node in nodes {
		buckets.entry(decade_of(node.year)).or_default().push(node);
	}
	buckets
		.into_iter()
		.map(|(decade, members)| {
			TimelineItem::cluster(
				decade_cluster_id(decade),
				format!("{decade}s"),
				decade,
				DECADE_CLUSTER_CATEGORY.to_string(),
				&members,
				palette,
			)
		})
		.collect()
}

fn by_year_category(nodes: &[Node], palette: &CategoryPalette) -> Vec<TimelineItem> {
	let mut buckets: BTreeMap<(i32, &str), Vec<&Node>> = BTreeMap::new();
	for node in nodes {
		buckets
			.entry((node.year, node.category.as_str()))
			.or_default()
			.push(node);
	}
	buckets
		.into_iter()
		.map(|((year, category), members)| match members.as_slice() {
			[only] => TimelineItem::single(only),
			_ => TimelineItem::cluster(
				year_category_cluster_id(year, category),
				format!("{year} {category} ({})", members.len()),
				year,
				category.to_string(),
				&members,
				palette,
			),
		})
		.collect()
}
