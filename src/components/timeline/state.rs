use std::collections::HashMap;

use crate::components::scale::YearScale;
use crate::data::Node;
use crate::timeline::{CategoryPalette, Resolution, TimelineAggregator, TimelineItem};

pub const NODE_RADIUS: f64 = 6.0;
pub const ROW_GAP: f64 = 18.0;
pub const AXIS_MARGIN: f64 = 40.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 12.0;

/// An item with its screen-independent position on the axis.
#[derive(Clone, Debug)]
pub struct PlacedItem {
	pub item: TimelineItem,
	/// Position along the unzoomed axis.
	pub x: f64,
	/// Offset from the axis line, for items sharing an x position.
	pub dy: f64,
	pub radius: f64,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub transform_start_x: f64,
}

pub struct TimelineState {
	nodes: Vec<Node>,
	palette: CategoryPalette,
	aggregator: TimelineAggregator,
	pub items: Vec<PlacedItem>,
	pub resolution: Resolution,
	pub scale: YearScale,
	/// Horizontal pan in screen pixels.
	pub offset_x: f64,
	/// Zoom scale fed to the aggregator; 1.0 is fully zoomed out.
	pub k: f64,
	pub pan: PanState,
	pub hover: Option<String>,
	pub width: f64,
	pub height: f64,
}

pub fn glyph_radius(item: &TimelineItem) -> f64 {
	if item.is_cluster {
		NODE_RADIUS + 2.0 + 2.5 * (item.count as f64).sqrt()
	} else {
		NODE_RADIUS
	}
}

impl TimelineState {
	pub fn new(
		nodes: Vec<Node>,
		palette: CategoryPalette,
		aggregator: TimelineAggregator,
		width: f64,
		height: f64,
	) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			palette: CategoryPalette::default(),
			aggregator,
			items: Vec::new(),
			resolution: aggregator.resolution(MIN_ZOOM),
			scale: YearScale::with_margin((0, 1), width, AXIS_MARGIN),
			offset_x: 0.0,
			k: MIN_ZOOM,
			pan: PanState::default(),
			hover: None,
			width,
			height,
		};
		state.load(nodes, palette);
		state
	}

	pub fn load(&mut self, nodes: Vec<Node>, palette: CategoryPalette) {
		let min = nodes.iter().map(|n| n.year).min().unwrap_or(0);
		let max = nodes.iter().map(|n| n.year).max().unwrap_or(min);
		// decade glyphs sit mid-decade; keep the last one inside the axis
		let max = max.max(crate::timeline::decade_of(max).saturating_add(5));
		self.scale = YearScale::with_margin((min, max), self.width, AXIS_MARGIN);
		self.nodes = nodes;
		self.palette = palette;
		self.refresh();
	}

	/// Recompute display items for the current zoom.
	pub fn refresh(&mut self) {
		self.resolution = self.aggregator.resolution(self.k);
		let items = self
			.aggregator
			.aggregate_with_palette(&self.nodes, self.k, &self.palette);

		let mut rows: HashMap<i64, usize> = HashMap::new();
		self.items = items
			.into_iter()
			.map(|item| {
				let year = if self.resolution == Resolution::Decade {
					item.year as f64 + 5.0
				} else {
					item.year as f64
				};
				let x = self.scale.x(year);
				let row = rows.entry(x.round() as i64).or_insert(0);
				let radius = glyph_radius(&item);
				let stack = *row as f64;
				*row += 1;
				// alternate above and below the axis
				let dy = if stack == 0.0 {
					0.0
				} else {
					let step = ((stack + 1.0) / 2.0).floor() * (ROW_GAP + radius);
					if *row % 2 == 0 { -step } else { step }
				};
				let color = if item.is_cluster {
					"#ffffff"
				} else {
					self.palette.color(&item.category)
				};
				PlacedItem {
					item,
					x,
					dy,
					radius,
					color,
				}
			})
			.collect();
	}

	pub fn axis_y(&self) -> f64 {
		self.height / 2.0
	}

	pub fn screen_x(&self, x: f64) -> f64 {
		self.offset_x + x * self.k
	}

	pub fn item_at(&self, sx: f64, sy: f64) -> Option<&TimelineItem> {
		self.items
			.iter()
			.find(|p| {
				let (dx, dy) = (self.screen_x(p.x) - sx, self.axis_y() + p.dy - sy);
				(dx * dx + dy * dy).sqrt() <= p.radius + 2.0
			})
			.map(|p| &p.item)
	}

	pub fn set_hover(&mut self, sx: f64, sy: f64) -> bool {
		let hover = self.item_at(sx, sy).map(|i| i.id.clone());
		let changed = hover != self.hover;
		self.hover = hover;
		changed
	}

	/// Zoom around screen position `sx`. Returns true when the resolution
	/// band changed.
	pub fn zoom(&mut self, sx: f64, factor: f64) -> bool {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.offset_x = sx - (sx - self.offset_x) * ratio;
		self.k = new_k;
		let before = self.resolution;
		self.refresh();
		self.clamp_pan();
		before != self.resolution
	}

	pub fn pan_to(&mut self, offset_x: f64) {
		self.offset_x = offset_x;
		self.clamp_pan();
	}

	// keep some of the axis on screen
	fn clamp_pan(&mut self) {
		let span = self.width * self.k;
		self.offset_x = self.offset_x.clamp(self.width - span, 0.0);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.scale = YearScale::with_margin(self.scale.domain(), width, AXIS_MARGIN);
		self.refresh();
		self.clamp_pan();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, year: i32, category: &str) -> Node {
		Node {
			id: id.into(),
			name: id.into(),
			year,
			description: String::new(),
			category: category.into(),
		}
	}

	fn state() -> TimelineState {
		let nodes = vec![
			node("a", 1950, "X"),
			node("b", 1950, "X"),
			node("c", 1950, "Y"),
			node("d", 1990, "Y"),
		];
		let palette = CategoryPalette::from_nodes(&nodes);
		TimelineState::new(nodes, palette, TimelineAggregator::default(), 800.0, 200.0)
	}

	#[test]
	fn starts_at_decade_resolution() {
		let s = state();
		assert_eq!(s.resolution, Resolution::Decade);
		assert_eq!(s.items.len(), 2);
	}

	#[test]
	fn zooming_in_crosses_bands() {
		let mut s = state();
		assert!(!s.zoom(400.0, 1.1));
		assert!(s.zoom(400.0, 1.1));
		assert_eq!(s.resolution, Resolution::YearCategory);
		assert_eq!(s.items.len(), 3);
		while s.resolution != Resolution::Individual {
			s.zoom(400.0, 1.1);
		}
		assert_eq!(s.items.len(), 4);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		s.zoom(0.0, 0.1);
		assert_eq!(s.k, MIN_ZOOM);
		assert_eq!(s.offset_x, 0.0);
		for _ in 0..100 {
			s.zoom(0.0, 2.0);
		}
		assert_eq!(s.k, MAX_ZOOM);
	}

	#[test]
	fn stacked_items_do_not_overlap() {
		let mut s = state();
		s.zoom(0.0, 3.0);
		assert_eq!(s.resolution, Resolution::Individual);
		let at_1950: Vec<_> = s.items.iter().filter(|p| p.item.year == 1950).collect();
		assert_eq!(at_1950.len(), 3);
		let mut offsets: Vec<i64> = at_1950.iter().map(|p| p.dy as i64).collect();
		offsets.sort();
		offsets.dedup();
		assert_eq!(offsets.len(), 3);
	}

	#[test]
	fn hit_testing_finds_items() {
		let s = state();
		let first = &s.items[0];
		let (sx, sy) = (s.screen_x(first.x), s.axis_y() + first.dy);
		assert_eq!(s.item_at(sx, sy).map(|i| i.id.as_str()), Some("decade-cluster-1950"));
		assert!(s.item_at(-500.0, -500.0).is_none());
	}

	#[test]
	fn resize_refits_the_axis() {
		let mut s = state();
		let domain = s.scale.domain();
		s.resize(400.0, 120.0);
		assert_eq!((s.width, s.height), (400.0, 120.0));
		assert_eq!(s.scale.domain(), domain);
		assert_eq!(s.items.len(), 2);
		let last = s.items.iter().map(|p| p.x).fold(f64::MIN, f64::max);
		assert_eq!(last, 400.0 - AXIS_MARGIN);
	}
}
