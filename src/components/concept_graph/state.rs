use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::components::scale::YearScale;
use crate::graph::{Graph, LinkKind};
use crate::timeline::CategoryPalette;

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const AXIS_MARGIN: f64 = 60.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub year: i32,
	/// Horizontal position pinned by the year axis.
	pub year_x: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_y: f64,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ConceptGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub scale: YearScale,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	inferred: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ConceptGraphState {
	pub fn new(
		data: &Graph,
		palette: &CategoryPalette,
		years: (i32, i32),
		width: f64,
		height: f64,
	) -> Self {
		let mut state = Self {
			graph: simulation(),
			scale: YearScale::with_margin(years, width, AXIS_MARGIN),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			edges: Vec::new(),
			inferred: HashSet::new(),
		};
		state.load(data, palette, years);
		state
	}

	/// Replace the simulated graph, keeping the camera.
	pub fn load(&mut self, data: &Graph, palette: &CategoryPalette, years: (i32, i32)) {
		self.scale = YearScale::with_margin(years, self.width, AXIS_MARGIN);
		self.graph = simulation();
		self.edges.clear();
		self.inferred.clear();
		self.drag = DragState::default();
		self.hover = HoverState::default();

		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let year_x = self.scale.x(node.year as f64) as f32;
			// stagger rows so same-year nodes do not start stacked
			let y = self.height / 2.0 + ((i as f64 / count) - 0.5) * self.height * 0.6;
			let idx = self.graph.add_node(NodeData {
				x: year_x,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.name.clone(),
					color: palette.color(&node.category).to_string(),
					year: node.year,
					year_x,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		// links whose endpoints are filtered out or unknown have nothing to draw
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edges.push((src, tgt));
				if link.kind == LinkKind::Inferred {
					self.inferred.insert((src, tgt));
				}
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn concept_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let idx = self.node_at_position(sx, sy)?;
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn is_inferred(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> bool {
		self.inferred.contains(&(src, tgt))
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		// the simulation only gets to choose y
		self.graph.visit_nodes_mut(|node| {
			node.data.x = node.data.user_data.year_x;
		});
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Resize the viewport and re-pin nodes to the stretched year axis.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.scale = YearScale::with_margin(self.scale.domain(), width, AXIS_MARGIN);
		let scale = self.scale;
		self.graph.visit_nodes_mut(|node| {
			let info = &mut node.data.user_data;
			info.year_x = scale.x(info.year as f64) as f32;
		});
	}
}
