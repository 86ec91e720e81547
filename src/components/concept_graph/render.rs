use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::state::{ConceptGraphState, NODE_RADIUS, NodeInfo};
use crate::components::paint;

const DECLARED_RGB: &str = "100, 180, 255";
const INFERRED_RGB: &str = "200, 170, 255";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// How a node takes part in the hover highlight.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Role {
	/// Outside the highlight, or nothing is highlighted.
	Faded,
	/// Still highlighted while the previous hover fades out.
	Lit,
	Neighbor,
	Hovered,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct NodeStyle {
	alpha: f64,
	radius: f64,
	label_alpha: f64,
	/// Halo radius and opacity.
	glow: Option<(f64, f64)>,
	/// Outline opacity around the hovered node.
	ring: Option<f64>,
}

impl NodeStyle {
	/// Style at eased highlight progress `t` in `[0, 1]`.
	fn at(role: Role, t: f64) -> Self {
		let visible = t > 0.01;
		let halo = |base: f64, grow: f64, alpha: f64| {
			visible.then(|| (NODE_RADIUS * (base + grow * t), alpha * t))
		};
		let (alpha, scale, glow) = match role {
			Role::Faded => (1.0 - 0.7 * t, 1.0 - 0.15 * t, None),
			Role::Lit => (1.0, 1.0, None),
			Role::Neighbor => (1.0, 1.0 + 0.2 * t, halo(1.4, 0.6, 0.2)),
			Role::Hovered => (1.0, 1.0 + 0.35 * t, halo(1.8, 1.2, 0.35)),
		};
		Self {
			alpha,
			radius: NODE_RADIUS * scale,
			label_alpha: if role == Role::Faded { alpha * 0.8 } else { 1.0 },
			glow,
			ring: (role == Role::Hovered && visible).then_some(0.7 * t),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeStyle {
	alpha: f64,
	head_alpha: f64,
	width: f64,
}

impl EdgeStyle {
	/// Edges inside the highlight brighten and thicken with `t`; the rest recede.
	fn at(lit: bool, t: f64, base_width: f64) -> Self {
		let (gain, head_gain, grow) = if lit {
			(0.3, 0.1, 0.3)
		} else {
			(-0.45, -0.45, -0.3)
		};
		Self {
			alpha: 0.6 + gain * t,
			head_alpha: 0.8 + head_gain * t,
			width: base_width * (1.0 + grow * t),
		}
	}
}

pub fn render(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_year_axis(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_year_axis(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (top, bottom) = (-state.height, state.height * 2.0);
	ctx.set_line_width(1.0 / k);
	ctx.set_font(&label_font(k));
	for year in state.scale.ticks(10) {
		let x = state.scale.x(year as f64);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.06)");
		ctx.begin_path();
		ctx.move_to(x, top);
		ctx.line_to(x, bottom);
		ctx.stroke();
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.35)");
		let _ = ctx.fill_text(&year.to_string(), x + 3.0 / k, 14.0);
	}
}

fn draw_edges(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (base_width, head) = (1.5 / k, 8.0 / k);
	let pattern = [8.0 / k, 4.0 / k];
	// inferred links crawl from dependency to dependent
	let offset = -(state.flow_time * 30.0) % (pattern[0] + pattern[1]);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|from, to, _| {
		let (x1, y1) = (from.x() as f64, from.y() as f64);
		let (x2, y2) = (to.x() as f64, to.y() as f64);
		let len = (x2 - x1).hypot(y2 - y1);
		if len < 0.001 {
			return;
		}
		let (ux, uy) = ((x2 - x1) / len, (y2 - y1) / len);

		let lit = state.is_highlighted(from.index()) && state.is_highlighted(to.index());
		let style = EdgeStyle::at(lit, t, base_width);
		let inferred = state.is_inferred(from.index(), to.index());
		let rgb = if inferred { INFERRED_RGB } else { DECLARED_RGB };

		// the shaft stops where the arrow head begins
		let tip = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		if inferred {
			paint::dash(ctx, &pattern, offset);
		}
		ctx.set_stroke_style_str(&format!("rgba({rgb}, {})", style.alpha));
		ctx.set_line_width(style.width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(tip.0 - ux * head, tip.1 - uy * head);
		ctx.stroke();
		if inferred {
			paint::dash(ctx, &[], 0.0);
		}

		let fill = format!("rgba({rgb}, {})", style.head_alpha);
		paint::arrow_head(ctx, tip, (ux, uy), head, &fill);
	});
}

fn role(state: &ConceptGraphState, idx: DefaultNodeIdx) -> Role {
	if !state.has_active_highlight() || !state.is_highlighted(idx) {
		Role::Faded
	} else if state.is_hovered(idx) {
		Role::Hovered
	} else if state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx) {
		Role::Neighbor
	} else {
		Role::Lit
	}
}

fn draw_nodes(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d) {
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);
	ctx.set_font(&label_font(k));

	// highlighted nodes go on top
	for on_top in [false, true] {
		state.graph.visit_nodes(|node| {
			let role = role(state, node.index());
			if (role != Role::Faded) != on_top {
				return;
			}
			let at = (node.x() as f64, node.y() as f64);
			draw_node(ctx, at, &node.data.user_data, NodeStyle::at(role, t), k);
		});
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	info: &NodeInfo,
	style: NodeStyle,
	k: f64,
) {
	if let Some((outer, alpha)) = style.glow {
		paint::glow(ctx, (x, y), style.radius * 0.3, outer, alpha);
	}
	ctx.set_global_alpha(style.alpha);
	paint::disc(ctx, (x, y), style.radius, &info.color);
	ctx.set_global_alpha(1.0);
	if let Some(alpha) = style.ring {
		let stroke = format!("rgba(255, 255, 255, {alpha})");
		paint::ring(ctx, (x, y), style.radius + 2.0 / k, &stroke, 1.5 / k);
	}
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", style.label_alpha));
	let _ = ctx.fill_text(&info.label, x + style.radius + 3.0, y + 3.0);
}

fn label_font(k: f64) -> String {
	format!("{}px sans-serif", 10.0 / k.max(0.5))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resting_styles_ignore_role() {
		let faded = NodeStyle::at(Role::Faded, 0.0);
		assert_eq!(faded.alpha, 1.0);
		assert_eq!(faded.radius, NODE_RADIUS);
		assert_eq!(NodeStyle::at(Role::Hovered, 0.0).glow, None);
		assert_eq!(NodeStyle::at(Role::Hovered, 0.0).ring, None);
		assert_eq!(EdgeStyle::at(true, 0.0, 1.5), EdgeStyle::at(false, 0.0, 1.5));
	}

	#[test]
	fn full_highlight_separates_lit_from_faded() {
		let lit = EdgeStyle::at(true, 1.0, 2.0);
		let dim = EdgeStyle::at(false, 1.0, 2.0);
		assert!(lit.alpha > dim.alpha && lit.head_alpha > dim.head_alpha);
		assert!(lit.width > 2.0 && dim.width < 2.0);

		let hovered = NodeStyle::at(Role::Hovered, 1.0);
		let neighbor = NodeStyle::at(Role::Neighbor, 1.0);
		assert!(hovered.radius > neighbor.radius && neighbor.radius > NODE_RADIUS);
		assert_eq!(hovered.ring, Some(0.7));
		assert_eq!(neighbor.ring, None);
		let (hover_glow, _) = hovered.glow.unwrap();
		let (neighbor_glow, _) = neighbor.glow.unwrap();
		assert!(hover_glow > neighbor_glow);
		assert!(NodeStyle::at(Role::Faded, 1.0).label_alpha < 0.5);
	}
}
