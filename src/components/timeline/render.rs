use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{PlacedItem, TimelineState};
use crate::components::paint;
use crate::timeline::Resolution;

pub fn render(state: &TimelineState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#16162a");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_axis(state, ctx);
	for placed in &state.items {
		let hovered = state.hover.as_deref() == Some(placed.item.id.as_str());
		if placed.item.is_cluster {
			draw_cluster(state, ctx, placed, hovered);
		} else {
			draw_single(state, ctx, placed, hovered);
		}
	}
}

fn draw_axis(state: &TimelineState, ctx: &CanvasRenderingContext2d) {
	let y = state.axis_y();
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.3)");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(0.0, y);
	ctx.line_to(state.width, y);
	ctx.stroke();

	let step = if state.k >= 4.0 { 1 } else if state.k >= 2.0 { 5 } else { 10 };
	ctx.set_font("10px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.45)");
	for year in state.scale.ticks(step) {
		let x = state.screen_x(state.scale.x(year as f64));
		if x < 0.0 || x > state.width {
			continue;
		}
		ctx.begin_path();
		ctx.move_to(x, state.height - 18.0);
		ctx.line_to(x, state.height - 12.0);
		ctx.stroke();
		let _ = ctx.fill_text(&year.to_string(), x - 12.0, state.height - 2.0);
	}
}

fn draw_cluster(
	state: &TimelineState,
	ctx: &CanvasRenderingContext2d,
	placed: &PlacedItem,
	hovered: bool,
) {
	let (x, y, r) = (
		state.screen_x(placed.x),
		state.axis_y() + placed.dy,
		placed.radius,
	);
	let colors = &placed.item.category_colors_in_cluster;
	// one wedge per category present
	let slice = 2.0 * PI / colors.len().max(1) as f64;
	for (i, color) in colors.iter().enumerate() {
		let start = -PI / 2.0 + slice * i as f64;
		ctx.begin_path();
		ctx.move_to(x, y);
		let _ = ctx.arc(x, y, r, start, start + slice);
		ctx.close_path();
		ctx.set_fill_style_str(color);
		ctx.fill();
	}

	paint::disc(ctx, (x, y), r * 0.55, "#16162a");

	ctx.set_fill_style_str("white");
	ctx.set_font("bold 11px sans-serif");
	let count = placed.item.count.to_string();
	let _ = ctx.fill_text(&count, x - 3.5 * count.len() as f64, y + 4.0);

	if hovered || state.resolution == Resolution::Decade {
		ctx.set_font("11px sans-serif");
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(&placed.item.label, x - r, y - r - 6.0);
	}
	if hovered {
		hover_ring(ctx, (x, y), r);
	}
}

fn draw_single(
	state: &TimelineState,
	ctx: &CanvasRenderingContext2d,
	placed: &PlacedItem,
	hovered: bool,
) {
	let (x, y, r) = (
		state.screen_x(placed.x),
		state.axis_y() + placed.dy,
		placed.radius,
	);
	paint::disc(ctx, (x, y), r, placed.color);

	if hovered || state.resolution == Resolution::Individual {
		ctx.set_font("10px sans-serif");
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(&placed.item.label, x + r + 3.0, y + 3.0);
	}
	if hovered {
		hover_ring(ctx, (x, y), r);
	}
}

fn hover_ring(ctx: &CanvasRenderingContext2d, at: (f64, f64), r: f64) {
	paint::ring(ctx, at, r + 3.0, "rgba(255, 255, 255, 0.7)", 1.5);
}
