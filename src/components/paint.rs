//! Canvas drawing primitives shared by the graph and timeline renderers.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub(crate) fn disc(ctx: &CanvasRenderingContext2d, (x, y): (f64, f64), r: f64, fill: &str) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, TAU);
	ctx.set_fill_style_str(fill);
	ctx.fill();
}

pub(crate) fn ring(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	r: f64,
	stroke: &str,
	width: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, TAU);
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(width);
	ctx.stroke();
}

/// Soft white halo fading out between `inner` and `outer`.
pub(crate) fn glow(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	inner: f64,
	outer: f64,
	alpha: f64,
) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, inner, x, y, outer) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {alpha})"));
	let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, outer, 0.0, TAU);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

/// Filled triangle with its point at `tip`, facing along the unit vector `dir`.
pub(crate) fn arrow_head(
	ctx: &CanvasRenderingContext2d,
	(tx, ty): (f64, f64),
	(ux, uy): (f64, f64),
	size: f64,
	fill: &str,
) {
	let (bx, by) = (tx - ux * size, ty - uy * size);
	let (px, py) = (-uy * size / 2.0, ux * size / 2.0);
	ctx.begin_path();
	ctx.move_to(tx, ty);
	ctx.line_to(bx + px, by + py);
	ctx.line_to(bx - px, by - py);
	ctx.close_path();
	ctx.set_fill_style_str(fill);
	ctx.fill();
}

/// Dash pattern for following strokes; an empty slice restores solid lines.
pub(crate) fn dash(ctx: &CanvasRenderingContext2d, pattern: &[f64], offset: f64) {
	let segments: js_sys::Array = pattern.iter().map(|&d| JsValue::from_f64(d)).collect();
	let _ = ctx.set_line_dash(&segments);
	ctx.set_line_dash_offset(offset);
}
