pub mod concept_graph;
pub mod detail_panel;
pub mod filter_bar;
mod paint;
pub mod scale;
pub mod timeline;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Client size of the canvas container, if it has been laid out.
fn parent_size(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	let parent = canvas.parent_element()?;
	let (w, h) = (parent.client_width(), parent.client_height());
	(w > 0 && h > 0).then_some((w as f64, h as f64))
}

/// Pointer position relative to the canvas' top-left corner.
fn event_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
