use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ConceptGraphState;
use crate::components::detail_panel::Selection;
use crate::components::{canvas_context, event_position, parent_size};
use crate::graph::Graph;
use crate::timeline::CategoryPalette;

/// Force-directed dependency graph with nodes pinned horizontally by year.
#[component]
pub fn ConceptGraphCanvas(
	#[prop(into)] graph: Signal<Graph>,
	#[prop(into)] palette: Signal<CategoryPalette>,
	/// Year domain of the whole dataset, so filtering does not rescale the axis.
	#[prop(into)]
	years: Signal<(i32, i32)>,
	selected: RwSignal<Option<Selection>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ConceptGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	if width.is_none() || height.is_none() {
		let state_resize = state.clone();
		let listener = window_event_listener(ev::resize, move |_| {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let Some((pw, ph)) = parent_size(&canvas) else {
				return;
			};
			let (nw, nh) = (width.unwrap_or(pw), height.unwrap_or(ph));
			canvas.set_width(nw as u32);
			canvas.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		});
		on_cleanup(move || listener.remove());
	}

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (data, colors, span) = (graph.get(), palette.get(), years.get());

		// later runs only swap the data under the running animation
		if let Some(ref mut s) = *state_init.borrow_mut() {
			debug!(
				"graph view reloaded: {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			s.load(&data, &colors, span);
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let (pw, ph) = parent_size(&canvas).unwrap_or((800.0, 600.0));
		let (w, h) = (width.unwrap_or(pw), height.unwrap_or(ph));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas_context(&canvas) else {
			warn!("graph canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(ConceptGraphState::new(&data, &colors, span, w, h));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// the view was unmounted; stop scheduling frames
			if !canvas.is_connected() {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				// x belongs to the year axis, so dragging only moves nodes vertically
				if let Some(idx) = s.drag.node_idx {
					let ny = s.drag.node_start_y + ((y - s.drag.start_y) / s.transform.k) as f32;
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_cl = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		let hit = state_cl
			.borrow()
			.as_ref()
			.and_then(|s| s.concept_at_position(x, y));
		if let Some(id) = hit {
			let selection = graph.with_untracked(|g| {
				g.nodes.iter().find(|n| n.id == id).map(Selection::concept)
			});
			selected.set(selection);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="concept-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
