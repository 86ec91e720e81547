use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::TimelineState;
use crate::components::detail_panel::Selection;
use crate::components::{canvas_context, event_position, parent_size};
use crate::data::Node;
use crate::timeline::{CategoryPalette, TimelineAggregator};

type Shared = Rc<RefCell<Option<(TimelineState, CanvasRenderingContext2d)>>>;

fn redraw(shared: &Shared) {
	if let Some((ref s, ref ctx)) = *shared.borrow() {
		render::render(s, ctx);
	}
}

/// Zoomable timeline. Zoom level drives the clustering resolution.
#[component]
pub fn TimelineCanvas(
	#[prop(into)] nodes: Signal<Vec<Node>>,
	#[prop(into)] palette: Signal<CategoryPalette>,
	selected: RwSignal<Option<Selection>>,
	#[prop(default = TimelineAggregator::default())] aggregator: TimelineAggregator,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let shared: Shared = Rc::new(RefCell::new(None));
	let shared_init = shared.clone();

	let shared_resize = shared.clone();
	let listener = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some((w, h)) = parent_size(&canvas) else {
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some((ref mut s, _)) = *shared_resize.borrow_mut() {
			s.resize(w, h);
		}
		redraw(&shared_resize);
	});
	on_cleanup(move || listener.remove());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (list, colors) = (nodes.get(), palette.get());

		if shared_init.borrow().is_some() {
			debug!("timeline reloaded with {} nodes", list.len());
			if let Some((ref mut s, _)) = *shared_init.borrow_mut() {
				s.load(list, colors);
			}
		} else {
			let (w, h) = parent_size(&canvas).unwrap_or((800.0, 160.0));
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			let Some(ctx) = canvas_context(&canvas) else {
				warn!("timeline canvas has no 2d context");
				return;
			};
			*shared_init.borrow_mut() =
				Some((TimelineState::new(list, colors, aggregator, w, h), ctx));
		}
		redraw(&shared_init);
	});

	let shared_wh = shared.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, _)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some((ref mut s, _)) = *shared_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			if s.zoom(x, factor) {
				debug!("timeline resolution {:?} at scale {:.2}", s.resolution, s.k);
			}
		}
		redraw(&shared_wh);
	};

	let shared_md = shared.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, _)) = event_position(canvas_ref, &ev) else {
			return;
		};
		if let Some((ref mut s, _)) = *shared_md.borrow_mut() {
			s.pan.active = true;
			s.pan.moved = false;
			s.pan.start_x = x;
			s.pan.transform_start_x = s.offset_x;
		}
	};

	let shared_mm = shared.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		let mut dirty = false;
		if let Some((ref mut s, _)) = *shared_mm.borrow_mut() {
			if s.pan.active {
				let dx = x - s.pan.start_x;
				s.pan.moved |= dx.abs() > 3.0;
				s.pan_to(s.pan.transform_start_x + dx);
				dirty = true;
			} else {
				dirty = s.set_hover(x, y);
			}
		}
		if dirty {
			redraw(&shared_mm);
		}
	};

	let shared_mu = shared.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};
		let mut picked = None;
		if let Some((ref mut s, _)) = *shared_mu.borrow_mut() {
			// a press that did not pan is a click
			if s.pan.active && !s.pan.moved {
				picked = s.item_at(x, y).map(Selection::from_item);
			}
			s.pan.active = false;
		}
		if picked.is_some() {
			selected.set(picked);
		}
	};

	let shared_ml = shared.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some((ref mut s, _)) = *shared_ml.borrow_mut() {
			s.pan.active = false;
			s.hover = None;
		}
		redraw(&shared_ml);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="timeline-canvas"
			on:wheel=on_wheel
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}
