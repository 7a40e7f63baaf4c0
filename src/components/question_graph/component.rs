use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{CanvasState, Hit};
use crate::graph::{Snapshot, ToggleEvent};
use crate::session::GraphEvent;

/// Canvas view of a question graph.
///
/// Reads the snapshot; never changes it. Collapse clicks and node drops are
/// pushed onto `events` for the session to apply.
#[component]
pub fn QuestionGraphCanvas(
	#[prop(into)] snapshot: Signal<Snapshot>,
	/// Identifies the graph being shown; the view is re-fitted when it changes.
	#[prop(into)]
	graph_key: Signal<Option<String>>,
	events: RwSignal<Vec<GraphEvent>>,
	/// Id of the node under the pointer.
	hovered: RwSignal<Option<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window to draw the question graph in");
			return;
		};
		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};
		*state_init.borrow_mut() = Some(CanvasState::new(w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				snapshot.with_untracked(|snap| {
					if let Some(key) = graph_key.get_untracked() {
						s.fit_once(snap, &key);
					}
					render::render(s, snap, &ctx);
				});
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let hit = snapshot.with_untracked(|snap| s.hit_test(snap, x, y));
			match hit {
				Some(Hit::Toggle { node_id, collapsed }) => {
					let toggle = ToggleEvent::new(node_id, !collapsed);
					events.update(|queue| queue.push(GraphEvent::Toggle(toggle)));
				}
				Some(Hit::Node { node_id }) => {
					snapshot.with_untracked(|snap| {
						if let Some(node) = snap.node(&node_id) {
							s.begin_drag(node, x, y);
						}
					});
				}
				None => {
					s.pan.active = true;
					s.pan.start_x = x;
					s.pan.start_y = y;
					s.pan.transform_start_x = s.transform.x;
					s.pan.transform_start_y = s.transform.y;
				}
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.drag.active {
				let over = snapshot
					.with_untracked(|snap| s.hit_test(snap, x, y))
					.map(|hit| match hit {
						Hit::Toggle { node_id, .. } | Hit::Node { node_id } => node_id,
					});
				if s.hovered != over {
					s.hovered.clone_from(&over);
					hovered.set(over);
				}
			}

			if s.drag.active {
				s.update_drag(x, y);
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if let Some((node_id, position)) = s.end_drag() {
				events.update(|queue| queue.push(GraphEvent::MoveNode { node_id, position }));
			}
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if let Some((node_id, position)) = s.end_drag() {
				events.update(|queue| queue.push(GraphEvent::MoveNode { node_id, position }));
			}
			s.pan.active = false;
			if s.hovered.take().is_some() {
				hovered.set(None);
			}
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_by(factor, x, y);
		}
	};

	// Zoom buttons scale around the middle of the viewport.
	let zoom = |state: Rc<RefCell<Option<CanvasState>>>, factor: f64| {
		move |_: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				let (cx, cy) = (s.width / 2.0, s.height / 2.0);
				s.zoom_by(factor, cx, cy);
			}
		}
	};
	let (on_zoom_in, on_zoom_out) = (zoom(state.clone(), 1.2), zoom(state.clone(), 1.0 / 1.2));

	let state_fit = state.clone();
	let on_fit = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			snapshot.with_untracked(|snap| s.fit(snap));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="question-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="graph-controls">
			<button on:click=on_zoom_in title="Zoom in">"+"</button>
			<button on:click=on_zoom_out title="Zoom out">"−"</button>
			<button on:click=on_fit title="Fit view">"Fit"</button>
		</div>
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(read(window.inner_width(), 800.0), read(window.inner_height(), 600.0))
}

/// Pointer position relative to the canvas.
fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}
