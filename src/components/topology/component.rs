use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::animation::AnimationHandle;
use super::health::HealthThresholds;
use super::model::Infrastructure;
use super::palette::LEGEND;
use super::render;
use super::state::TopologyState;
use super::surface::{SurfaceError, context_2d};
use super::types::{Endpoint, TopologyNode};

type SharedState = Rc<RefCell<Option<TopologyState>>>;

/// A canvas and its 2D context, looked up on the first frame that can use it.
struct FrameTarget {
	canvas: HtmlCanvasElement,
	ctx: Option<CanvasRenderingContext2d>,
}

impl FrameTarget {
	fn new(canvas: HtmlCanvasElement) -> Self {
		Self { canvas, ctx: None }
	}

	/// Draw one frame. On error nothing is drawn and the next call retries the lookup.
	fn draw(&mut self, state: &TopologyState, elapsed_ms: f64) -> Result<(), SurfaceError> {
		let ctx = match self.ctx.take() {
			Some(ctx) => ctx,
			None => context_2d(&self.canvas)?,
		};
		render::render(state, &ctx, elapsed_ms);
		self.ctx = Some(ctx);
		Ok(())
	}
}

/// Push the selection and zoom readouts out to the page.
fn publish(state: &SharedState, selected: RwSignal<Option<TopologyNode>>, zoom: RwSignal<f64>) {
	let Some((node, scale)) = state
		.borrow()
		.as_ref()
		.map(|s| (s.selected_node().cloned(), s.transform.scale))
	else {
		return;
	};
	if selected.get_untracked() != node {
		selected.set(node);
	}
	if zoom.get_untracked() != scale {
		zoom.set(scale);
	}
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn TopologyCanvas(
	#[prop(into)] endpoints: Signal<Vec<Endpoint>>,
	/// Written whenever the selected node changes; clearing it clears the canvas selection.
	selected: RwSignal<Option<TopologyNode>>,
	/// Current scale factor, for a zoom readout.
	zoom: RwSignal<f64>,
	#[prop(optional)] infrastructure: Infrastructure,
	#[prop(optional)] thresholds: HealthThresholds,
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animation = StoredValue::new_local(None::<AnimationHandle>);
	let live = RwSignal::new(true);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		*state_init.borrow_mut() = Some(TopologyState::new(
			infrastructure.clone(),
			thresholds,
			&endpoints.get_untracked(),
		));
		publish(&state_init, selected, zoom);

		let state_anim = state_init.clone();
		let mut origin: Option<f64> = None;
		let mut target = FrameTarget::new(canvas);
		let started = AnimationHandle::start(move |timestamp| {
			let elapsed = timestamp - *origin.get_or_insert(timestamp);
			let guard = state_anim.borrow();
			let Some(s) = guard.as_ref() else {
				return;
			};
			if let Err(err) = target.draw(s, elapsed) {
				debug!("skipping topology frame: {err}");
			}
		});
		match started {
			// replacing a previous handle drops it, which stops its loop
			Ok(handle) => animation.set_value(Some(handle)),
			Err(err) => error!("could not start topology animation: {err:?}"),
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let list = endpoints.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.set_endpoints(&list);
		}
		publish(&state_data, selected, zoom);
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		if selected.get().is_some() {
			return;
		}
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.clear_selection();
		}
	});

	on_cleanup(move || {
		animation.try_update_value(|handle| {
			if let Some(mut h) = handle.take() {
				h.stop();
			}
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
		publish(&state_md, selected, zoom);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(ev.delta_y());
		}
		publish(&state_wh, selected, zoom);
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zi.borrow_mut() {
			s.zoom_in();
		}
		publish(&state_zi, selected, zoom);
	};

	let state_zo = state.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zo.borrow_mut() {
			s.zoom_out();
		}
		publish(&state_zo, selected, zoom);
	};

	let state_rv = state.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rv.borrow_mut() {
			s.reset_view();
		}
		publish(&state_rv, selected, zoom);
	};

	let state_live = state;
	let on_toggle_live = move |_: MouseEvent| {
		let on = !live.get_untracked();
		live.set(on);
		if let Some(ref mut s) = *state_live.borrow_mut() {
			s.flow_animation = on;
		}
	};

	view! {
		<div class="topology">
			<div class="topology-toolbar">
				<button
					class=move || if live.get() { "toggle active" } else { "toggle" }
					on:click=on_toggle_live
				>
					{move || if live.get() { "Live" } else { "Static" }}
				</button>
				<button on:click=on_zoom_in title="Zoom in">"+"</button>
				<button on:click=on_zoom_out title="Zoom out">"-"</button>
				<button on:click=on_reset title="Reset view">"Reset"</button>
			</div>
			<div class="topology-legend">
				<h4>"Network Legend"</h4>
				<ul>
					{LEGEND
						.iter()
						.map(|(label, color)| {
							view! {
								<li>
									<span class="swatch" style=format!("background: {color};") />
									{*label}
								</li>
							}
						})
						.collect_view()}
				</ul>
				<Show when=move || live.get()>
					<p class="legend-live">"Live data flow active"</p>
				</Show>
			</div>
			<canvas
				node_ref=canvas_ref
				class="topology-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style=format!("display: block; cursor: grab; width: {width}px; height: {height}px;")
			/>
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen::JsCast;
	use wasm_bindgen_test::*;

	use super::*;
	use crate::components::topology::animation::tests::next_frames;

	wasm_bindgen_test_configure!(run_in_browser);

	fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
		let canvas: HtmlCanvasElement = web_sys::window()
			.unwrap()
			.document()
			.unwrap()
			.create_element("canvas")
			.unwrap()
			.dyn_into()
			.unwrap();
		canvas.set_width(width);
		canvas.set_height(height);
		canvas
	}

	fn state() -> TopologyState {
		TopologyState::new(Infrastructure::default(), HealthThresholds::default(), &[])
	}

	#[wasm_bindgen_test]
	fn zero_sized_canvas_has_no_context() {
		assert!(matches!(context_2d(&canvas(0, 0)), Err(SurfaceError::Unsized)));
		assert!(context_2d(&canvas(800, 600)).is_ok());
	}

	#[wasm_bindgen_test]
	fn frame_is_skipped_until_canvas_is_sized() {
		let state = state();
		let mut target = FrameTarget::new(canvas(0, 0));
		assert!(matches!(target.draw(&state, 0.0), Err(SurfaceError::Unsized)));
		assert!(target.ctx.is_none());

		target.canvas.set_width(800);
		target.canvas.set_height(600);
		assert!(target.draw(&state, 16.0).is_ok());
		assert!(target.ctx.is_some());
	}

	#[wasm_bindgen_test]
	async fn skipped_frames_keep_the_loop_scheduled() {
		let skipped = Rc::new(Cell::new(0u32));
		let counter = skipped.clone();
		let state = state();
		let mut target = FrameTarget::new(canvas(0, 0));
		let mut handle = AnimationHandle::start(move |timestamp| {
			if target.draw(&state, timestamp).is_err() {
				counter.set(counter.get() + 1);
			}
		})
		.unwrap();

		next_frames(4).await;
		assert!(skipped.get() >= 3);
		assert!(handle.is_pending());
		handle.stop();
		assert!(!handle.is_pending());
	}
}
