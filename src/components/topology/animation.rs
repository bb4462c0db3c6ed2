//! `requestAnimationFrame` loop owned by a handle.
//!
//! The frame callback only holds a weak reference to itself, so dropping the
//! handle is enough to end the loop; [`AnimationHandle::stop`] additionally
//! cancels the frame that is already queued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

pub struct AnimationHandle {
	pending: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationHandle {
	/// Call `on_frame` with the frame timestamp (ms) on every animation frame
	/// until the handle is stopped or dropped.
	pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

		let (pending_inner, callback_inner) = (pending.clone(), Rc::downgrade(&callback));
		let frame: FrameCallback = Closure::new(move |timestamp: f64| {
			pending_inner.set(None);
			on_frame(timestamp);

			let Some(callback) = callback_inner.upgrade() else {
				return;
			};
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback.borrow() {
				match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_inner.set(Some(id)),
					Err(err) => warn!("animation frame request failed: {err:?}"),
				}
			}
		});

		let id = window.request_animation_frame(frame.as_ref().unchecked_ref())?;
		pending.set(Some(id));
		*callback.borrow_mut() = Some(frame);

		Ok(Self { pending, callback })
	}

	#[cfg(all(test, target_arch = "wasm32"))]
	pub fn is_pending(&self) -> bool {
		self.pending.get().is_some()
	}

	/// Cancel the queued frame and release the callback. Idempotent.
	pub fn stop(&mut self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.callback.borrow_mut().take();
	}
}

impl Drop for AnimationHandle {
	fn drop(&mut self) {
		self.stop();
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod tests {
	use wasm_bindgen_futures::JsFuture;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	/// Resolve after `n` animation frames.
	pub(crate) async fn next_frames(n: u32) {
		for _ in 0..n {
			let frame = js_sys::Promise::new(&mut |resolve, _reject| {
				let _ = web_sys::window().unwrap().request_animation_frame(&resolve);
			});
			JsFuture::from(frame).await.unwrap();
		}
	}

	fn counting() -> (Rc<Cell<u32>>, AnimationHandle) {
		let frames = Rc::new(Cell::new(0u32));
		let counter = frames.clone();
		let handle = AnimationHandle::start(move |_| counter.set(counter.get() + 1)).unwrap();
		(frames, handle)
	}

	#[wasm_bindgen_test]
	async fn stop_cancels_the_queued_frame() {
		let (frames, mut handle) = counting();
		assert!(handle.is_pending());
		next_frames(3).await;
		assert!(frames.get() >= 2);

		handle.stop();
		assert!(!handle.is_pending());
		let seen = frames.get();
		next_frames(3).await;
		assert_eq!(frames.get(), seen);

		handle.stop();
		assert!(!handle.is_pending());
	}

	#[wasm_bindgen_test]
	async fn dropping_the_handle_ends_the_loop() {
		let (frames, handle) = counting();
		next_frames(2).await;
		drop(handle);
		let seen = frames.get();
		next_frames(3).await;
		assert_eq!(frames.get(), seen);
	}
}
