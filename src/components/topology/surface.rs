//! Minimal 2D drawing surface the renderer draws through.
//!
//! The browser implementation forwards to `CanvasRenderingContext2d`; tests use a
//! recorder. Style and transform changes are meant to live inside a [`Scope`],
//! which restores the previous context state when dropped.

use std::f64::consts::PI;
use std::ops::Deref;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

/// Fill or stroke source.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Solid(String),
	Linear {
		from: (f64, f64),
		to: (f64, f64),
		stops: Vec<(f64, String)>,
	},
	/// Inner and outer circles as `(x, y, r)`.
	Radial {
		inner: (f64, f64, f64),
		outer: (f64, f64, f64),
		stops: Vec<(f64, String)>,
	},
}

impl Paint {
	pub fn solid(color: impl Into<String>) -> Self {
		Paint::Solid(color.into())
	}
}

pub trait Surface {
	/// Drawing buffer size in pixels.
	fn size(&self) -> (f64, f64);
	fn save(&self);
	fn restore(&self);
	/// Scale by `scale`, then translate by `(dx, dy)` in scaled units.
	fn apply_view(&self, scale: f64, dx: f64, dy: f64);
	fn set_fill(&self, paint: &Paint);
	fn set_stroke(&self, paint: &Paint);
	fn set_line_width(&self, width: f64);
	/// Empty `segments` means a solid line.
	fn set_line_dash(&self, segments: &[f64], offset: f64);
	fn set_font(&self, font: &str);
	fn set_text_layout(&self, align: &str, baseline: &str);
	fn set_shadow(&self, color: &str, blur: f64);
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
	fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64));
	fn fill_circle(&self, x: f64, y: f64, r: f64);
	fn stroke_circle(&self, x: f64, y: f64, r: f64);
	fn fill_text(&self, text: &str, x: f64, y: f64);
	fn measure_text(&self, text: &str) -> f64;

	/// Save now, restore when the returned guard drops.
	fn scoped(&self) -> Scope<'_, Self>
	where
		Self: Sized,
	{
		self.save();
		Scope(self)
	}
}

/// Save/restore bracket around a run of draw calls.
pub struct Scope<'a, S: Surface>(&'a S);

impl<S: Surface> Deref for Scope<'_, S> {
	type Target = S;

	fn deref(&self) -> &S {
		self.0
	}
}

impl<S: Surface> Drop for Scope<'_, S> {
	fn drop(&mut self) {
		self.0.restore();
	}
}

#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("canvas has not been sized yet")]
	Unsized,
	#[error("2d context is unavailable")]
	NoContext,
	#[error("canvas call failed: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(format!("{value:?}"))
	}
}

/// The canvas's 2D context, once the canvas is laid out.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	if canvas.width() == 0 || canvas.height() == 0 {
		return Err(SurfaceError::Unsized);
	}
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::NoContext)
}

fn gradient(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Option<CanvasGradient> {
	let (gradient, stops) = match paint {
		Paint::Solid(_) => return None,
		Paint::Linear { from, to, stops } => {
			(ctx.create_linear_gradient(from.0, from.1, to.0, to.1), stops)
		}
		Paint::Radial {
			inner,
			outer,
			stops,
		} => (
			ctx.create_radial_gradient(inner.0, inner.1, inner.2, outer.0, outer.1, outer.2)
				.ok()?,
			stops,
		),
	};
	for (offset, color) in stops {
		let _ = gradient.add_color_stop(*offset as f32, color);
	}
	Some(gradient)
}

impl Surface for CanvasRenderingContext2d {
	fn size(&self) -> (f64, f64) {
		self.canvas()
			.map(|c| (c.width() as f64, c.height() as f64))
			.unwrap_or((0.0, 0.0))
	}

	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn apply_view(&self, scale: f64, dx: f64, dy: f64) {
		let _ = CanvasRenderingContext2d::scale(self, scale, scale);
		let _ = CanvasRenderingContext2d::translate(self, dx, dy);
	}

	fn set_fill(&self, paint: &Paint) {
		if let Paint::Solid(color) = paint {
			self.set_fill_style_str(color);
		} else if let Some(g) = gradient(self, paint) {
			self.set_fill_style_canvas_gradient(&g);
		}
	}

	fn set_stroke(&self, paint: &Paint) {
		if let Paint::Solid(color) = paint {
			self.set_stroke_style_str(color);
		} else if let Some(g) = gradient(self, paint) {
			self.set_stroke_style_canvas_gradient(&g);
		}
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_line_dash(&self, segments: &[f64], offset: f64) {
		let dash: js_sys::Array = segments.iter().map(|s| JsValue::from_f64(*s)).collect();
		let _ = CanvasRenderingContext2d::set_line_dash(self, &dash);
		self.set_line_dash_offset(offset);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn set_text_layout(&self, align: &str, baseline: &str) {
		self.set_text_align(align);
		self.set_text_baseline(baseline);
	}

	fn set_shadow(&self, color: &str, blur: f64) {
		self.set_shadow_color(color);
		self.set_shadow_blur(blur);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64)) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_circle(&self, x: f64, y: f64, r: f64) {
		self.begin_path();
		let _ = self.arc(x, y, r.max(0.0), 0.0, 2.0 * PI);
		self.fill();
	}

	fn stroke_circle(&self, x: f64, y: f64, r: f64) {
		self.begin_path();
		let _ = self.arc(x, y, r.max(0.0), 0.0, 2.0 * PI);
		self.stroke();
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn measure_text(&self, text: &str) -> f64 {
		CanvasRenderingContext2d::measure_text(self, text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}
}

#[cfg(test)]
pub mod recording {
	//! Surface that records calls instead of drawing them.

	use std::cell::RefCell;

	use super::{Paint, Surface};

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Save,
		Restore,
		View(f64, f64, f64),
		Fill(Paint),
		Stroke(Paint),
		LineWidth(f64),
		Dash(Vec<f64>, f64),
		Font(String),
		TextLayout(String, String),
		Shadow(String, f64),
		FillRect(f64, f64, f64, f64),
		StrokeRect(f64, f64, f64, f64),
		Line((f64, f64), (f64, f64)),
		FillCircle(f64, f64, f64),
		StrokeCircle(f64, f64, f64),
		Text(String, f64, f64),
	}

	pub struct Recorder {
		pub width: f64,
		pub height: f64,
		pub ops: RefCell<Vec<Op>>,
	}

	impl Recorder {
		pub fn new(width: f64, height: f64) -> Self {
			Self {
				width,
				height,
				ops: RefCell::new(Vec::new()),
			}
		}

		pub fn take(&self) -> Vec<Op> {
			self.ops.take()
		}

		fn push(&self, op: Op) {
			self.ops.borrow_mut().push(op);
		}
	}

	impl Surface for Recorder {
		fn size(&self) -> (f64, f64) {
			(self.width, self.height)
		}
		fn save(&self) {
			self.push(Op::Save);
		}
		fn restore(&self) {
			self.push(Op::Restore);
		}
		fn apply_view(&self, scale: f64, dx: f64, dy: f64) {
			self.push(Op::View(scale, dx, dy));
		}
		fn set_fill(&self, paint: &Paint) {
			self.push(Op::Fill(paint.clone()));
		}
		fn set_stroke(&self, paint: &Paint) {
			self.push(Op::Stroke(paint.clone()));
		}
		fn set_line_width(&self, width: f64) {
			self.push(Op::LineWidth(width));
		}
		fn set_line_dash(&self, segments: &[f64], offset: f64) {
			self.push(Op::Dash(segments.to_vec(), offset));
		}
		fn set_font(&self, font: &str) {
			self.push(Op::Font(font.into()));
		}
		fn set_text_layout(&self, align: &str, baseline: &str) {
			self.push(Op::TextLayout(align.into(), baseline.into()));
		}
		fn set_shadow(&self, color: &str, blur: f64) {
			self.push(Op::Shadow(color.into(), blur));
		}
		fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
			self.push(Op::FillRect(x, y, w, h));
		}
		fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
			self.push(Op::StrokeRect(x, y, w, h));
		}
		fn stroke_line(&self, from: (f64, f64), to: (f64, f64)) {
			self.push(Op::Line(from, to));
		}
		fn fill_circle(&self, x: f64, y: f64, r: f64) {
			self.push(Op::FillCircle(x, y, r));
		}
		fn stroke_circle(&self, x: f64, y: f64, r: f64) {
			self.push(Op::StrokeCircle(x, y, r));
		}
		fn fill_text(&self, text: &str, x: f64, y: f64) {
			self.push(Op::Text(text.into(), x, y));
		}
		fn measure_text(&self, text: &str) -> f64 {
			text.chars().count() as f64 * 7.0
		}
	}
}
