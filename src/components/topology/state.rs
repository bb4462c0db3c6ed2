use log::debug;

use super::health::{HealthSummary, HealthThresholds, summarize};
use super::model::{Infrastructure, build_topology};
use super::types::{Endpoint, TopologyModel, TopologyNode};

pub const NODE_RADIUS: f64 = 35.0;
/// Pick radius in logical units; scales with zoom like the nodes.
pub const HIT_RADIUS: f64 = 35.0;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;

const WHEEL_IN: f64 = 1.1;
const WHEEL_OUT: f64 = 0.9;
const STEP_IN: f64 = 1.2;
const STEP_OUT: f64 = 0.8;

/// Pan/zoom applied to every logical draw call: `screen = (logical + offset) * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}
}

impl ViewTransform {
	pub fn to_logical(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx / self.scale - self.offset_x, sy / self.scale - self.offset_y)
	}

	#[cfg(test)]
	pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		((x + self.offset_x) * self.scale, (y + self.offset_y) * self.scale)
	}

	fn zoom(&mut self, factor: f64) {
		self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub offset_start_x: f64,
	pub offset_start_y: f64,
}

/// Node ids, never node references, so a rebuild cannot leave them dangling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	pub selected: Option<String>,
	pub hovered: Option<String>,
}

pub struct TopologyState {
	pub model: TopologyModel,
	pub summary: HealthSummary,
	pub thresholds: HealthThresholds,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub selection: SelectionState,
	/// Flow markers, marching ants and status-dot pulse.
	pub flow_animation: bool,
	infrastructure: Infrastructure,
}

impl TopologyState {
	pub fn new(
		infrastructure: Infrastructure,
		thresholds: HealthThresholds,
		endpoints: &[Endpoint],
	) -> Self {
		Self {
			model: build_topology(&infrastructure, endpoints),
			summary: summarize(endpoints),
			thresholds,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			selection: SelectionState::default(),
			flow_animation: true,
			infrastructure,
		}
	}

	/// Rebuild from a fresh snapshot. Returns `true` when the selection was dropped.
	pub fn set_endpoints(&mut self, endpoints: &[Endpoint]) -> bool {
		self.model = build_topology(&self.infrastructure, endpoints);
		self.summary = summarize(endpoints);

		if let Some(id) = &self.selection.hovered {
			if !self.model.contains(id) {
				self.selection.hovered = None;
			}
		}
		match &self.selection.selected {
			Some(id) if !self.model.contains(id) => {
				debug!("selected node {id} left the topology");
				self.selection.selected = None;
				true
			}
			_ => false,
		}
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&TopologyNode> {
		let (x, y) = self.transform.to_logical(sx, sy);
		let mut best: Option<(&TopologyNode, f64)> = None;
		for node in &self.model.nodes {
			let dist = (node.x - x).hypot(node.y - y);
			if dist >= HIT_RADIUS {
				continue;
			}
			if best.is_none_or(|(_, d)| dist < d) {
				best = Some((node, dist));
			}
		}
		best.map(|(node, _)| node)
	}

	/// Select the node under the pointer or start panning. Returns `true` when
	/// the selection changed.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> bool {
		let before = self.selection.selected.clone();
		match self.node_at_position(sx, sy).map(|n| n.id.clone()) {
			Some(id) => {
				self.selection.selected = Some(id);
				self.selection.hovered = None;
				self.pan = PanState::default();
			}
			None => {
				self.selection.selected = None;
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					offset_start_x: self.transform.offset_x,
					offset_start_y: self.transform.offset_y,
				};
			}
		}
		before != self.selection.selected
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			let k = self.transform.scale;
			self.transform.offset_x = self.pan.offset_start_x + (sx - self.pan.start_x) / k;
			self.transform.offset_y = self.pan.offset_start_y + (sy - self.pan.start_y) / k;
		} else {
			let hovered = self.node_at_position(sx, sy).map(|n| n.id.clone());
			self.set_hover(hovered);
		}
	}

	pub fn pointer_up(&mut self) {
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		self.selection.hovered = node;
	}

	/// One wheel notch; positive `delta_y` zooms out. A zero delta (a purely
	/// horizontal scroll) leaves the scale alone.
	pub fn wheel(&mut self, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		self.transform.zoom(if delta_y > 0.0 { WHEEL_OUT } else { WHEEL_IN });
	}

	pub fn zoom_in(&mut self) {
		self.transform.zoom(STEP_IN);
	}

	pub fn zoom_out(&mut self) {
		self.transform.zoom(STEP_OUT);
	}

	pub fn reset_view(&mut self) {
		self.transform = ViewTransform::default();
		self.pan = PanState::default();
		self.selection = SelectionState::default();
	}

	pub fn clear_selection(&mut self) {
		self.selection.selected = None;
	}

	pub fn selected_node(&self) -> Option<&TopologyNode> {
		self.selection.selected.as_deref().and_then(|id| self.model.node(id))
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selection.selected.as_deref() == Some(id)
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.selection.hovered.as_deref() == Some(id)
	}
}
