use super::jitter::bar_opacity;
use super::palette::{
	ALERT, BACKGROUND_BOTTOM, BACKGROUND_TOP, BORDER, GRID, LABEL_BACKING, LABEL_OUTLINE,
	LABEL_TEXT, OK, TRACK, lighten, link_width, node_color, node_glyph, status_color, with_alpha,
};
use super::state::{NODE_RADIUS, TopologyState};
use super::surface::{Paint, Surface};
use super::types::{NodeKind, NodeStatus, TopologyNode};

pub const GRID_SPACING: f64 = 50.0;

const LINK_DASH: [f64; 2] = [10.0, 5.0];
const BORDER_DASH: [f64; 2] = [8.0, 4.0];
const DASH_SPEED: f64 = 0.1;
const FLOW_SPEED: f64 = 0.002;
pub const FLOW_MARKER_RADIUS: f64 = 3.0;

const PULSE_SPEED: f64 = 0.005;
const PULSE_AMPLITUDE: f64 = 3.0;
const GLOW: f64 = 10.0;

const DOT_RADIUS: f64 = 10.0;
const DOT_PULSE_SPEED: f64 = 0.008;
const DOT_PULSE_AMPLITUDE: f64 = 2.0;

const LABEL_LINE_HEIGHT: f64 = 16.0;
const LABEL_GAP: f64 = 25.0;

const OVERLAY_BAR_WIDTH: f64 = 80.0;

/// Draw one frame. `elapsed_ms` is time since the loop started; the same state
/// and time always produce the same calls.
pub fn render<S: Surface>(state: &TopologyState, surface: &S, elapsed_ms: f64) {
	let (width, height) = surface.size();
	draw_background(surface, width, height);
	draw_grid(state, surface, width, height);
	{
		let view = surface.scoped();
		let t = &state.transform;
		view.apply_view(t.scale, t.offset_x, t.offset_y);
		draw_links(state, &*view, elapsed_ms);
		draw_nodes(state, &*view, elapsed_ms);
	}
	draw_health(state, surface, width);
}

fn draw_background<S: Surface>(surface: &S, width: f64, height: f64) {
	let s = surface.scoped();
	s.set_fill(&Paint::Linear {
		from: (0.0, 0.0),
		to: (width, height),
		stops: vec![(0.0, BACKGROUND_TOP.into()), (1.0, BACKGROUND_BOTTOM.into())],
	});
	s.fill_rect(0.0, 0.0, width, height);
}

fn draw_grid<S: Surface>(state: &TopologyState, surface: &S, width: f64, height: f64) {
	let k = state.transform.scale;
	let spacing = GRID_SPACING * k;
	if spacing <= 0.0 {
		return;
	}
	let s = surface.scoped();
	s.set_stroke(&Paint::solid(GRID));
	s.set_line_width(0.5);

	let mut x = (state.transform.offset_x * k).rem_euclid(spacing);
	while x < width {
		s.stroke_line((x, 0.0), (x, height));
		x += spacing;
	}
	let mut y = (state.transform.offset_y * k).rem_euclid(spacing);
	while y < height {
		s.stroke_line((0.0, y), (width, y));
		y += spacing;
	}
}

fn draw_links<S: Surface>(state: &TopologyState, surface: &S, elapsed_ms: f64) {
	let live = state.flow_animation;
	for link in &state.model.links {
		let (Some(src), Some(dst)) = (state.model.node(&link.source), state.model.node(&link.target))
		else {
			continue;
		};
		let (from, to) = ((src.x, src.y), (dst.x, dst.y));
		let color = status_color(link.status);

		let s = surface.scoped();
		s.set_stroke(&Paint::Linear {
			from,
			to,
			stops: vec![
				(0.0, color.into()),
				(0.5, with_alpha(color, 0.8)),
				(1.0, color.into()),
			],
		});
		s.set_line_width(link_width(link.medium));
		if link.status == NodeStatus::Disconnected {
			let period: f64 = LINK_DASH.iter().sum();
			let phase = if live { (elapsed_ms * DASH_SPEED) % period } else { 0.0 };
			s.set_line_dash(&LINK_DASH, phase);
		}
		s.stroke_line(from, to);

		if link.status != NodeStatus::Connected {
			continue;
		}
		if live {
			let progress = (elapsed_ms * FLOW_SPEED) % 1.0;
			s.set_fill(&Paint::solid(color));
			s.fill_circle(
				from.0 + (to.0 - from.0) * progress,
				from.1 + (to.1 - from.1) * progress,
				FLOW_MARKER_RADIUS,
			);
		}

		// strength ticks at the midpoint
		let id = link.id();
		let (mx, my) = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
		let tick_time = if live { elapsed_ms } else { 0.0 };
		for i in 0..3u32 {
			let alpha = bar_opacity(&id, i, tick_time, 0.8, 0.3, 0.4);
			s.set_fill(&Paint::Solid(with_alpha(color, alpha)));
			s.fill_rect(mx - 6.0 + i as f64 * 4.0, my - 2.0, 2.0, 4.0);
		}
	}
}

fn draw_nodes<S: Surface>(state: &TopologyState, surface: &S, elapsed_ms: f64) {
	for node in &state.model.nodes {
		draw_node(state, surface, node, elapsed_ms);
	}
}

fn draw_node<S: Surface>(state: &TopologyState, surface: &S, node: &TopologyNode, elapsed_ms: f64) {
	let selected = state.is_selected(&node.id);
	let active = selected || state.is_hovered(&node.id);
	let pulse = if active {
		(elapsed_ms * PULSE_SPEED).sin() * PULSE_AMPLITUDE
	} else {
		0.0
	};
	let radius = NODE_RADIUS + pulse;
	let (x, y) = (node.x, node.y);
	let base = node_color(node);

	if active {
		let s = surface.scoped();
		s.set_fill(&Paint::Radial {
			inner: (x, y, 0.0),
			outer: (x, y, radius + GLOW),
			stops: vec![(0.0, with_alpha(base, 0.25)), (1.0, with_alpha(base, 0.0))],
		});
		s.fill_circle(x, y, radius + GLOW);
	}

	{
		let s = surface.scoped();
		s.set_fill(&Paint::Radial {
			inner: (x - radius / 3.0, y - radius / 3.0, 0.0),
			outer: (x, y, radius),
			stops: vec![(0.0, lighten(base)), (1.0, base.into())],
		});
		s.fill_circle(x, y, radius);
	}

	{
		let s = surface.scoped();
		let disconnected = node.status == NodeStatus::Disconnected;
		let border = if selected || disconnected { ALERT } else { BORDER };
		s.set_stroke(&Paint::solid(border));
		s.set_line_width(if active { 4.0 } else { 3.0 });
		if disconnected {
			s.set_line_dash(&BORDER_DASH, 0.0);
		}
		s.stroke_circle(x, y, radius);
	}

	{
		let s = surface.scoped();
		s.set_fill(&Paint::solid("#ffffff"));
		s.set_font("bold 18px Arial");
		s.set_text_layout("center", "middle");
		s.set_shadow("rgba(0, 0, 0, 0.3)", 2.0);
		s.fill_text(node_glyph(node.kind), x, y);
	}

	draw_label(surface, &node.label, x, y + radius + LABEL_GAP);

	if node.kind == NodeKind::Endpoint {
		draw_status_dot(state, surface, node, radius, elapsed_ms);
		if node.status == NodeStatus::Connected {
			draw_signal_bars(state, surface, node, radius, elapsed_ms);
		}
	}
}

fn draw_label<S: Surface>(surface: &S, label: &str, x: f64, y: f64) {
	let lines: Vec<&str> = label.lines().collect();
	if lines.is_empty() {
		return;
	}
	let s = surface.scoped();
	s.set_font("bold 13px Arial");
	s.set_text_layout("center", "middle");
	let text_width = lines
		.iter()
		.map(|line| s.measure_text(line))
		.fold(0.0, f64::max);
	let height = lines.len() as f64 * LABEL_LINE_HEIGHT;
	let (bx, by, bw, bh) = (x - text_width / 2.0 - 8.0, y - 8.0, text_width + 16.0, height + 12.0);

	s.set_fill(&Paint::solid(LABEL_BACKING));
	s.fill_rect(bx, by, bw, bh);
	s.set_stroke(&Paint::solid(LABEL_OUTLINE));
	s.set_line_width(1.0);
	s.stroke_rect(bx, by, bw, bh);

	s.set_fill(&Paint::solid(LABEL_TEXT));
	for (i, line) in lines.iter().enumerate() {
		s.set_font(if i == 0 { "bold 13px Arial" } else { "normal 13px Arial" });
		s.fill_text(line, x, y + i as f64 * LABEL_LINE_HEIGHT);
	}
}

fn draw_status_dot<S: Surface>(
	state: &TopologyState,
	surface: &S,
	node: &TopologyNode,
	radius: f64,
	elapsed_ms: f64,
) {
	let connected = node.status == NodeStatus::Connected;
	let r = if connected && state.flow_animation {
		DOT_RADIUS + (elapsed_ms * DOT_PULSE_SPEED).sin() * DOT_PULSE_AMPLITUDE
	} else {
		DOT_RADIUS
	};
	let (dx, dy) = (node.x + radius - DOT_RADIUS / 2.0, node.y - radius + DOT_RADIUS / 2.0);

	let s = surface.scoped();
	s.set_fill(&Paint::solid(if connected { OK } else { ALERT }));
	s.fill_circle(dx, dy, r);
	s.set_fill(&Paint::solid("rgba(255, 255, 255, 0.8)"));
	s.fill_circle(dx - 2.0, dy - 2.0, r * 0.4);
}

fn draw_signal_bars<S: Surface>(
	state: &TopologyState,
	surface: &S,
	node: &TopologyNode,
	radius: f64,
	elapsed_ms: f64,
) {
	const BARS: u32 = 4;
	const BAR_WIDTH: f64 = 2.0;
	const BAR_SPACING: f64 = 1.0;

	let time = if state.flow_animation { elapsed_ms } else { 0.0 };
	let start_x = node.x - (BARS as f64 * (BAR_WIDTH + BAR_SPACING)) / 2.0;
	let start_y = node.y + radius + 5.0;

	let s = surface.scoped();
	for i in 0..BARS {
		let h = (i + 1) as f64 * 3.0;
		let alpha = bar_opacity(&node.id, i, time, 1.0, 0.3, 0.3);
		s.set_fill(&Paint::Solid(with_alpha(OK, alpha)));
		s.fill_rect(start_x + i as f64 * (BAR_WIDTH + BAR_SPACING), start_y - h, BAR_WIDTH, h);
	}
}

fn draw_health<S: Surface>(state: &TopologyState, surface: &S, width: f64) {
	let pct = state.summary.health_percentage;
	let color = state.thresholds.level(pct).color();
	let (x, y) = (width - 120.0, 30.0);

	let s = surface.scoped();
	s.set_fill(&Paint::solid(LABEL_BACKING));
	s.fill_rect(x - 10.0, y - 10.0, 110.0, 40.0);
	s.set_stroke(&Paint::solid(LABEL_OUTLINE));
	s.set_line_width(1.0);
	s.stroke_rect(x - 10.0, y - 10.0, 110.0, 40.0);

	s.set_fill(&Paint::solid(TRACK));
	s.fill_rect(x, y + 10.0, OVERLAY_BAR_WIDTH, 8.0);
	s.set_fill(&Paint::solid(color));
	s.fill_rect(x, y + 10.0, OVERLAY_BAR_WIDTH * pct as f64 / 100.0, 8.0);

	s.set_fill(&Paint::solid(BORDER));
	s.set_font("bold 12px Arial");
	s.set_text_layout("left", "alphabetic");
	s.fill_text(&format!("Health: {pct}%"), x, y + 5.0);
}
