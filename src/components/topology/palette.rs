use super::types::{LinkMedium, NodeKind, NodeStatus, TopologyNode};

pub const BACKGROUND_TOP: &str = "#f8fafc";
pub const BACKGROUND_BOTTOM: &str = "#f1f5f9";
pub const GRID: &str = "#e2e8f0";
pub const BORDER: &str = "#374151";
pub const ALERT: &str = "#ef4444";
pub const OK: &str = "#10b981";
pub const WARN: &str = "#f59e0b";
pub const IDLE: &str = "#6b7280";
pub const LABEL_TEXT: &str = "#1f2937";
pub const LABEL_BACKING: &str = "rgba(255, 255, 255, 0.9)";
pub const LABEL_OUTLINE: &str = "rgba(0, 0, 0, 0.1)";
pub const TRACK: &str = "#e5e7eb";
pub const INTERNET_FILL: &str = "#3b82f6";
pub const ROUTER_FILL: &str = "#8b5cf6";

/// Legend rows shown beside the canvas, in drawing colors.
pub const LEGEND: [(&str, &str); 5] = [
	("Internet Gateway", INTERNET_FILL),
	("Network Router", ROUTER_FILL),
	("Target Device", WARN),
	("Connected Endpoint", OK),
	("Disconnected Endpoint", IDLE),
];

pub fn status_color(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Connected => OK,
		NodeStatus::Disconnected => ALERT,
		NodeStatus::Warning => WARN,
	}
}

pub fn link_width(medium: LinkMedium) -> f64 {
	match medium {
		LinkMedium::Internet => 4.0,
		LinkMedium::Ethernet => 3.0,
		LinkMedium::Lan | LinkMedium::Wifi => 2.0,
	}
}

pub fn node_color(node: &TopologyNode) -> &'static str {
	match node.kind {
		NodeKind::Internet => INTERNET_FILL,
		NodeKind::Router => ROUTER_FILL,
		NodeKind::Target => WARN,
		NodeKind::Endpoint => match node.status {
			NodeStatus::Connected => OK,
			NodeStatus::Warning => WARN,
			NodeStatus::Disconnected => IDLE,
		},
	}
}

pub fn node_glyph(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Internet => "🌐",
		NodeKind::Router => "📡",
		NodeKind::Target => "🎯",
		NodeKind::Endpoint => "💻",
	}
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
	let hex = color.strip_prefix('#')?;
	if hex.len() != 6 {
		return None;
	}
	let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
	Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Mix a `#rrggbb` color 30% toward white. Anything unparsable comes back unchanged.
pub fn lighten(color: &str) -> String {
	let Some((r, g, b)) = parse_hex(color) else {
		return color.to_string();
	};
	let lift = |c: u8| c as u16 + (255 - c as u16) * 3 / 10;
	format!("rgb({}, {}, {})", lift(r), lift(g), lift(b))
}

/// `#rrggbb` with an alpha channel, as `rgba(...)`.
pub fn with_alpha(color: &str, alpha: f64) -> String {
	match parse_hex(color) {
		Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
		None => color.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lighten_moves_toward_white() {
		assert_eq!(lighten("#000000"), "rgb(76, 76, 76)");
		assert_eq!(lighten("#ffffff"), "rgb(255, 255, 255)");
		assert_eq!(lighten("#10b981"), "rgb(87, 206, 166)");
	}

	#[test]
	fn lighten_passes_through_garbage() {
		assert_eq!(lighten("red"), "red");
		assert_eq!(lighten("#12345"), "#12345");
		assert_eq!(lighten("#zzzzzz"), "#zzzzzz");
	}

	#[test]
	fn alpha_variant() {
		assert_eq!(with_alpha("#ef4444", 0.25), "rgba(239, 68, 68, 0.25)");
	}

	#[test]
	fn legend_matches_drawn_colors() {
		use crate::components::topology::model::{Infrastructure, build_topology};
		use crate::components::topology::types::{ConnectionStatus, Endpoint};

		let model = build_topology(
			&Infrastructure::default(),
			&[
				Endpoint::new("up", ConnectionStatus::Connected),
				Endpoint::new("down", ConnectionStatus::Disconnected),
			],
		);
		let drawn: Vec<&str> = model.nodes.iter().map(node_color).collect();
		// internet, router, target, up, down
		let legend: Vec<&str> = LEGEND.iter().map(|(_, color)| *color).collect();
		assert_eq!(drawn, legend);
	}
}
