//! Endpoint snapshot to topology graph.

use std::collections::HashSet;
use std::f64::consts::PI;

use log::debug;

use super::types::{
	ConnectionMedium, Endpoint, LinkMedium, NodeKind, NodeStatus, TopologyLink, TopologyModel,
	TopologyNode,
};

pub const ROUTER_ID: &str = "router";
pub const INTERNET_ID: &str = "internet";
pub const TARGET_ID: &str = "target";

pub const ROUTER_POS: (f64, f64) = (400.0, 300.0);
pub const INTERNET_POS: (f64, f64) = (400.0, 80.0);
pub const TARGET_POS: (f64, f64) = (620.0, 420.0);

pub const BASE_LAYOUT_RADIUS: f64 = 250.0;
/// Endpoint ring radius as a share of [`BASE_LAYOUT_RADIUS`].
pub const ENDPOINT_RING_FRACTION: f64 = 0.6;

const UNKNOWN_HOST: &str = "unknown host";
const UNKNOWN_ADDRESS: &str = "Unknown IP";

/// Addresses shown on the fixed infrastructure nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Infrastructure {
	pub router: String,
	pub internet: String,
	pub target: String,
}

impl Default for Infrastructure {
	fn default() -> Self {
		Self {
			router: "192.168.8.1".into(),
			internet: "8.8.8.8".into(),
			target: "192.168.8.45".into(),
		}
	}
}

/// Node id for an endpoint hostname.
pub fn endpoint_node_id(hostname: &str) -> String {
	format!("endpoint-{hostname}")
}

pub fn endpoint_ring_radius() -> f64 {
	BASE_LAYOUT_RADIUS * ENDPOINT_RING_FRACTION
}

/// Endpoints keyed by hostname; the first occurrence of a hostname wins.
pub fn unique_endpoints(endpoints: &[Endpoint]) -> Vec<&Endpoint> {
	let mut seen = HashSet::new();
	endpoints
		.iter()
		.filter(|e| {
			let fresh = seen.insert(e.hostname.as_str());
			if !fresh {
				debug!("skipping duplicate endpoint {:?}", e.hostname);
			}
			fresh
		})
		.collect()
}

/// Build the diagram for `endpoints`. Same input, same output.
pub fn build_topology(infra: &Infrastructure, endpoints: &[Endpoint]) -> TopologyModel {
	let unique = unique_endpoints(endpoints);

	let mut nodes = Vec::with_capacity(unique.len() + 3);
	let mut links = Vec::with_capacity(unique.len() + 2);

	nodes.push(fixed_node(INTERNET_ID, NodeKind::Internet, INTERNET_POS, &infra.internet));
	nodes.push(fixed_node(ROUTER_ID, NodeKind::Router, ROUTER_POS, &infra.router));
	nodes.push(fixed_node(TARGET_ID, NodeKind::Target, TARGET_POS, &infra.target));

	links.push(TopologyLink {
		source: ROUTER_ID.into(),
		target: INTERNET_ID.into(),
		status: NodeStatus::Connected,
		medium: LinkMedium::Internet,
	});
	links.push(TopologyLink {
		source: ROUTER_ID.into(),
		target: TARGET_ID.into(),
		status: NodeStatus::Connected,
		medium: LinkMedium::Lan,
	});

	let n = unique.len();
	let radius = endpoint_ring_radius();
	for (i, endpoint) in unique.into_iter().enumerate() {
		// n > 0 inside the loop
		let angle = i as f64 * 2.0 * PI / n as f64;
		let id = endpoint_node_id(&endpoint.hostname);
		let status = NodeStatus::from(endpoint.status);

		nodes.push(TopologyNode {
			id: id.clone(),
			label: endpoint_label(endpoint),
			kind: NodeKind::Endpoint,
			status,
			x: ROUTER_POS.0 + radius * angle.cos(),
			y: ROUTER_POS.1 + radius * angle.sin(),
			address: endpoint.address.clone(),
			hostname: Some(endpoint.hostname.clone()),
			medium: endpoint.medium,
			adapter: endpoint.adapter_name.clone(),
		});
		links.push(TopologyLink {
			source: ROUTER_ID.into(),
			target: id,
			status,
			medium: match endpoint.medium {
				Some(ConnectionMedium::Wifi) => LinkMedium::Wifi,
				_ => LinkMedium::Ethernet,
			},
		});
	}

	TopologyModel { nodes, links }
}

fn fixed_node(id: &str, kind: NodeKind, (x, y): (f64, f64), address: &str) -> TopologyNode {
	TopologyNode {
		id: id.into(),
		label: format!("{}\n{}", kind.title(), non_empty(Some(address), UNKNOWN_ADDRESS)),
		kind,
		status: NodeStatus::Connected,
		x,
		y,
		address: Some(address.to_string()).filter(|a| !a.trim().is_empty()),
		hostname: None,
		medium: None,
		adapter: None,
	}
}

fn endpoint_label(endpoint: &Endpoint) -> String {
	format!(
		"{}\n{}",
		non_empty(Some(&endpoint.hostname), UNKNOWN_HOST),
		non_empty(endpoint.address.as_deref(), UNKNOWN_ADDRESS)
	)
}

fn non_empty<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
	match value.map(str::trim) {
		Some(v) if !v.is_empty() => v,
		_ => fallback,
	}
}
