use serde::Deserialize;

/// Connectivity reported by a monitored endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
	/// The endpoint reached its checks.
	Connected,
	/// Anything else, including status strings we do not recognise.
	#[default]
	#[serde(other)]
	Disconnected,
}

/// Physical medium an endpoint reports for its active adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMedium {
	/// Wired LAN.
	Lan,
	/// Ethernet adapter.
	Ethernet,
	/// Wireless adapter.
	Wifi,
	/// Not reported or not recognised.
	#[default]
	#[serde(other)]
	Unknown,
}

impl ConnectionMedium {
	/// Every medium, in display order.
	pub const ALL: [ConnectionMedium; 4] = [
		ConnectionMedium::Lan,
		ConnectionMedium::Ethernet,
		ConnectionMedium::Wifi,
		ConnectionMedium::Unknown,
	];

	/// Lowercase tag as it appears on the wire.
	pub fn as_str(self) -> &'static str {
		match self {
			ConnectionMedium::Lan => "lan",
			ConnectionMedium::Ethernet => "ethernet",
			ConnectionMedium::Wifi => "wifi",
			ConnectionMedium::Unknown => "unknown",
		}
	}
}

/// A monitored machine as reported by the agents API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
	/// Unique key.
	pub hostname: String,
	/// Current connectivity.
	#[serde(default)]
	pub status: ConnectionStatus,
	/// Network address.
	#[serde(default, rename = "ip")]
	pub address: Option<String>,
	/// Medium of the active adapter.
	#[serde(default, rename = "connectionType")]
	pub medium: Option<ConnectionMedium>,
	/// Name of the active adapter.
	#[serde(default)]
	pub adapter_name: Option<String>,
}

impl Endpoint {
	/// Endpoint with only the required fields set.
	pub fn new(hostname: impl Into<String>, status: ConnectionStatus) -> Self {
		Self {
			hostname: hostname.into(),
			status,
			address: None,
			medium: None,
			adapter_name: None,
		}
	}

	/// Whether the endpoint currently reports as connected.
	pub fn is_connected(&self) -> bool {
		self.status == ConnectionStatus::Connected
	}
}

/// Role a node plays in the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Router,
	Internet,
	Target,
	Endpoint,
}

impl NodeKind {
	/// Human readable name used in the details panel.
	pub fn title(self) -> &'static str {
		match self {
			NodeKind::Router => "Router",
			NodeKind::Internet => "Internet",
			NodeKind::Target => "Target",
			NodeKind::Endpoint => "Endpoint",
		}
	}
}

/// Status drawn for a node or link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStatus {
	Connected,
	Disconnected,
	Warning,
}

impl From<ConnectionStatus> for NodeStatus {
	fn from(status: ConnectionStatus) -> Self {
		match status {
			ConnectionStatus::Connected => NodeStatus::Connected,
			ConnectionStatus::Disconnected => NodeStatus::Disconnected,
		}
	}
}

impl NodeStatus {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeStatus::Connected => "connected",
			NodeStatus::Disconnected => "disconnected",
			NodeStatus::Warning => "warning",
		}
	}
}

/// Medium category of a link; drives stroke width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkMedium {
	Internet,
	Lan,
	Ethernet,
	Wifi,
}

/// A drawable vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub status: NodeStatus,
	pub x: f64,
	pub y: f64,
	pub address: Option<String>,
	pub hostname: Option<String>,
	pub medium: Option<ConnectionMedium>,
	pub adapter: Option<String>,
}

/// A drawable edge between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyLink {
	pub source: String,
	pub target: String,
	pub status: NodeStatus,
	pub medium: LinkMedium,
}

impl TopologyLink {
	/// Stable identity used to seed decorative jitter.
	pub fn id(&self) -> String {
		format!("{}->{}", self.source, self.target)
	}
}

/// Nodes and links for one endpoint snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyModel {
	pub nodes: Vec<TopologyNode>,
	pub links: Vec<TopologyLink>,
}

impl TopologyModel {
	/// Look a node up by id.
	pub fn node(&self, id: &str) -> Option<&TopologyNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}
}
