//! Fixtures served when no backend is configured or reachable.

use crate::components::topology::{ConnectionMedium, ConnectionStatus, Endpoint};

fn fixture(
	hostname: &str,
	status: ConnectionStatus,
	address: &str,
	medium: ConnectionMedium,
	adapter: &str,
) -> Endpoint {
	Endpoint {
		address: Some(address.into()),
		medium: Some(medium),
		adapter_name: Some(adapter.into()),
		..Endpoint::new(hostname, status)
	}
}

pub fn endpoints() -> Vec<Endpoint> {
	vec![
		fixture(
			"OFFICE-PC-001",
			ConnectionStatus::Connected,
			"192.168.1.101",
			ConnectionMedium::Lan,
			"Realtek PCIe GbE Family Controller",
		),
		fixture(
			"OFFICE-PC-002",
			ConnectionStatus::Disconnected,
			"192.168.1.102",
			ConnectionMedium::Unknown,
			"No LAN Adapter",
		),
		fixture(
			"OFFICE-PC-003",
			ConnectionStatus::Connected,
			"192.168.1.103",
			ConnectionMedium::Lan,
			"Intel Ethernet Connection",
		),
	]
}
