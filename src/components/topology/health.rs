//! Connectivity summary shared by the canvas overlay and the summary cards.

use super::model::unique_endpoints;
use super::types::{ConnectionMedium, Endpoint};

/// Aggregate connectivity for one endpoint snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HealthSummary {
	pub connected_count: usize,
	pub disconnected_count: usize,
	pub total_count: usize,
	/// 0..=100, rounded half up. An empty snapshot counts as fully healthy.
	pub health_percentage: u8,
	pub lan: usize,
	pub ethernet: usize,
	pub wifi: usize,
	pub unknown_medium: usize,
}

impl HealthSummary {
	/// Endpoints reporting `medium`; endpoints with no medium count as unknown.
	pub fn medium_count(&self, medium: ConnectionMedium) -> usize {
		match medium {
			ConnectionMedium::Lan => self.lan,
			ConnectionMedium::Ethernet => self.ethernet,
			ConnectionMedium::Wifi => self.wifi,
			ConnectionMedium::Unknown => self.unknown_medium,
		}
	}
}

/// Summarize a snapshot. Duplicate hostnames count once, matching the diagram.
pub fn summarize(endpoints: &[Endpoint]) -> HealthSummary {
	let unique = unique_endpoints(endpoints);
	let mut summary = HealthSummary {
		total_count: unique.len(),
		..HealthSummary::default()
	};
	for endpoint in unique {
		if endpoint.is_connected() {
			summary.connected_count += 1;
		}
		match endpoint.medium.unwrap_or_default() {
			ConnectionMedium::Lan => summary.lan += 1,
			ConnectionMedium::Ethernet => summary.ethernet += 1,
			ConnectionMedium::Wifi => summary.wifi += 1,
			ConnectionMedium::Unknown => summary.unknown_medium += 1,
		}
	}
	summary.disconnected_count = summary.total_count - summary.connected_count;
	summary.health_percentage = percentage(summary.connected_count, summary.total_count);
	summary
}

fn percentage(part: usize, total: usize) -> u8 {
	if total == 0 {
		return 100;
	}
	// integer round-half-up of 100 * part / total
	((100 * part + total / 2) / total) as u8
}

/// Bucket a health percentage falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthLevel {
	Healthy,
	Degraded,
	Critical,
}

impl HealthLevel {
	/// Overlay and card color.
	pub fn color(self) -> &'static str {
		match self {
			HealthLevel::Healthy => "#10b981",
			HealthLevel::Degraded => "#f59e0b",
			HealthLevel::Critical => "#ef4444",
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			HealthLevel::Healthy => "healthy",
			HealthLevel::Degraded => "degraded",
			HealthLevel::Critical => "critical",
		}
	}
}

/// Strict lower bounds for [`HealthLevel::Healthy`] and [`HealthLevel::Degraded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthThresholds {
	pub healthy: u8,
	pub degraded: u8,
}

impl Default for HealthThresholds {
	fn default() -> Self {
		Self {
			healthy: 80,
			degraded: 50,
		}
	}
}

impl HealthThresholds {
	pub fn level(&self, percentage: u8) -> HealthLevel {
		if percentage > self.healthy {
			HealthLevel::Healthy
		} else if percentage > self.degraded {
			HealthLevel::Degraded
		} else {
			HealthLevel::Critical
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::ConnectionStatus::{self, Connected, Disconnected};

	fn snapshot(statuses: &[ConnectionStatus]) -> Vec<Endpoint> {
		statuses
			.iter()
			.enumerate()
			.map(|(i, s)| Endpoint::new(format!("PC-{i:02}"), *s))
			.collect()
	}

	#[test]
	fn empty_is_fully_healthy() {
		let s = summarize(&[]);
		assert_eq!(
			(s.connected_count, s.total_count, s.health_percentage),
			(0, 0, 100)
		);
	}

	#[test]
	fn two_of_three_rounds_up_to_67() {
		let s = summarize(&snapshot(&[Connected, Disconnected, Connected]));
		assert_eq!(s.connected_count, 2);
		assert_eq!(s.disconnected_count, 1);
		assert_eq!(s.total_count, 3);
		assert_eq!(s.health_percentage, 67);
	}

	#[test]
	fn exact_halves_round_up() {
		// 1/8 = 12.5%
		let mut statuses = vec![Connected];
		statuses.extend([Disconnected; 7]);
		assert_eq!(summarize(&snapshot(&statuses)).health_percentage, 13);
		// 1/3 = 33.33%
		let list = snapshot(&[Connected, Disconnected, Disconnected]);
		assert_eq!(summarize(&list).health_percentage, 33);
	}

	#[test]
	fn counts_media() {
		let mut list = snapshot(&[Connected, Connected, Disconnected]);
		list[0].medium = Some(ConnectionMedium::Lan);
		list[1].medium = Some(ConnectionMedium::Wifi);
		let s = summarize(&list);
		assert_eq!(s.medium_count(ConnectionMedium::Lan), 1);
		assert_eq!(s.medium_count(ConnectionMedium::Wifi), 1);
		assert_eq!(s.medium_count(ConnectionMedium::Ethernet), 0);
		assert_eq!(s.medium_count(ConnectionMedium::Unknown), 1);
	}

	#[test]
	fn duplicate_hostname_counts_once() {
		let list = [
			Endpoint::new("dup", Connected),
			Endpoint::new("dup", Disconnected),
		];
		let s = summarize(&list);
		assert_eq!(s.total_count, 1);
		assert_eq!(s.connected_count, 1);
		assert_eq!(s.disconnected_count, 0);
		assert_eq!(s.health_percentage, 100);
	}

	#[test]
	fn thresholds_are_strict() {
		let t = HealthThresholds::default();
		assert_eq!(t.level(100), HealthLevel::Healthy);
		assert_eq!(t.level(81), HealthLevel::Healthy);
		assert_eq!(t.level(80), HealthLevel::Degraded);
		assert_eq!(t.level(51), HealthLevel::Degraded);
		assert_eq!(t.level(50), HealthLevel::Critical);
		assert_eq!(t.level(0), HealthLevel::Critical);
	}
}
