//! Dashboard settings.
//!
//! The page that serves the WASM bundle can inject settings through meta tags:
//!
//! ```html
//! <meta name="netwatch:data-source" content="api">
//! <meta name="netwatch:api-url" content="http://monitor.local:5000">
//! <meta name="netwatch:poll-interval-ms" content="2000">
//! ```
//!
//! Missing tags keep their defaults; malformed ones are logged and ignored.

use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::components::topology::{HealthThresholds, Infrastructure};

pub const META_PREFIX: &str = "netwatch:";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Where endpoint snapshots come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
	/// Built-in fixtures, no network access.
	#[default]
	Mock,
	/// Poll the agents API.
	Api,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("{key}: expected `api` or `mock`, got {value:?}")]
	UnknownSource { key: &'static str, value: String },
	#[error("{key}: {value:?} is not a whole number")]
	NotANumber { key: &'static str, value: String },
	#[error("{key}: {value} is out of range ({reason})")]
	OutOfRange {
		key: &'static str,
		value: u64,
		reason: &'static str,
	},
	#[error("{key}: value is empty")]
	Empty { key: &'static str },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
	pub source: DataSource,
	pub api_url: String,
	pub poll_interval: Duration,
	pub thresholds: HealthThresholds,
	pub infrastructure: Infrastructure,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			source: DataSource::default(),
			api_url: DEFAULT_API_URL.into(),
			poll_interval: DEFAULT_POLL_INTERVAL,
			thresholds: HealthThresholds::default(),
			infrastructure: Infrastructure::default(),
		}
	}
}

impl DashboardConfig {
	/// Read `netwatch:*` meta tags from the current document.
	pub fn from_document() -> Self {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			warn!("no document; using default dashboard config");
			return Self::default();
		};
		Self::from_lookup(|key| {
			let selector = format!("meta[name=\"{META_PREFIX}{key}\"]");
			document
				.query_selector(&selector)
				.ok()
				.flatten()
				.and_then(|meta| meta.get_attribute("content"))
		})
	}

	/// Build from a key lookup (keys without the `netwatch:` prefix).
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::default();

		apply(&lookup, "data-source", parse_source, |v| config.source = v);
		apply(&lookup, "api-url", parse_url, |v| config.api_url = v);
		apply(&lookup, "poll-interval-ms", parse_interval, |v| config.poll_interval = v);

		let mut thresholds = config.thresholds;
		apply(&lookup, "health-healthy", parse_percent, |v| thresholds.healthy = v);
		apply(&lookup, "health-degraded", parse_percent, |v| thresholds.degraded = v);
		if thresholds.degraded > thresholds.healthy {
			warn!(
				"ignoring health thresholds: degraded ({}) above healthy ({})",
				thresholds.degraded, thresholds.healthy
			);
		} else {
			config.thresholds = thresholds;
		}

		let infra = &mut config.infrastructure;
		apply(&lookup, "router-ip", parse_text, |v| infra.router = v);
		apply(&lookup, "internet-ip", parse_text, |v| infra.internet = v);
		apply(&lookup, "target-ip", parse_text, |v| infra.target = v);

		config
	}
}

fn apply<T>(
	lookup: &impl Fn(&str) -> Option<String>,
	key: &'static str,
	parse: impl Fn(&'static str, &str) -> Result<T, ConfigError>,
	set: impl FnOnce(T),
) {
	let Some(raw) = lookup(key) else {
		return;
	};
	match parse(key, raw.trim()) {
		Ok(value) => set(value),
		Err(err) => warn!("config {META_PREFIX}{err}; keeping default"),
	}
}

fn parse_source(key: &'static str, value: &str) -> Result<DataSource, ConfigError> {
	match value.to_ascii_lowercase().as_str() {
		"api" => Ok(DataSource::Api),
		"mock" => Ok(DataSource::Mock),
		_ => Err(ConfigError::UnknownSource {
			key,
			value: value.into(),
		}),
	}
}

fn parse_text(key: &'static str, value: &str) -> Result<String, ConfigError> {
	if value.is_empty() {
		Err(ConfigError::Empty { key })
	} else {
		Ok(value.into())
	}
}

fn parse_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
	parse_text(key, value.trim_end_matches('/'))
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
	value.parse().map_err(|_| ConfigError::NotANumber {
		key,
		value: value.into(),
	})
}

fn parse_interval(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
	let ms = parse_number(key, value)?;
	let interval = Duration::from_millis(ms);
	if interval < MIN_POLL_INTERVAL {
		return Err(ConfigError::OutOfRange {
			key,
			value: ms,
			reason: "minimum is 500 ms",
		});
	}
	Ok(interval)
}

fn parse_percent(key: &'static str, value: &str) -> Result<u8, ConfigError> {
	let pct = parse_number(key, value)?;
	u8::try_from(pct)
		.ok()
		.filter(|p| *p <= 100)
		.ok_or(ConfigError::OutOfRange {
			key,
			value: pct,
			reason: "expected 0..=100",
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config(pairs: &[(&str, &str)]) -> DashboardConfig {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		DashboardConfig::from_lookup(|key| map.get(key).cloned())
	}

	#[test]
	fn defaults_without_tags() {
		let c = config(&[]);
		assert_eq!(c, DashboardConfig::default());
		assert_eq!(c.source, DataSource::Mock);
		assert_eq!(c.poll_interval, Duration::from_millis(2000));
		assert_eq!(c.infrastructure.internet, "8.8.8.8");
	}

	#[test]
	fn reads_every_key() {
		let c = config(&[
			("data-source", "API"),
			("api-url", "http://monitor.local:5000/"),
			("poll-interval-ms", "5000"),
			("health-healthy", "90"),
			("health-degraded", "60"),
			("router-ip", "10.0.0.1"),
			("internet-ip", "1.1.1.1"),
			("target-ip", "10.0.0.45"),
		]);
		assert_eq!(c.source, DataSource::Api);
		assert_eq!(c.api_url, "http://monitor.local:5000");
		assert_eq!(c.poll_interval, Duration::from_secs(5));
		assert_eq!(
			c.thresholds,
			HealthThresholds {
				healthy: 90,
				degraded: 60
			}
		);
		assert_eq!(c.infrastructure.router, "10.0.0.1");
		assert_eq!(c.infrastructure.internet, "1.1.1.1");
		assert_eq!(c.infrastructure.target, "10.0.0.45");
	}

	#[test]
	fn bad_values_keep_defaults() {
		let c = config(&[
			("data-source", "carrier-pigeon"),
			("poll-interval-ms", "fast"),
			("health-healthy", "180"),
			("api-url", "  "),
			("router-ip", ""),
		]);
		assert_eq!(c, DashboardConfig::default());
	}

	#[test]
	fn interval_has_a_floor() {
		assert_eq!(config(&[("poll-interval-ms", "100")]).poll_interval, DEFAULT_POLL_INTERVAL);
		assert_eq!(
			parse_interval("poll-interval-ms", "100"),
			Err(ConfigError::OutOfRange {
				key: "poll-interval-ms",
				value: 100,
				reason: "minimum is 500 ms"
			})
		);
	}

	#[test]
	fn inverted_thresholds_rejected() {
		let c = config(&[("health-healthy", "40"), ("health-degraded", "70")]);
		assert_eq!(c.thresholds, HealthThresholds::default());
	}
}
