use gloo_net::http::Request;
use thiserror::Error;

use crate::components::topology::Endpoint;

#[derive(Debug, Error)]
pub enum FetchError {
	#[error("request to {url} failed: {source}")]
	Request {
		url: String,
		#[source]
		source: gloo_net::Error,
	},
	#[error("{url} answered HTTP {status}")]
	Status { url: String, status: u16 },
	#[error("could not decode agents from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Client for the monitoring backend's agents API.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	pub fn endpoints_url(&self) -> String {
		format!("{}/api/agents", self.base_url)
	}

	pub async fn fetch_endpoints(&self) -> Result<Vec<Endpoint>, FetchError> {
		let url = self.endpoints_url();
		let response = Request::get(&url)
			.send()
			.await
			.map_err(|source| FetchError::Request {
				url: url.clone(),
				source,
			})?;
		if !response.ok() {
			return Err(FetchError::Status {
				url,
				status: response.status(),
			});
		}
		let body = response.text().await.map_err(|source| FetchError::Request {
			url: url.clone(),
			source,
		})?;
		decode_endpoints(&body).map_err(|source| FetchError::Decode { url, source })
	}
}

/// Parse an agents payload. Unknown fields are ignored.
pub fn decode_endpoints(body: &str) -> Result<Vec<Endpoint>, serde_json::Error> {
	serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::{ConnectionMedium, ConnectionStatus};

	#[test]
	fn builds_agents_url() {
		assert_eq!(
			ApiClient::new("http://monitor.local:5000/").endpoints_url(),
			"http://monitor.local:5000/api/agents"
		);
	}

	#[test]
	fn decodes_backend_payload() {
		let body = r#"[
			{
				"id": 1,
				"hostname": "OFFICE-PC-001",
				"status": "connected",
				"platform": "Windows_NT 10.0.19045",
				"lastSeen": "2024-05-01T09:00:00Z",
				"ip": "192.168.1.101",
				"connectionType": "lan",
				"adapterName": "Realtek PCIe GbE Family Controller",
				"healthScore": 97
			},
			{
				"id": 2,
				"hostname": "OFFICE-PC-002",
				"status": "disconnected",
				"ip": null,
				"connectionType": null
			}
		]"#;
		let endpoints = decode_endpoints(body).unwrap();
		assert_eq!(endpoints.len(), 2);
		assert_eq!(endpoints[0].status, ConnectionStatus::Connected);
		assert_eq!(endpoints[0].address.as_deref(), Some("192.168.1.101"));
		assert_eq!(endpoints[0].medium, Some(ConnectionMedium::Lan));
		assert_eq!(
			endpoints[0].adapter_name.as_deref(),
			Some("Realtek PCIe GbE Family Controller")
		);
		assert_eq!(endpoints[1].status, ConnectionStatus::Disconnected);
		assert_eq!(endpoints[1].address, None);
		assert_eq!(endpoints[1].medium, None);
	}

	#[test]
	fn unknown_values_degrade() {
		let body = r#"[
			{"hostname": "a", "status": "rebooting", "connectionType": "fiber"},
			{"hostname": "b"}
		]"#;
		let endpoints = decode_endpoints(body).unwrap();
		assert_eq!(endpoints[0].status, ConnectionStatus::Disconnected);
		assert_eq!(endpoints[0].medium, Some(ConnectionMedium::Unknown));
		assert_eq!(endpoints[1].status, ConnectionStatus::Disconnected);
	}

	#[test]
	fn rejects_non_list() {
		assert!(decode_endpoints(r#"{"hostname": "a"}"#).is_err());
	}
}
