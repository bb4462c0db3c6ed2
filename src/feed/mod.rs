//! Endpoint snapshots for the dashboard, from the agents API or fixtures.

mod client;
mod generation;
pub mod mock;

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

pub use client::{ApiClient, FetchError};
pub use generation::FetchGeneration;

use crate::components::topology::Endpoint;
use crate::config::{DashboardConfig, DataSource};

/// Decide what a finished fetch publishes. `None` keeps the current snapshot.
pub fn settle(
	outcome: Result<Vec<Endpoint>, FetchError>,
	have_snapshot: bool,
) -> Option<Vec<Endpoint>> {
	match outcome {
		Ok(endpoints) => Some(endpoints),
		Err(err) if have_snapshot => {
			warn!("{err}; keeping last snapshot");
			None
		}
		Err(err) => {
			warn!("{err}; falling back to mock endpoints");
			Some(mock::endpoints())
		}
	}
}

/// Reactive endpoint list that follows `config.source`.
///
/// In API mode the list is fetched immediately and then every
/// `config.poll_interval`. A response is applied only if no newer fetch was
/// started since, and never after the owning component is cleaned up.
pub fn use_endpoint_feed(config: &DashboardConfig) -> ReadSignal<Vec<Endpoint>> {
	let (endpoints, set_endpoints) = signal(Vec::<Endpoint>::new());

	if config.source == DataSource::Mock {
		info!("serving mock endpoints");
		set_endpoints.set(mock::endpoints());
		return endpoints;
	}

	let client = ApiClient::new(&config.api_url);
	info!("polling {} every {:?}", client.endpoints_url(), config.poll_interval);

	let generation = FetchGeneration::default();
	let loaded = Rc::new(Cell::new(false));
	let poll = {
		let generation = generation.clone();
		move || {
			let ticket = generation.begin();
			let (client, generation, loaded) = (client.clone(), generation.clone(), loaded.clone());
			spawn_local(async move {
				let outcome = client.fetch_endpoints().await;
				if !generation.is_current(ticket) {
					debug!("dropping superseded fetch {ticket:?}");
					return;
				}
				if let Some(list) = settle(outcome, loaded.get()) {
					loaded.set(true);
					set_endpoints.set(list);
				}
			});
		}
	};

	poll();
	let interval = match set_interval_with_handle(poll, config.poll_interval) {
		Ok(handle) => Some(handle),
		Err(err) => {
			warn!("could not schedule endpoint polling: {err:?}");
			None
		}
	};
	on_cleanup(move || {
		if let Some(handle) = interval {
			handle.clear();
		}
		generation.invalidate();
	});

	endpoints
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::ConnectionStatus;

	fn failure() -> FetchError {
		FetchError::Status {
			url: "http://localhost:5000/api/agents".into(),
			status: 503,
		}
	}

	#[test]
	fn success_always_publishes() {
		let fresh = vec![Endpoint::new("a", ConnectionStatus::Connected)];
		assert_eq!(settle(Ok(fresh.clone()), true), Some(fresh.clone()));
		assert_eq!(settle(Ok(fresh.clone()), false), Some(fresh));
	}

	#[test]
	fn failure_keeps_last_snapshot() {
		assert_eq!(settle(Err(failure()), true), None);
	}

	#[test]
	fn first_failure_falls_back_to_mock() {
		assert_eq!(settle(Err(failure()), false), Some(mock::endpoints()));
	}

	#[test]
	fn empty_success_is_a_snapshot() {
		assert_eq!(settle(Ok(Vec::new()), false), Some(Vec::new()));
	}

	#[test]
	fn mock_hosts_are_unique() {
		let list = mock::endpoints();
		let mut hosts: Vec<&str> = list.iter().map(|e| e.hostname.as_str()).collect();
		hosts.sort_unstable();
		hosts.dedup();
		assert_eq!(hosts.len(), list.len());
	}
}
