use leptos::prelude::*;

use crate::components::details::NodeDetails;
use crate::components::summary::SummaryCards;
use crate::components::topology::{TopologyCanvas, TopologyNode, summarize};
use crate::config::DashboardConfig;
use crate::feed::use_endpoint_feed;

/// Network dashboard: summary cards above the live topology.
#[component]
pub fn Home() -> impl IntoView {
	let config = DashboardConfig::from_document();
	let endpoints = use_endpoint_feed(&config);
	let summary = Memo::new(move |_| summarize(&endpoints.get()));
	let selected = RwSignal::new(None::<TopologyNode>);
	let zoom = RwSignal::new(1.0);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="dashboard">
				<header class="dashboard-header">
					<h1>"Network Topology"</h1>
					<p class="subtitle">
						"Click a node for details. Scroll to zoom. Drag the background to pan."
					</p>
				</header>
				<SummaryCards summary=summary thresholds=config.thresholds />
				<div class="topology-panel">
					<TopologyCanvas
						endpoints=endpoints
						selected=selected
						zoom=zoom
						infrastructure=config.infrastructure.clone()
						thresholds=config.thresholds
					/>
					<NodeDetails selected=selected />
					<div class="zoom-readout">
						{move || format!("Scale: {:.0}%", zoom.get() * 100.0)}
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}
