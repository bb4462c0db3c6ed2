use leptos::prelude::*;

use crate::components::topology::{NodeKind, NodeStatus, TopologyNode, node_glyph};

const QUALITY_BARS: [u32; 4] = [1, 2, 3, 4];

/// Label shown next to the connection quality bars of an endpoint.
fn connection_quality(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Connected => "Excellent",
		NodeStatus::Warning => "Weak",
		NodeStatus::Disconnected => "No Signal",
	}
}

/// Floating panel describing the selected node. Renders nothing while
/// `selected` is empty; the close button clears it.
#[component]
pub fn NodeDetails(selected: RwSignal<Option<TopologyNode>>) -> impl IntoView {
	move || {
		selected.get().map(|node| {
			let connected = node.status == NodeStatus::Connected;
			let status = node.status.as_str();
			let quality = (node.kind == NodeKind::Endpoint).then(|| {
				let bars = QUALITY_BARS
					.iter()
					.map(|bar| {
						view! {
							<div
								class=if connected { "bar lit" } else { "bar" }
								style=format!("height: {}px;", bar * 3 + 6)
							/>
						}
					})
					.collect_view();
				view! {
					<div class="quality">
						<div class="quality-label">"Connection Quality"</div>
						<div class="quality-bars">
							{bars}
							<span class="quality-text">{connection_quality(node.status)}</span>
						</div>
					</div>
				}
			});

			view! {
				<div class="node-details">
					<div class="node-details-header">
						<h4>{node_glyph(node.kind)} " Node Details"</h4>
						<button class="close" title="Close" on:click=move |_| selected.set(None)>
							"✕"
						</button>
					</div>
					<dl>
						<dt>"Type:"</dt>
						<dd class="badge">{node.kind.title()}</dd>
						{node.address.map(|ip| view! {
							<dt>"IP Address:"</dt>
							<dd><code>{ip}</code></dd>
						})}
						{node.hostname.map(|host| view! {
							<dt>"Hostname:"</dt>
							<dd class="mono">{host}</dd>
						})}
						{node.medium.map(|medium| view! {
							<dt>"Connection:"</dt>
							<dd class="badge upper">{medium.as_str()}</dd>
						})}
						{node.adapter.map(|adapter| view! {
							<dt>"Network Adapter:"</dt>
							<dd>{adapter}</dd>
						})}
						<dt>"Status:"</dt>
						<dd class=format!("badge status-{status}")>{status}</dd>
					</dl>
					{quality}
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quality_follows_status() {
		assert_eq!(connection_quality(NodeStatus::Connected), "Excellent");
		assert_eq!(connection_quality(NodeStatus::Disconnected), "No Signal");
	}
}
