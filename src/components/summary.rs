use leptos::prelude::*;

use crate::components::topology::{ConnectionMedium, HealthSummary, HealthThresholds};

/// Per-medium counts worth a card; media nobody uses are left out.
fn medium_breakdown(summary: &HealthSummary) -> Vec<(ConnectionMedium, usize)> {
	ConnectionMedium::ALL
		.iter()
		.map(|m| (*m, summary.medium_count(*m)))
		.filter(|(_, count)| *count > 0)
		.collect()
}

#[component]
pub fn SummaryCards(
	#[prop(into)] summary: Signal<HealthSummary>,
	#[prop(optional)] thresholds: HealthThresholds,
) -> impl IntoView {
	let level = move || thresholds.level(summary.get().health_percentage);

	view! {
		<div class="summary-cards">
			<div class="card">
				<span class="card-label">"Total Endpoints"</span>
				<span class="card-value">{move || summary.get().total_count}</span>
			</div>
			<div class="card connected">
				<span class="card-label">"Connected"</span>
				<span class="card-value">{move || summary.get().connected_count}</span>
			</div>
			<div class="card disconnected">
				<span class="card-label">"Disconnected"</span>
				<span class="card-value">{move || summary.get().disconnected_count}</span>
			</div>
			<div class="card health">
				<span class="card-label">"Network Health"</span>
				<span class="card-value" style=move || format!("color: {};", level().color())>
					{move || format!("{}%", summary.get().health_percentage)}
				</span>
				<span class="card-note">{move || level().as_str()}</span>
			</div>
			<div class="card media">
				<span class="card-label">"Connection Types"</span>
				<ul>
					{move || {
						medium_breakdown(&summary.get())
							.into_iter()
							.map(|(medium, count)| {
								view! {
									<li>
										<span class="medium">{medium.as_str()}</span>
										<span class="count">{count}</span>
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
			</div>
		</div>
	}
}
