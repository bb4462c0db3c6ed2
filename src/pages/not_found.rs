use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Page not found"</h1>
			<p>"The requested view does not exist."</p>
			<a href="/">"Back to the network dashboard"</a>
		</div>
	}
}
