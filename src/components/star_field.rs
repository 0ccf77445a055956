use leptos::prelude::*;

use crate::game::Star;

/// Twinkling backdrop behind the graph; scattered once per mount.
#[component]
pub fn StarField() -> impl IntoView {
	let stars = Star::scatter(js_sys::Math::random);

	view! {
		<div class="star-field" aria-hidden="true">
			{stars
				.into_iter()
				.map(|star| view! { <div class="star" style=star.style()></div> })
				.collect_view()}
		</div>
	}
}
