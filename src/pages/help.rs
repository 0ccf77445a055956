use leptos::prelude::*;

const LEGEND: &[(&str, &str)] = &[
	("#FFA500", "Question"),
	("#CBD5E0", "Answer you can pick"),
	("#48BB78", "Picked, correct"),
	("#F56565", "Picked, wrong"),
	("#999", "Home, topics and sessions"),
];

#[component]
pub fn HelpPage() -> impl IntoView {
	view! {
		<div class="help-page">
			<h1>"How to play"</h1>
			<ul class="help-page__controls">
				<li>"Click a topic to get its first question."</li>
				<li>"Click an answer node, or an option in the question panel, to answer."</li>
				<li>"A right answer earns 100 points. A wrong one earns 10 and burns 10% fuel."</li>
				<li>"Drag nodes to pin them. Drag the background to pan. Scroll to zoom."</li>
			</ul>
			<h2>"Legend"</h2>
			<ul class="help-page__legend">
				{LEGEND
					.iter()
					.map(|(color, text)| {
						view! {
							<li>
								<span class="swatch" style=format!("background: {color};")></span>
								{*text}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</div>
	}
}
