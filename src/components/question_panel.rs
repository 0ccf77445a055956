use leptos::prelude::*;
use web_sys::MouseEvent;

use super::force_graph::{NodeClick, node_color};
use crate::model::{GraphNode, KnowledgeGraph};

/// The question currently in play with its options as buttons. Picking an
/// option is the same as clicking its node on the graph.
#[component]
pub fn QuestionPanel<F>(
	#[prop(into)] graph: Signal<KnowledgeGraph>,
	#[prop(into)] busy: Signal<bool>,
	on_pick: F,
) -> impl IntoView
where
	F: Fn(NodeClick) + Clone + Send + Sync + 'static,
{
	let current = Memo::new(move |_| {
		graph.with(|g| {
			g.current_question().map(|q| {
				let options: Vec<GraphNode> = g.options_of(&q.id).into_iter().cloned().collect();
				(q.label.clone(), options)
			})
		})
	});

	move || {
		let (question, options) = current.get()?;
		let on_pick = on_pick.clone();
		Some(view! {
			<div class="question-panel">
				<h2 class="question-panel__title">{question}</h2>
				<div class="question-panel__options">
					{options
						.into_iter()
						.map(|option| {
							let on_pick = on_pick.clone();
							let style = if option.selected {
								format!("border-color: {};", node_color(&option))
							} else {
								String::new()
							};
							let label = option.label.clone();
							let answered = option.selected;
							view! {
								<button
									class="question-panel__option"
									class:selected=answered
									style=style
									disabled=move || busy.get() || answered
									on:click=move |ev: MouseEvent| {
										on_pick(NodeClick {
											node: option.clone(),
											x: ev.client_x() as f64,
											y: ev.client_y() as f64,
										})
									}
								>
									{label}
								</button>
							}
						})
						.collect_view()}
				</div>
			</div>
		})
	}
}
