use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, NodeClick};
use crate::components::question_panel::QuestionPanel;
use crate::components::score_hud::{FloatingScoreLayer, ScoreHud};
use crate::components::star_field::StarField;
use crate::config::AppConfig;
use crate::session::QuizSession;

/// The game itself: star backdrop, the session's knowledge graph and the HUD.
#[component]
pub fn GraphPage() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let quiz = expect_context::<QuizSession>();

	let on_node_click = move |click: NodeClick| quiz.handle_click(click);
	let graph = Signal::derive(move || quiz.graph.get().unwrap_or_default());
	let (fly_duration, fly_zoom) = (config.fly_duration, config.fly_zoom);

	view! {
		<div class="graph-page">
			<StarField />
			<Show
				when=move || quiz.graph.with(Option::is_some)
				fallback=|| view! { <p class="graph-loading">"Loading your knowledge graph…"</p> }
			>
				<div class="graph-layer">
					<ForceGraphCanvas
						data=graph
						on_node_click=on_node_click
						fly_to=quiz.fly_target
						fly_duration=fly_duration
						fly_zoom=fly_zoom
						fullscreen=true
					/>
				</div>
				<QuestionPanel graph=graph busy=quiz.flying on_pick=on_node_click />
			</Show>
			<ScoreHud ship=quiz.ship />
			<FloatingScoreLayer scores=quiz.popups />
		</div>
	}
}
