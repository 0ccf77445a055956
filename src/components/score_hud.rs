use leptos::prelude::*;

use crate::game::{FloatingScores, ShipState};

#[component]
pub fn ScoreHud(#[prop(into)] ship: Signal<ShipState>) -> impl IntoView {
	view! {
		<div class="score-hud">
			<div class="score-hud__score">"Score: " {move || ship.get().score}</div>
			<div class="score-hud__fuel" class:empty=move || ship.get().out_of_fuel()>
				"Fuel: " {move || ship.get().fuel} "%"
			</div>
			<div class="score-hud__answers">
				{move || {
					let s = ship.get();
					format!("{} / {} correct", s.correct, s.answered)
				}}
			</div>
		</div>
	}
}

/// "+N" labels that drift up from where an answer was clicked.
#[component]
pub fn FloatingScoreLayer(#[prop(into)] scores: Signal<FloatingScores>) -> impl IntoView {
	view! {
		<div class="floating-scores">
			<For
				each=move || scores.get().items().to_vec()
				key=|score| score.id
				children=|score| {
					view! {
						<div
							class="floating-score"
							class:miss=!score.correct
							style=format!("left: {:.0}px; top: {:.0}px;", score.x, score.y)
						>
							{format!("+{}", score.value)}
						</div>
					}
				}
			/>
		</div>
	}
}
