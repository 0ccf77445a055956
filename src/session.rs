//! Session lifecycle of the graph view: start, fetch, answer, re-fetch.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::components::force_graph::NodeClick;
use crate::config::AppConfig;
use crate::game::{FloatingScores, ShipState};
use crate::model::{GraphNode, KnowledgeGraph, NodeKind, SessionId};

/// What a click on a node asks the backend for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
	StartTopic(String),
	Answer,
	AlreadyAnswered,
	Ignore,
}

impl ClickAction {
	pub fn for_node(node: &GraphNode) -> Self {
		if node.is_topic_choice() {
			Self::StartTopic(node.label.clone())
		} else if node.kind != NodeKind::Answer {
			Self::Ignore
		} else if node.selected {
			Self::AlreadyAnswered
		} else {
			Self::Answer
		}
	}
}

/// Holds the `flying` flag for one answer flight and lowers it when dropped,
/// whichever way the flight ends.
struct FlightGuard(RwSignal<bool>);

impl FlightGuard {
	fn engage(flag: RwSignal<bool>) -> Option<Self> {
		if flag.try_get_untracked().unwrap_or(true) {
			return None;
		}
		let _ = flag.try_set(true);
		Some(Self(flag))
	}
}

impl Drop for FlightGuard {
	fn drop(&mut self) {
		let _ = self.0.try_set(false);
	}
}

/// Reactive handles for one visit. `Copy`, so it can be moved into every
/// event handler and async task without cloning state. Owned by the app
/// root so it survives route changes.
#[derive(Clone, Copy)]
pub struct QuizSession {
	client: StoredValue<ApiClient, LocalStorage>,
	pub session: RwSignal<Option<SessionId>>,
	pub graph: RwSignal<Option<KnowledgeGraph>>,
	pub ship: RwSignal<ShipState>,
	pub popups: RwSignal<FloatingScores>,
	/// Node the camera is heading to; the canvas animates every new value.
	pub fly_target: RwSignal<Option<String>>,
	/// Set while an answer flight and its requests are running.
	pub flying: RwSignal<bool>,
	fly_duration: Duration,
	popup_duration: Duration,
}

impl QuizSession {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			client: StoredValue::new_local(ApiClient::new(config)),
			session: RwSignal::new(None),
			graph: RwSignal::new(None),
			ship: RwSignal::new(ShipState::default()),
			popups: RwSignal::new(FloatingScores::default()),
			fly_target: RwSignal::new(None),
			flying: RwSignal::new(false),
			fly_duration: config.fly_duration,
			popup_duration: config.popup_duration,
		}
	}

	/// Open a session, then load its graph whenever the id changes.
	pub fn start(self) {
		spawn_local(async move {
			let Some(client) = self.client.try_get_value() else {
				return;
			};
			match client.start_session().await {
				Ok(question) => {
					info!(
						"session {} started with {:?} ({} options)",
						question.session_id,
						question.question,
						question.options.len()
					);
					let _ = self.session.try_set(Some(question.session_id));
				}
				Err(err) => error!("failed to start session: {err}"),
			}
		});

		Effect::new(move |_| {
			let Some(id) = self.session.get() else {
				return;
			};
			spawn_local(async move {
				if let Some(graph) = self.fetch_graph(&id).await {
					let _ = self.graph.try_set(Some(graph));
				}
			});
		});
	}

	pub fn handle_click(self, click: NodeClick) {
		let Some(session) = self.session.try_get_untracked().flatten() else {
			warn!("node clicked before the session started");
			return;
		};

		match ClickAction::for_node(&click.node) {
			ClickAction::StartTopic(topic) => {
				spawn_local(async move { self.pick_topic(session, topic).await });
			}
			ClickAction::Answer => {
				let Some(guard) = FlightGuard::engage(self.flying) else {
					debug!("flight in progress, ignoring click on {}", click.node.id);
					return;
				};
				let _ = self.fly_target.try_set(Some(click.node.id.clone()));
				set_timeout(
					move || {
						spawn_local(async move {
							self.submit_answer(session, click).await;
							drop(guard);
						})
					},
					self.fly_duration,
				);
			}
			ClickAction::AlreadyAnswered => {
				debug!("answer {} was already given", click.node.id)
			}
			ClickAction::Ignore => {
				debug!("ignoring click on {:?} node {}", click.node.kind, click.node.id)
			}
		}
	}

	async fn pick_topic(self, session: SessionId, topic: String) {
		info!("starting topic {topic}");
		let Some(client) = self.client.try_get_value() else {
			return;
		};
		if let Err(err) = client.first_question(&session, &topic).await {
			error!("failed to start topic {topic}: {err}");
			return;
		}
		if let Some(graph) = self.fetch_graph(&session).await {
			let _ = self.graph.try_set(Some(graph));
		}
	}

	async fn submit_answer(self, session: SessionId, click: NodeClick) {
		let answered = click.node;
		let Some(client) = self.client.try_get_value() else {
			return;
		};
		if let Err(err) = client
			.submit_answer(&session, &answered.question, &answered.label)
			.await
		{
			error!("failed to submit answer {}: {err}", answered.label);
			return;
		}
		let Some(graph) = self.fetch_graph(&session).await else {
			return;
		};

		let correct = graph.answer_outcome(&answered).unwrap_or(false);
		let _ = self.graph.try_set(Some(graph));
		let Some(points) = self.ship.try_update(|ship| ship.apply_answer(correct)) else {
			return;
		};
		info!(
			"answer {:?} was {}, +{points}",
			answered.label,
			if correct { "correct" } else { "wrong" }
		);
		self.show_popup(points, correct, click.x, click.y);
	}

	fn show_popup(self, points: u32, correct: bool, x: f64, y: f64) {
		let Some(id) = self.popups.try_update(|p| p.push(points, correct, x, y)) else {
			return;
		};
		let popups = self.popups;
		set_timeout(
			move || {
				popups.try_update(|p| p.remove(id));
			},
			self.popup_duration,
		);
	}

	async fn fetch_graph(self, session: &SessionId) -> Option<KnowledgeGraph> {
		let Some(client) = self.client.try_get_value() else {
			debug!("session state is gone, not fetching graph");
			return None;
		};
		debug!("fetching graph for session {session}");
		match client.fetch_graph(session).await {
			Ok(graph) => {
				debug!(
					"graph received: {} nodes, {} links",
					graph.nodes.len(),
					graph.links.len()
				);
				Some(graph)
			}
			Err(err) => {
				error!("failed to fetch graph for session {session}: {err}");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use rstest::rstest;

	use super::*;

	fn node(kind: NodeKind) -> GraphNode {
		GraphNode {
			id: "n1".into(),
			label: "History".into(),
			kind,
			is_current: false,
			selected: false,
			correct: None,
			question: "Pick a topic".into(),
			topic: false,
		}
	}

	#[rstest]
	#[case(GraphNode { topic: true, ..node(NodeKind::Answer) }, ClickAction::StartTopic("History".into()))]
	#[case(node(NodeKind::Answer), ClickAction::Answer)]
	#[case(GraphNode { selected: true, ..node(NodeKind::Answer) }, ClickAction::AlreadyAnswered)]
	#[case(node(NodeKind::Question), ClickAction::Ignore)]
	#[case(node(NodeKind::Home), ClickAction::Ignore)]
	#[case(GraphNode { topic: true, ..node(NodeKind::Topic) }, ClickAction::Ignore)]
	fn classifies_clicks(#[case] n: GraphNode, #[case] expected: ClickAction) {
		assert_eq!(ClickAction::for_node(&n), expected);
	}

	#[test]
	fn flight_guard_blocks_second_flight_and_clears_on_drop() {
		let owner = Owner::new();
		owner.with(|| {
			let flying = RwSignal::new(false);
			let guard = FlightGuard::engage(flying).unwrap();
			assert!(flying.get_untracked());
			assert!(FlightGuard::engage(flying).is_none());

			// an early return from a failed submit drops the guard
			drop(guard);
			assert!(!flying.get_untracked());
			assert!(FlightGuard::engage(flying).is_some());
			assert!(!flying.get_untracked());
		});
	}

	#[test]
	fn disposed_session_is_left_alone() {
		let owner = Owner::new();
		let quiz = owner.with(|| QuizSession::new(&AppConfig::default()));
		owner.cleanup();

		assert_eq!(block_on(quiz.fetch_graph(&SessionId::new("s1"))), None);
		quiz.handle_click(NodeClick {
			node: node(NodeKind::Answer),
			x: 10.0,
			y: 20.0,
		});
		quiz.show_popup(100, true, 10.0, 20.0);
		assert!(FlightGuard::engage(quiz.flying).is_none());
	}
}
