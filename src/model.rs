//! View models mirroring what the quiz backend returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque session identifier handed out by `GET /start`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A question as returned by `/start`, `/first_question` and `/answer`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Question {
	#[serde(default)]
	pub question: String,
	#[serde(default)]
	pub options: Vec<QuestionOption>,
	pub session_id: SessionId,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "OptionRepr")]
pub struct QuestionOption {
	pub text: String,
	pub is_correct: bool,
}

// The backend has sent options both as bare strings and as objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionRepr {
	Plain(String),
	Rich {
		text: String,
		#[serde(default, rename = "isCorrect", alias = "is_correct")]
		is_correct: bool,
	},
}

impl From<OptionRepr> for QuestionOption {
	fn from(repr: OptionRepr) -> Self {
		match repr {
			OptionRepr::Plain(text) => Self {
				text,
				is_correct: false,
			},
			OptionRepr::Rich { text, is_correct } => Self { text, is_correct },
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Home,
	Question,
	Answer,
	Topic,
	Session,
	#[serde(other)]
	Other,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	#[serde(default, rename = "isCurrent", alias = "is_current")]
	pub is_current: bool,
	#[serde(default)]
	pub selected: bool,
	#[serde(default)]
	pub correct: Option<bool>,
	/// Text of the question an answer node belongs to.
	#[serde(default)]
	pub question: String,
	/// Set on answer nodes that open a new topic rather than answer a question.
	#[serde(default)]
	pub topic: bool,
}

impl GraphNode {
	pub fn is_topic_choice(&self) -> bool {
		self.kind == NodeKind::Answer && self.topic
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkKind {
	Next,
	Selected,
	HasOption,
	Other,
}

impl LinkKind {
	pub fn from_label(label: Option<&str>) -> Self {
		match label {
			Some("NEXT") => Self::Next,
			Some("SELECTED") => Self::Selected,
			Some("HAS_OPTION") => Self::HasOption,
			_ => Self::Other,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub label: Option<String>,
}

impl GraphLink {
	pub fn kind(&self) -> LinkKind {
		LinkKind::from_label(self.label.as_deref())
	}
}

/// The whole node/link structure of one session, replaced wholesale on every fetch.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct KnowledgeGraph {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl KnowledgeGraph {
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// The question the user is looking at: the one flagged current, else the
	/// most recently added question node.
	pub fn current_question(&self) -> Option<&GraphNode> {
		let mut questions = self.nodes.iter().filter(|n| n.kind == NodeKind::Question);
		let last = questions.clone().last();
		questions.find(|n| n.is_current).or(last)
	}

	/// Answer nodes hanging off the given question, in link order.
	pub fn options_of(&self, question_id: &str) -> Vec<&GraphNode> {
		let mut options: Vec<&GraphNode> = Vec::new();
		for link in self.links.iter().filter(|l| l.source == question_id) {
			if let Some(node) = self.node(&link.target) {
				if node.kind == NodeKind::Answer && !options.iter().any(|o| o.id == node.id) {
					options.push(node);
				}
			}
		}
		options
	}

	/// Whether the answer the user just submitted was right, looked up after
	/// the graph has been re-fetched. Falls back to matching label and question
	/// text when the backend re-keyed the node.
	pub fn answer_outcome(&self, answered: &GraphNode) -> Option<bool> {
		self.node(&answered.id)
			.and_then(|n| n.correct)
			.or_else(|| {
				self.nodes
					.iter()
					.filter(|n| n.kind == NodeKind::Answer && n.selected)
					.find(|n| n.label == answered.label && n.question == answered.question)
					.and_then(|n| n.correct)
			})
	}
}
