use crate::model::{GraphLink, GraphNode, LinkKind, NodeKind};

const MAX_LABEL_CHARS: usize = 30;

pub fn node_color(node: &GraphNode) -> &'static str {
	match node.kind {
		NodeKind::Question => "#FFA500",
		NodeKind::Answer if node.selected && node.correct == Some(false) => "#F56565",
		NodeKind::Answer if node.selected => "#48BB78",
		NodeKind::Answer => "#CBD5E0",
		_ => "#999",
	}
}

pub fn node_radius(node: &GraphNode) -> f64 {
	match node.kind {
		NodeKind::Home => 12.0,
		NodeKind::Answer => 8.0,
		_ if node.is_current => 10.0,
		_ => 6.0,
	}
}

/// Full text, shown in the hover tooltip.
pub fn node_label(node: &GraphNode) -> String {
	match node.kind {
		NodeKind::Home => "🌍 Home".into(),
		_ => node.label.clone(),
	}
}

/// Label drawn on the canvas, cut to fit next to the node.
pub fn short_label(label: &str) -> String {
	match label.char_indices().nth(MAX_LABEL_CHARS) {
		Some((cut, _)) => format!("{}…", &label[..cut]),
		None => label.to_string(),
	}
}

pub fn link_color(link: &GraphLink) -> &'static str {
	match link.kind() {
		LinkKind::Selected => "#38A169",
		LinkKind::Next => "#4299E1",
		_ => "#A0AEC0",
	}
}

pub fn link_width(link: &GraphLink) -> f64 {
	match link.kind() {
		LinkKind::Selected => 3.0,
		_ => 1.5,
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn node(kind: NodeKind) -> GraphNode {
		GraphNode {
			id: "n".into(),
			label: "Label".into(),
			kind,
			is_current: false,
			selected: false,
			correct: None,
			question: String::new(),
			topic: false,
		}
	}

	fn answer(selected: bool, correct: Option<bool>) -> GraphNode {
		GraphNode {
			selected,
			correct,
			..node(NodeKind::Answer)
		}
	}

	#[rstest]
	#[case(node(NodeKind::Question), "#FFA500")]
	#[case(answer(true, Some(false)), "#F56565")]
	#[case(answer(true, Some(true)), "#48BB78")]
	#[case(answer(true, None), "#48BB78")]
	#[case(answer(false, Some(true)), "#CBD5E0")]
	#[case(node(NodeKind::Home), "#999")]
	#[case(node(NodeKind::Topic), "#999")]
	fn colors_nodes_by_kind_and_outcome(#[case] n: GraphNode, #[case] expected: &str) {
		assert_eq!(node_color(&n), expected);
	}

	#[rstest]
	#[case(node(NodeKind::Home), 12.0)]
	#[case(answer(false, None), 8.0)]
	#[case(GraphNode { is_current: true, ..node(NodeKind::Question) }, 10.0)]
	#[case(node(NodeKind::Question), 6.0)]
	#[case(node(NodeKind::Session), 6.0)]
	fn sizes_nodes(#[case] n: GraphNode, #[case] expected: f64) {
		assert_eq!(node_radius(&n), expected);
	}

	#[test]
	fn home_gets_fixed_label() {
		assert_eq!(node_label(&node(NodeKind::Home)), "🌍 Home");
		assert_eq!(node_label(&node(NodeKind::Question)), "Label");
	}

	#[rstest]
	#[case("short", "short")]
	#[case("exactly thirty characters long", "exactly thirty characters long")]
	#[case(
		"a question that is clearly longer than thirty",
		"a question that is clearly lon…"
	)]
	#[case(
		"Кто построил египетские пирамиды?",
		"Кто построил египетские пирами…"
	)]
	fn truncates_long_labels_on_char_boundaries(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(short_label(input), expected);
	}

	#[rstest]
	#[case(Some("SELECTED"), "#38A169", 3.0)]
	#[case(Some("NEXT"), "#4299E1", 1.5)]
	#[case(Some("HAS_OPTION"), "#A0AEC0", 1.5)]
	#[case(None, "#A0AEC0", 1.5)]
	fn styles_links_by_label(#[case] label: Option<&str>, #[case] color: &str, #[case] width: f64) {
		let link = GraphLink {
			source: "a".into(),
			target: "b".into(),
			label: label.map(String::from),
		};
		assert_eq!(link_color(&link), color);
		assert_eq!(link_width(&link), width);
	}
}
