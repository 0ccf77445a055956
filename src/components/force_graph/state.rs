use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::style;
use crate::model::KnowledgeGraph;

pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel (screen px) below which a press-release on a node is a click.
pub const CLICK_SLOP: f64 = 4.0;
const LAYOUT_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub short_label: String,
	pub color: &'static str,
	pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub color: &'static str,
	pub width: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Camera animation towards a node; the target follows the node while it settles.
#[derive(Clone, Debug)]
pub struct CameraFlight {
	node: DefaultNodeIdx,
	from: ViewTransform,
	zoom: f64,
	elapsed: f64,
	duration: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub flight: Option<CameraFlight>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub edges: Vec<EdgeInfo>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

fn new_graph() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &KnowledgeGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: new_graph(),
			edges: Vec::new(),
			id_to_idx: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			flight: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.set_data(data);
		state
	}

	/// Replace the graph. Nodes whose id is still present keep their position
	/// and anchoring so a re-fetch does not reshuffle the layout.
	pub fn set_data(&mut self, data: &KnowledgeGraph) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		let flight_target = self
			.flight
			.as_ref()
			.and_then(|f| self.node_id(f.node))
			.map(str::to_string);

		let mut graph = new_graph();
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		let spread = if data.nodes.len() > 1 { LAYOUT_RADIUS } else { 0.0 };

		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y, is_anchor) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				((spread * angle.cos()) as f32, (spread * angle.sin()) as f32, false)
			});
			let label = style::node_label(node);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					short_label: style::short_label(&label),
					label,
					color: style::node_color(node),
					radius: style::node_radius(node),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeInfo {
					source: src,
					target: tgt,
					color: style::link_color(link),
					width: style::link_width(link),
				});
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.id_to_idx = id_to_idx;
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.flight = self.flight.take().and_then(|mut f| {
			let idx = *self.id_to_idx.get(flight_target.as_deref()?)?;
			f.node = idx;
			Some(f)
		});
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<&str> {
		self.id_to_idx
			.iter()
			.find(|&(_, &i)| i == idx)
			.map(|(id, _)| id.as_str())
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn node_position_by_id(&self, id: &str) -> Option<(f64, f64)> {
		self.node_position(*self.id_to_idx.get(id)?)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space, scales with zoom like nodes
			let hit = HIT_RADIUS.max(node.data.user_data.radius + 2.0);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.node_position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
		} else {
			self.flight = None;
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sx * sx + sy * sy).sqrt() < CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			if let Some(idx) = self.drag.node_idx {
				let (nx, ny) = (
					self.drag.node_start_x + (sx / self.transform.k) as f32,
					self.drag.node_start_y + (sy / self.transform.k) as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End a press. Returns the node when the press was a click rather than a drag.
	pub fn release(&mut self) -> Option<DefaultNodeIdx> {
		let clicked = match self.drag.node_idx {
			Some(idx) if self.drag.active && !self.drag.moved => Some(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		self.flight = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Start flying the camera to `id`. Returns `false` for unknown nodes.
	pub fn fly_to(&mut self, id: &str, duration: f64, zoom: f64) -> bool {
		let Some(&node) = self.id_to_idx.get(id) else {
			return false;
		};
		self.flight = Some(CameraFlight {
			node,
			from: self.transform.clone(),
			zoom,
			elapsed: 0.0,
			duration: duration.max(f64::EPSILON),
		});
		true
	}

	pub fn is_flying(&self) -> bool {
		self.flight.is_some()
	}

	fn step_flight(&mut self, dt: f64) {
		let Some(mut flight) = self.flight.take() else {
			return;
		};
		let Some((nx, ny)) = self.node_position(flight.node) else {
			return;
		};
		let target = ViewTransform {
			x: self.width / 2.0 - nx * flight.zoom,
			y: self.height / 2.0 - ny * flight.zoom,
			k: flight.zoom,
		};
		flight.elapsed += dt;
		let t = (flight.elapsed / flight.duration).min(1.0);
		if t >= 1.0 {
			self.transform = target;
			return;
		}
		let e = ease_in_out_cubic(t);
		let from = &flight.from;
		self.transform = ViewTransform {
			x: from.x + (target.x - from.x) * e,
			y: from.y + (target.y - from.y) * e,
			k: from.k + (target.k - from.k) * e,
		};
		self.flight = Some(flight);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.step_flight(dt as f64);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{GraphLink, GraphNode, NodeKind};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn node(id: &str, kind: NodeKind) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.to_uppercase(),
			kind,
			is_current: false,
			selected: false,
			correct: None,
			question: String::new(),
			topic: false,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			label: None,
		}
	}

	fn sample() -> KnowledgeGraph {
		KnowledgeGraph {
			nodes: vec![
				node("q", NodeKind::Question),
				node("a", NodeKind::Answer),
				node("b", NodeKind::Answer),
			],
			links: vec![link("q", "a"), link("q", "b"), link("q", "missing")],
		}
	}

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
	}

	#[test]
	fn skips_links_with_unknown_endpoints() {
		let state = ForceGraphState::new(&sample(), W, H);
		assert_eq!(state.edges.len(), 2);
	}

	#[test]
	fn hit_test_maps_back_to_node_id() {
		let state = ForceGraphState::new(&sample(), W, H);
		let (gx, gy) = state.node_position_by_id("q").unwrap();
		let (sx, sy) = state.graph_to_screen(gx, gy);
		let idx = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.node_id(idx), Some("q"));
		assert!(state.node_at_position(0.0, 0.0).is_none());
	}

	#[test]
	fn replacing_data_keeps_surviving_positions() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		let a = state.id_to_idx["a"];
		state.graph.visit_nodes_mut(|n| {
			if n.index() == a {
				n.data.x = 42.0;
				n.data.y = -7.0;
			}
		});

		let mut next = sample();
		next.nodes.push(node("c", NodeKind::Question));
		next.links.push(link("a", "c"));
		state.set_data(&next);

		assert!(close(state.node_position_by_id("a").unwrap(), (42.0, -7.0)));
		assert!(state.node_position_by_id("c").is_some());
		assert_eq!(state.edges.len(), 3);
	}

	#[test]
	fn press_and_release_in_place_is_a_click() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		let (sx, sy) = {
			let (gx, gy) = state.node_position_by_id("a").unwrap();
			state.graph_to_screen(gx, gy)
		};
		state.press(sx, sy);
		state.pointer_move(sx + 1.0, sy + 1.0);
		let clicked = state.release().unwrap();
		assert_eq!(state.node_id(clicked), Some("a"));
	}

	#[test]
	fn dragging_past_slop_moves_node_instead_of_clicking() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		let (gx, gy) = state.node_position_by_id("a").unwrap();
		let (sx, sy) = state.graph_to_screen(gx, gy);
		state.press(sx, sy);
		state.pointer_move(sx + 20.0, sy);
		assert!(state.release().is_none());
		assert!(close(state.node_position_by_id("a").unwrap(), (gx + 20.0, gy)));
	}

	#[test]
	fn panning_the_background_never_clicks() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		state.press(5.0, 5.0);
		state.pointer_move(25.0, 15.0);
		assert!(state.release().is_none());
		assert_eq!(state.transform.x, W / 2.0 + 20.0);
		assert_eq!(state.transform.y, H / 2.0 + 10.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, -1.0);
		}
		assert_eq!(state.transform.k, 10.0);
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, 1.0);
		}
		assert_eq!(state.transform.k, 0.1);
	}

	#[test]
	fn fly_to_centres_node_at_target_zoom() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		assert!(state.fly_to("b", 0.5, 2.0));
		assert!(state.is_flying());

		let mut frames = 0;
		while state.is_flying() && frames < 100 {
			state.tick(0.016);
			frames += 1;
		}
		assert!(!state.is_flying());
		assert!((31..=33).contains(&frames));
		assert_eq!(state.transform.k, 2.0);
		let (gx, gy) = state.node_position_by_id("b").unwrap();
		assert!(close(state.graph_to_screen(gx, gy), (W / 2.0, H / 2.0)));
	}

	#[test]
	fn fly_to_unknown_node_is_ignored() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		assert!(!state.fly_to("nope", 1.0, 2.0));
		assert!(!state.is_flying());
	}

	#[test]
	fn hover_collects_neighbours() {
		let mut state = ForceGraphState::new(&sample(), W, H);
		let q = state.id_to_idx["q"];
		state.set_hover(Some(q));
		assert_eq!(state.hover.neighbors.len(), 2);
		assert!(state.is_highlighted(state.id_to_idx["a"]));
	}
}
