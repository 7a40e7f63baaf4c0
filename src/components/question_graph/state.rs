use crate::graph::{Node, Position, Snapshot};

pub const NODE_WIDTH: f64 = 220.0;
pub const NODE_HEIGHT: f64 = 56.0;
pub const TOGGLE_SIZE: f64 = 22.0;
const TOGGLE_MARGIN: f64 = 10.0;
const FIT_PADDING: f64 = 48.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;
/// Screen pixels a press must travel before it counts as a drag.
const DRAG_THRESHOLD: f64 = 3.0;

/// What a pointer press landed on.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	/// The collapse/expand button of a node with children.
	Toggle { node_id: String, collapsed: bool },
	/// Anywhere else on a node.
	Node { node_id: String },
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	/// Current graph-space position of the dragged node.
	pub node_now: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<String>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	fitted_for: Option<String>,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			flow_time: 0.0,
			fitted_for: None,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Where `node` is drawn, honouring an in-flight drag.
	pub fn node_position(&self, node: &Node) -> Position {
		if self.drag.active && self.drag.node_id.as_deref() == Some(node.id.as_str()) {
			self.drag.node_now
		} else {
			node.position
		}
	}

	/// Top-left corner of a node's collapse button.
	pub fn toggle_origin(position: Position) -> (f64, f64) {
		(
			position.x + NODE_WIDTH - TOGGLE_MARGIN - TOGGLE_SIZE,
			position.y + (NODE_HEIGHT - TOGGLE_SIZE) / 2.0,
		)
	}

	/// Topmost visible node under a screen point.
	pub fn hit_test(&self, snapshot: &Snapshot, sx: f64, sy: f64) -> Option<Hit> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Later nodes are drawn on top.
		let node = snapshot.nodes.iter().rev().filter(|n| !n.hidden).find(|n| {
			let p = self.node_position(n);
			gx >= p.x && gx <= p.x + NODE_WIDTH && gy >= p.y && gy <= p.y + NODE_HEIGHT
		})?;

		if snapshot.has_present_children(node) {
			let (tx, ty) = Self::toggle_origin(self.node_position(node));
			if gx >= tx && gx <= tx + TOGGLE_SIZE && gy >= ty && gy <= ty + TOGGLE_SIZE {
				return Some(Hit::Toggle {
					node_id: node.id.clone(),
					collapsed: node.collapsed,
				});
			}
		}
		Some(Hit::Node {
			node_id: node.id.clone(),
		})
	}

	pub fn begin_drag(&mut self, node: &Node, sx: f64, sy: f64) {
		self.drag = DragState {
			active: true,
			node_id: Some(node.id.clone()),
			start_x: sx,
			start_y: sy,
			node_start: node.position,
			node_now: node.position,
			moved: false,
		};
	}

	pub fn update_drag(&mut self, sx: f64, sy: f64) {
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if dx.hypot(dy) >= DRAG_THRESHOLD {
			self.drag.moved = true;
		}
		self.drag.node_now = Position::new(
			self.drag.node_start.x + dx / self.transform.k,
			self.drag.node_start.y + dy / self.transform.k,
		);
	}

	/// Finish a drag, returning the dropped node and its new position if it moved.
	pub fn end_drag(&mut self) -> Option<(String, Position)> {
		let drag = std::mem::take(&mut self.drag);
		match drag.node_id {
			Some(node_id) if drag.active && drag.moved => Some((node_id, drag.node_now)),
			_ => None,
		}
	}

	/// Fit the visible nodes into the viewport once per `key` (the active user).
	pub fn fit_once(&mut self, snapshot: &Snapshot, key: &str) {
		if self.fitted_for.as_deref() == Some(key) || snapshot.is_empty() {
			return;
		}
		self.fit(snapshot);
		self.fitted_for = Some(key.to_string());
	}

	pub fn fit(&mut self, snapshot: &Snapshot) {
		let mut visible = snapshot.nodes.iter().filter(|n| !n.hidden).peekable();
		if visible.peek().is_none() {
			return;
		}
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for node in visible {
			min_x = min_x.min(node.position.x);
			min_y = min_y.min(node.position.y);
			max_x = max_x.max(node.position.x + NODE_WIDTH);
			max_y = max_y.max(node.position.y + NODE_HEIGHT);
		}

		let (bw, bh) = (max_x - min_x, max_y - min_y);
		let k = ((self.width - 2.0 * FIT_PADDING) / bw)
			.min((self.height - 2.0 * FIT_PADDING) / bh)
			.clamp(0.1, 1.5);
		self.transform = ViewTransform {
			x: (self.width - bw * k) / 2.0 - min_x * k,
			y: (self.height - bh * k) / 2.0 - min_y * k,
			k,
		};
	}

	/// Scale by `factor` around a screen point, which stays put.
	pub fn zoom_by(&mut self, factor: f64, sx: f64, sy: f64) {
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
