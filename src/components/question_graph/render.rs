use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_HEIGHT, NODE_WIDTH, TOGGLE_SIZE};
use crate::graph::{EdgeStyle, Node, Snapshot};

const BACKGROUND: &str = "#1a1a2e";
const NODE_FILL: &str = "#24243e";
const NODE_BORDER: &str = "rgba(100, 180, 255, 0.45)";
const NODE_RADIUS: f64 = 8.0;
const MAX_LABEL_CHARS: usize = 24;

/// Shorten a title to fit a node, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
	if label.chars().count() <= max_chars {
		return label.to_string();
	}
	let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
	format!("{}…", kept.trim_end())
}

pub fn render(state: &CanvasState, snapshot: &Snapshot, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, snapshot, ctx);
	draw_nodes(state, snapshot, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, snapshot: &Snapshot, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let nodes: HashMap<&str, &Node> = snapshot.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let hovered = state.hovered.as_deref();

	for edge in snapshot.edges.iter().filter(|e| !e.hidden) {
		let (Some(source), Some(target)) =
			(nodes.get(edge.source.as_str()), nodes.get(edge.target.as_str()))
		else {
			continue;
		};
		let (from, to) = (state.node_position(source), state.node_position(target));
		// Bottom-centre of the parent to top-centre of the child.
		let (sx, sy) = (from.x + NODE_WIDTH / 2.0, from.y + NODE_HEIGHT);
		let (tx, ty) = (to.x + NODE_WIDTH / 2.0, to.y);

		let highlighted = hovered.is_some_and(|id| id == edge.source || id == edge.target);
		let alpha = match (hovered, highlighted) {
			(_, true) => 0.95,
			(Some(_), false) => 0.2,
			(None, _) => 0.6,
		};
		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {alpha})"));
		ctx.set_line_width(if highlighted { 2.5 / k } else { 1.5 / k });

		// A dashed, flowing edge marks the way into a folded subtree.
		if target.collapsed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.begin_path();
		trace_edge(ctx, edge.style, (sx, sy), (tx, ty));
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn trace_edge(
	ctx: &CanvasRenderingContext2d,
	style: EdgeStyle,
	(sx, sy): (f64, f64),
	(tx, ty): (f64, f64),
) {
	ctx.move_to(sx, sy);
	match style {
		EdgeStyle::Straight => ctx.line_to(tx, ty),
		EdgeStyle::Bezier => {
			let bend = ((ty - sy).abs() / 2.0).max(30.0);
			ctx.bezier_curve_to(sx, sy + bend, tx, ty - bend, tx, ty);
		}
		EdgeStyle::Step | EdgeStyle::SmoothStep => {
			let mid_y = (sy + ty) / 2.0;
			let radius = if style == EdgeStyle::SmoothStep {
				(tx - sx).abs().min((ty - sy).abs()).min(16.0) / 2.0
			} else {
				0.0
			};
			if radius > 0.0 {
				let _ = ctx.arc_to(sx, mid_y, tx, mid_y, radius);
				let _ = ctx.arc_to(tx, mid_y, tx, ty, radius);
			} else {
				ctx.line_to(sx, mid_y);
				ctx.line_to(tx, mid_y);
			}
			ctx.line_to(tx, ty);
		}
	}
}

fn draw_nodes(state: &CanvasState, snapshot: &Snapshot, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for node in snapshot.nodes.iter().filter(|n| !n.hidden) {
		let p = state.node_position(node);
		let hovered = state.hovered.as_deref() == Some(node.id.as_str());

		rounded_rect(ctx, p.x, p.y, NODE_WIDTH, NODE_HEIGHT, NODE_RADIUS);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(if hovered { "rgba(255, 255, 255, 0.85)" } else { NODE_BORDER });
		ctx.set_line_width(if hovered { 2.0 / k } else { 1.0 / k });
		ctx.stroke();

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
		ctx.set_font("14px sans-serif");
		let label = truncate_label(&node.title, MAX_LABEL_CHARS);
		let _ = ctx.fill_text(&label, p.x + 14.0, p.y + NODE_HEIGHT / 2.0 + 5.0);

		if snapshot.has_present_children(node) {
			draw_toggle(ctx, node, CanvasState::toggle_origin(p));
		}
	}
}

/// Begin a new path holding a rounded rectangle.
fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Chevron pointing right when collapsed, down when expanded.
fn draw_toggle(ctx: &CanvasRenderingContext2d, node: &Node, (x, y): (f64, f64)) {
	rounded_rect(ctx, x, y, TOGGLE_SIZE, TOGGLE_SIZE, 4.0);
	ctx.set_fill_style_str("rgba(100, 180, 255, 0.15)");
	ctx.fill();

	let (cx, cy, r) = (x + TOGGLE_SIZE / 2.0, y + TOGGLE_SIZE / 2.0, TOGGLE_SIZE / 5.0);
	ctx.begin_path();
	if node.collapsed {
		ctx.move_to(cx - r / 2.0, cy - r);
		ctx.line_to(cx + r / 2.0, cy);
		ctx.line_to(cx - r / 2.0, cy + r);
	} else {
		ctx.move_to(cx - r, cy - r / 2.0);
		ctx.line_to(cx, cy + r / 2.0);
		ctx.line_to(cx + r, cy - r / 2.0);
	}
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.85)");
	ctx.set_line_width(2.0);
	ctx.stroke();
}
