use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, CROSSING_RADIUS, ENDPOINT_RADIUS, Marker};
use super::types::Point2D;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

const BACKGROUND: &str = "#fcfcfc";
const CROSSING_COLOR: &str = "#ff8800";
const CENTER_RADIUS: f64 = 10.0;
const HOVERED_MARKER_RADIUS: f64 = 10.0;
const TOOLTIP_FONT: &str = "16px sans-serif";
const TOOLTIP_HEIGHT: f64 = 24.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.scene.width(), state.scene.height());
	draw_segments(state, ctx);
	draw_crossings(state, ctx);
	draw_center_dot(state, ctx);
	draw_tooltip(state, ctx);
}

fn segment_color(owner: usize) -> &'static str {
	COLORS[owner % COLORS.len()]
}

fn draw_segments(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.highlight_t);
	let dimming = state.has_active_highlight();

	// Two passes so highlighted lines and their endpoints stay on top.
	for highlighted_pass in [false, true] {
		for (i, segment) in state.scene.segments.iter().enumerate() {
			let record = state.scene.record_for(segment);
			let highlighted = state.is_relation_highlighted(&record.key);
			if highlighted != highlighted_pass {
				continue;
			}

			// t=0: everything at base; t=1: the two source lines brighten
			// and thicken while the rest recede.
			let (alpha, width) = if highlighted {
				(0.7 + 0.3 * t, 2.0 * (1.0 + 0.5 * t))
			} else if dimming {
				(0.7 - 0.5 * t, 2.0 * (1.0 - 0.3 * t))
			} else {
				(0.7, 2.0)
			};
			let color = segment_color(segment.owner);

			ctx.set_global_alpha(alpha);
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(width);
			ctx.begin_path();
			ctx.move_to(segment.a.x, segment.a.y);
			ctx.line_to(segment.b.x, segment.b.y);
			ctx.stroke();

			let expectation_hovered = state.marker == Some(Marker::Expectation(i));
			let experience_hovered = state.marker == Some(Marker::Experience(i));
			draw_circle_marker(
				ctx,
				segment.a,
				if expectation_hovered {
					HOVERED_MARKER_RADIUS
				} else {
					ENDPOINT_RADIUS
				},
				color,
			);
			draw_cross_marker(
				ctx,
				segment.b,
				if experience_hovered { 3.0 } else { 2.0 },
				color,
			);
			ctx.set_global_alpha(1.0);
		}
	}
}

fn draw_circle_marker(ctx: &CanvasRenderingContext2d, at: Point2D, radius: f64, color: &str) {
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();
}

fn draw_cross_marker(ctx: &CanvasRenderingContext2d, at: Point2D, width: f64, color: &str) {
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.set_line_cap("round");
	ctx.begin_path();
	ctx.move_to(at.x - 3.0, at.y - 3.0);
	ctx.line_to(at.x + 3.0, at.y + 3.0);
	ctx.move_to(at.x + 3.0, at.y - 3.0);
	ctx.line_to(at.x - 3.0, at.y + 3.0);
	ctx.stroke();
	ctx.set_line_cap("butt");
}

fn draw_crossings(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.highlight_t);

	for (i, intersection) in state.scene.intersections.iter().enumerate() {
		let hovered = state.marker == Some(Marker::Intersection(i));
		let radius = if hovered {
			CROSSING_RADIUS + (HOVERED_MARKER_RADIUS - CROSSING_RADIUS) * t
		} else {
			CROSSING_RADIUS
		};
		draw_circle_marker(ctx, intersection.point, radius, CROSSING_COLOR);
	}
}

fn draw_center_dot(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let center = Point2D::new(0.5 * state.scene.width(), 0.5 * state.scene.height());
	draw_circle_marker(ctx, center, CENTER_RADIUS, "#000000");
}

fn draw_tooltip(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.highlight_t);
	if t < 0.01 {
		return;
	}
	let Some((anchor, text)) = state.marker_tooltip() else {
		return;
	};

	ctx.set_font(TOOLTIP_FONT);
	let Ok(metrics) = ctx.measure_text(text) else {
		return;
	};
	let box_width = metrics.width() + 10.0;

	// Offset to the upper right of the marker, clamped onto the viewport.
	let mut x = anchor.x + 11.0;
	let mut y = anchor.y - 20.0;
	if x + box_width > state.scene.width() {
		x = state.scene.width() - box_width;
	}
	y = y.clamp(0.0, (state.scene.height() - TOOLTIP_HEIGHT).max(0.0));

	ctx.set_global_alpha(0.9 * t);
	ctx.set_fill_style_str("#d0d0d0");
	ctx.fill_rect(x, y, box_width, TOOLTIP_HEIGHT);

	ctx.set_global_alpha(t);
	ctx.set_line_width(2.0);
	ctx.set_stroke_style_str("#000000");
	ctx.set_fill_style_str("#ffffff");
	let baseline = y + TOOLTIP_HEIGHT - 7.0;
	let _ = ctx.stroke_text(text, x + 5.0, baseline);
	let _ = ctx.fill_text(text, x + 5.0, baseline);
	ctx.set_global_alpha(1.0);
}
