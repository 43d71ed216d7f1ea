use super::scene::Scene;
use super::types::{Point2D, RelationRecord};

pub const CROSSING_RADIUS: f64 = 3.0;
pub const ENDPOINT_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 10.0;

/// The marker under the pointer. Endpoint and crossing indices refer to
/// the scene's segment and intersection sequences respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
	Expectation(usize),
	Experience(usize),
	Intersection(usize),
}

/// Which intersection, if any, is hovered. The single source of truth for
/// segment highlighting; at most one intersection is hovered system-wide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	hovered: Option<usize>,
}

impl HighlightState {
	/// Entering a new intersection supersedes any previous hover. Indices
	/// can outlive a recompute that shrank the sequence; out-of-range
	/// events are no-ops.
	pub fn pointer_enter(&mut self, index: usize, intersection_count: usize) {
		if index < intersection_count {
			self.hovered = Some(index);
		}
	}

	/// Leaves for anything but the current intersection are stale (pointer
	/// events race during fast movement) and are ignored.
	pub fn pointer_leave(&mut self, index: usize) {
		if self.hovered == Some(index) {
			self.hovered = None;
		}
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}
}

/// Everything the canvas needs per frame: the scene, the hovered
/// intersection, the per-marker hover flag, and the eased highlight
/// transition.
pub struct CanvasState {
	pub scene: Scene,
	pub highlight: HighlightState,
	pub marker: Option<Marker>,
	pub highlight_t: f64,
}

impl CanvasState {
	pub fn new(records: Vec<RelationRecord>, width: f64, height: f64) -> Self {
		Self {
			scene: Scene::new(records, width, height),
			highlight: HighlightState::default(),
			marker: None,
			highlight_t: 0.0,
		}
	}

	pub fn replace_records(&mut self, records: Vec<RelationRecord>) {
		self.scene.replace_records(records);
		self.reset_hover();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.scene.resize(width, height);
		self.reset_hover();
	}

	// The derived sequences were just rebuilt; indices into the old ones
	// must not survive.
	fn reset_hover(&mut self) {
		self.highlight = HighlightState::default();
		self.marker = None;
	}

	/// Hit-tests the marker under `(x, y)`. Crossing markers win over
	/// endpoint dots, matching draw order.
	pub fn marker_at(&self, x: f64, y: f64) -> Option<Marker> {
		for (i, intersection) in self.scene.intersections.iter().enumerate() {
			if within_hit_radius(intersection.point, x, y) {
				return Some(Marker::Intersection(i));
			}
		}
		for (i, segment) in self.scene.segments.iter().enumerate() {
			if within_hit_radius(segment.a, x, y) {
				return Some(Marker::Expectation(i));
			}
			if within_hit_radius(segment.b, x, y) {
				return Some(Marker::Experience(i));
			}
		}
		None
	}

	/// Converts the pointer position into enter/leave transitions on the
	/// highlight state and updates the per-marker hover flag. The two hover
	/// tiers stay decoupled: endpoint markers never touch the highlight.
	pub fn update_pointer(&mut self, x: f64, y: f64) {
		let next = self.marker_at(x, y);
		if next == self.marker {
			return;
		}
		if let Some(Marker::Intersection(i)) = self.marker {
			self.highlight.pointer_leave(i);
		}
		if let Some(Marker::Intersection(i)) = next {
			self.highlight.pointer_enter(i, self.scene.intersections.len());
		}
		self.marker = next;
	}

	/// The pointer left the canvas entirely; both hover tiers release.
	pub fn clear_pointer(&mut self) {
		if let Some(Marker::Intersection(i)) = self.marker {
			self.highlight.pointer_leave(i);
		}
		self.marker = None;
	}

	/// True iff the hovered intersection was produced by this relation.
	pub fn is_relation_highlighted(&self, key: &str) -> bool {
		let Some(index) = self.highlight.hovered() else {
			return false;
		};
		self.scene
			.intersections
			.get(index)
			.is_some_and(|intersection| intersection.source_keys.iter().any(|k| k == key))
	}

	pub fn has_active_highlight(&self) -> bool {
		self.highlight.hovered().is_some()
	}

	/// Anchor point and text for the hovered marker's tooltip, if any.
	pub fn marker_tooltip(&self) -> Option<(Point2D, &str)> {
		match self.marker? {
			Marker::Intersection(i) => {
				let intersection = self.scene.intersections.get(i)?;
				Some((intersection.point, intersection.label.as_str()))
			}
			Marker::Expectation(i) => {
				let segment = self.scene.segments.get(i)?;
				Some((segment.a, self.scene.record_for(segment).expectation.as_str()))
			}
			Marker::Experience(i) => {
				let segment = self.scene.segments.get(i)?;
				Some((segment.b, self.scene.record_for(segment).experience.as_str()))
			}
		}
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.marker.is_some() {
			(1.0, 1.8)
		} else {
			(0.0, 1.26)
		};
		self.highlight_t += (target - self.highlight_t) * speed * dt;
		if target == 0.0 && self.highlight_t < 0.01 {
			self.highlight_t = 0.0;
		}
	}
}

fn within_hit_radius(p: Point2D, x: f64, y: f64) -> bool {
	let (dx, dy) = (p.x - x, p.y - y);
	dx * dx + dy * dy < HIT_RADIUS * HIT_RADIUS
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(key: &str, from: [f64; 2], to: [f64; 2]) -> RelationRecord {
		RelationRecord {
			key: key.into(),
			expectation: format!("{key}-from"),
			experience: format!("{key}-to"),
			expectation_embedding_2d: from,
			experience_embedding_2d: to,
		}
	}

	// Two diagonals crossing at (200, 200) on a 400x400 viewport, plus a
	// horizontal line well away from everything else.
	fn state() -> CanvasState {
		CanvasState::new(
			vec![
				record("a", [0.0, 0.0], [1.0, 1.0]),
				record("b", [0.0, 1.0], [1.0, 0.0]),
				record("far", [0.0, 0.9], [0.4, 0.9]),
			],
			400.0,
			400.0,
		)
	}

	#[test]
	fn later_enter_supersedes_and_stale_leave_is_ignored() {
		let mut highlight = HighlightState::default();
		highlight.pointer_enter(1, 5);
		highlight.pointer_enter(2, 5);
		highlight.pointer_leave(1);
		assert_eq!(highlight.hovered(), Some(2));
	}

	#[test]
	fn leaving_the_current_intersection_goes_idle() {
		let mut highlight = HighlightState::default();
		highlight.pointer_enter(3, 5);
		highlight.pointer_leave(3);
		assert_eq!(highlight.hovered(), None);
	}

	#[test]
	fn out_of_range_enter_is_a_no_op() {
		let mut highlight = HighlightState::default();
		highlight.pointer_enter(7, 3);
		assert_eq!(highlight.hovered(), None);
	}

	#[test]
	fn hovering_a_crossing_highlights_both_sources_only() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);

		assert_eq!(state.marker, Some(Marker::Intersection(0)));
		assert!(state.is_relation_highlighted("a"));
		assert!(state.is_relation_highlighted("b"));
		assert!(!state.is_relation_highlighted("far"));
	}

	#[test]
	fn moving_off_the_crossing_clears_the_highlight() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);
		state.update_pointer(point.x + 50.0, point.y + 50.0);

		assert_eq!(state.marker, None);
		assert!(!state.is_relation_highlighted("a"));
	}

	#[test]
	fn endpoint_hover_shows_a_tooltip_without_highlighting() {
		let mut state = state();
		// Expectation endpoint of "far", away from both crossings.
		let anchor = state.scene.segments[2].a;
		state.update_pointer(anchor.x, anchor.y);

		assert_eq!(state.marker, Some(Marker::Expectation(2)));
		assert!(!state.has_active_highlight());
		let (point, text) = state.marker_tooltip().expect("tooltip for endpoint");
		assert_eq!(point, anchor);
		assert_eq!(text, "far-from");
	}

	#[test]
	fn crossing_tooltip_carries_the_composite_label() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);

		let (_, text) = state.marker_tooltip().expect("tooltip for crossing");
		assert_eq!(text, "a-from -> a-to X b-from -> b-to");
	}

	#[test]
	fn clear_pointer_releases_both_tiers() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);
		state.clear_pointer();

		assert_eq!(state.marker, None);
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn recompute_drops_stale_hover_indices() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);

		state.resize(800.0, 800.0);
		assert_eq!(state.marker, None);
		assert!(!state.has_active_highlight());

		state.update_pointer(400.0, 400.0);
		assert!(state.is_relation_highlighted("a"));
	}

	#[test]
	fn tick_eases_toward_hover_target() {
		let mut state = state();
		let point = state.scene.intersections[0].point;
		state.update_pointer(point.x, point.y);
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert!(state.highlight_t > 0.0 && state.highlight_t <= 1.0);

		state.clear_pointer();
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert_eq!(state.highlight_t, 0.0);
	}
}
