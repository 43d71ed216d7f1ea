use super::geometry;
use super::scale;
use super::types::{Intersection, RelationRecord, Segment};

/// The authoritative record sequence plus its derived views. Segments and
/// intersections are pure derivations: any record-set or viewport change
/// rebuilds both wholesale.
pub struct Scene {
	records: Vec<RelationRecord>,
	width: f64,
	height: f64,
	pub segments: Vec<Segment>,
	pub intersections: Vec<Intersection>,
}

impl Scene {
	pub fn new(records: Vec<RelationRecord>, width: f64, height: f64) -> Self {
		let mut scene = Self {
			records,
			width,
			height,
			segments: Vec::new(),
			intersections: Vec::new(),
		};
		scene.recompute();
		scene
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn record_for(&self, segment: &Segment) -> &RelationRecord {
		&self.records[segment.owner]
	}

	/// Full replacement of the record set, as returned by the add-pair
	/// endpoint.
	pub fn replace_records(&mut self, records: Vec<RelationRecord>) {
		self.records = records;
		self.recompute();
	}

	/// Stale scaled segments are a correctness bug, not a staleness
	/// nuisance: hit-testing and intersection math live in pixel space.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.recompute();
	}

	fn recompute(&mut self) {
		self.segments = scale::scale_to_viewport(&self.records, self.width, self.height);
		self.intersections = compute_intersections(&self.records, &self.segments);
	}
}

/// Enumerates crossings for every unordered segment pair `(i, j)`, `i < j`,
/// in ascending order of the segment sequence. O(n²) over the record set.
pub fn compute_intersections(records: &[RelationRecord], segments: &[Segment]) -> Vec<Intersection> {
	let mut intersections = Vec::new();
	for (i, first) in segments.iter().enumerate() {
		for second in &segments[i + 1..] {
			let Some(point) = geometry::intersect_segments(first.a, first.b, second.a, second.b)
			else {
				continue;
			};
			let (r1, r2) = (&records[first.owner], &records[second.owner]);
			intersections.push(Intersection {
				point,
				label: format!(
					"{} -> {} X {} -> {}",
					r1.expectation, r1.experience, r2.expectation, r2.experience
				),
				source_keys: [r1.key.clone(), r2.key.clone()],
			});
		}
	}
	intersections
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::relation_canvas::types::Point2D;

	fn record(key: &str, from: [f64; 2], to: [f64; 2]) -> RelationRecord {
		RelationRecord {
			key: key.into(),
			expectation: format!("{key}-from"),
			experience: format!("{key}-to"),
			expectation_embedding_2d: from,
			experience_embedding_2d: to,
		}
	}

	// Three mutually crossing segments on the unit square.
	fn crossing_records() -> Vec<RelationRecord> {
		vec![
			record("a", [0.0, 0.0], [1.0, 1.0]),
			record("b", [0.0, 1.0], [1.0, 0.0]),
			record("c", [0.5, 0.0], [0.5, 1.0]),
		]
	}

	#[test]
	fn three_records_yield_three_pairings_in_order() {
		let scene = Scene::new(crossing_records(), 1.0, 1.0);
		assert_eq!(scene.intersections.len(), 3);
		let keys: Vec<_> = scene
			.intersections
			.iter()
			.map(|i| (i.source_keys[0].as_str(), i.source_keys[1].as_str()))
			.collect();
		assert_eq!(keys, vec![("a", "b"), ("a", "c"), ("b", "c")]);
	}

	#[test]
	fn label_joins_both_records() {
		let scene = Scene::new(crossing_records(), 1.0, 1.0);
		assert_eq!(scene.intersections[0].label, "a-from -> a-to X b-from -> b-to");
	}

	#[test]
	fn enumeration_is_deterministic() {
		let records = crossing_records();
		let first = compute_intersections(
			&records,
			&scale::scale_to_viewport(&records, 640.0, 480.0),
		);
		let second = compute_intersections(
			&records,
			&scale::scale_to_viewport(&records, 640.0, 480.0),
		);
		assert_eq!(first, second);
	}

	#[test]
	fn parallel_records_yield_nothing() {
		let records = vec![
			record("a", [0.0, 0.0], [1.0, 0.0]),
			record("b", [0.0, 0.5], [1.0, 0.5]),
		];
		let scene = Scene::new(records, 100.0, 100.0);
		assert!(scene.intersections.is_empty());
	}

	#[test]
	fn malformed_record_degrades_to_fewer_elements() {
		let records = vec![
			record("a", [0.0, 0.0], [1.0, 1.0]),
			record("bad", [f64::INFINITY, 0.0], [1.0, 0.0]),
			record("c", [0.0, 1.0], [1.0, 0.0]),
		];
		let scene = Scene::new(records, 10.0, 10.0);
		assert_eq!(scene.segments.len(), 2);
		assert_eq!(scene.intersections.len(), 1);
		assert_eq!(scene.intersections[0].source_keys, ["a", "c"]);
	}

	#[test]
	fn resize_rederives_in_new_pixel_space() {
		let mut scene = Scene::new(crossing_records(), 1.0, 1.0);
		assert_eq!(scene.intersections[0].point, Point2D::new(0.5, 0.5));

		scene.resize(100.0, 200.0);
		assert_eq!(scene.segments[0].b, Point2D::new(100.0, 200.0));
		assert_eq!(scene.intersections[0].point, Point2D::new(50.0, 100.0));
	}

	#[test]
	fn replace_records_recomputes_everything() {
		let mut scene = Scene::new(crossing_records(), 1.0, 1.0);
		assert_eq!(scene.intersections.len(), 3);

		scene.replace_records(vec![record("only", [0.0, 0.0], [1.0, 1.0])]);
		assert_eq!(scene.segments.len(), 1);
		assert!(scene.intersections.is_empty());
	}
}
