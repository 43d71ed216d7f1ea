//! Segment-segment intersection, determinant form.

use super::types::Point2D;

/// Determinants below this are treated as parallel.
const EPSILON: f64 = 1e-9;

/// Intersects the finite segments `a1..b1` and `a2..b2`.
///
/// Solves `a1 + t*(b1-a1) = a2 + u*(b2-a2)` and reports the crossing iff
/// `0 <= t <= 1` and `0 <= u <= 1`, endpoints inclusive. Parallel and
/// collinear input yields `None`; a collinear overlap has no unique
/// crossing point and is reported the same way. Zero-length segments fall
/// into the parallel case. Never panics.
pub fn intersect_segments(a1: Point2D, b1: Point2D, a2: Point2D, b2: Point2D) -> Option<Point2D> {
	let d1x = b1.x - a1.x;
	let d1y = b1.y - a1.y;
	let d2x = b2.x - a2.x;
	let d2y = b2.y - a2.y;

	let denom = d1x * d2y - d1y * d2x;
	if denom.abs() < EPSILON {
		return None;
	}

	let ox = a2.x - a1.x;
	let oy = a2.y - a1.y;
	let t = (ox * d2y - oy * d2x) / denom;
	let u = (ox * d1y - oy * d1x) / denom;

	if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
		return None;
	}
	Some(Point2D::new(a1.x + t * d1x, a1.y + t * d1y))
}
