//! The single normalized-to-pixel mapping point. Resize handling is just
//! calling this again with the new dimensions.

use super::types::{Point2D, RelationRecord, Segment};

fn endpoint(embedding: [f64; 2], width: f64, height: f64) -> Point2D {
	Point2D::new(embedding[0] * width, embedding[1] * height)
}

/// Scales each record's normalized endpoints by the viewport dimensions.
/// Records with non-finite coordinates are skipped; survivors keep their
/// index into the input sequence as `owner`.
pub fn scale_to_viewport(records: &[RelationRecord], width: f64, height: f64) -> Vec<Segment> {
	records
		.iter()
		.enumerate()
		.filter_map(|(owner, record)| {
			let a = endpoint(record.expectation_embedding_2d, width, height);
			let b = endpoint(record.experience_embedding_2d, width, height);
			if !a.is_finite() || !b.is_finite() {
				log::warn!("skipping record {}: non-finite coordinates", record.key);
				return None;
			}
			Some(Segment { owner, a, b })
		})
		.collect()
}
