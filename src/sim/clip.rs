//! Ground clipping
//!
//! The ground is the line y = 0. Clipping keeps the part of a segment at or
//! above it; a segment that is entirely underground has nothing to keep.

use super::geometry::Segment;

/// Clip a segment to y >= 0
///
/// - Both endpoints at or above ground: returned unchanged.
/// - Both endpoints at or below ground: `None`.
/// - One above, one below: the underground endpoint is moved to the
///   crossing with y = 0, the other endpoint is kept as is.
pub fn clip_to_ground(seg: Segment) -> Option<Segment> {
    let Segment { x1, y1, x2, y2 } = seg;

    if y1 >= 0.0 && y2 >= 0.0 {
        return Some(seg);
    }
    if y1 <= 0.0 && y2 <= 0.0 {
        return None;
    }

    // P(t) = P1 + t * (P2 - P1), solve for y = 0
    let t = (0.0 - y1) / (y2 - y1);
    // Degenerate (y1 == y2) or NaN endpoints
    if !t.is_finite() {
        return None;
    }
    let xi = x1 + t * (x2 - x1);

    if y1 < 0.0 {
        Some(Segment::new(xi, 0.0, x2, y2))
    } else {
        Some(Segment::new(x1, y1, xi, 0.0))
    }
}
