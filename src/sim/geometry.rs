//! Segment geometry for the chimney and its pieces
//!
//! All angles are measured from vertical: angle 0 points straight up, positive
//! angles lean toward +x.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::direction_from_vertical;

/// A line segment in the vertical plane (y is height above ground)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_points(start: DVec2, end: DVec2) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> DVec2 {
        DVec2::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.end() - self.start()).length()
    }

    /// Lowest endpoint height
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y1.min(self.y2)
    }

    /// True if either endpoint is at or below ground level
    #[inline]
    pub fn touches_ground(&self) -> bool {
        self.y1 <= 0.0 || self.y2 <= 0.0
    }
}

/// Endpoints of a rigid rod pivoted at `base`, leaning `angle` radians from vertical
#[inline]
pub fn rod_endpoints(length: f64, angle: f64, base: DVec2) -> Segment {
    Segment::from_points(base, base + direction_from_vertical(angle) * length)
}

/// Endpoints of a free piece of `length` centered at `center` with orientation `angle`.
///
/// The first endpoint is `center - offset`, the second `center + offset`.
#[inline]
pub fn top_piece_endpoints(center: DVec2, angle: f64, length: f64) -> Segment {
    let offset = direction_from_vertical(angle) * (length / 2.0);
    Segment::from_points(center - offset, center + offset)
}
