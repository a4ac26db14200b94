//! Append-only frame history
//!
//! One record per step for the bottom piece, one per post-break step for the
//! top piece. Records are never touched after they are pushed.

use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use super::state::PhaseTag;

/// Upper bound on pre-allocated records (longer runs just grow)
const MAX_RESERVED_RECORDS: usize = 1 << 16;

/// Bottom-piece pose, tagged with the phase that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BottomRecord {
    pub segment: Segment,
    pub phase: PhaseTag,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    bottom: Vec<BottomRecord>,
    top: Vec<Segment>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `steps` bottom records
    pub fn with_expected_steps(steps: usize) -> Self {
        Self {
            bottom: Vec::with_capacity(steps.min(MAX_RESERVED_RECORDS)),
            top: Vec::new(),
        }
    }

    pub fn push_bottom(&mut self, segment: Segment, phase: PhaseTag) {
        self.bottom.push(BottomRecord { segment, phase });
    }

    pub fn push_top(&mut self, segment: Segment) {
        self.top.push(segment);
    }

    pub fn bottom(&self) -> &[BottomRecord] {
        &self.bottom
    }

    pub fn top(&self) -> &[Segment] {
        &self.top
    }

    pub fn into_parts(self) -> (Vec<BottomRecord>, Vec<Segment>) {
        (self.bottom, self.top)
    }
}
