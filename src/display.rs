//! Display extraction
//!
//! Thins the recorded history down to what a plot needs: every Nth frame of
//! each piece, clipped to the ground, with a color per piece. Nothing here
//! feeds back into the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{PhaseTag, Segment, SimulationOutput, clip_to_ground};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write frames: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode frames: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which piece a display line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    BottomPreBreak,
    BottomPostBreak,
    Top,
}

impl PieceKind {
    /// RGBA color: blue before the break, red for the stub, orange for the top piece
    pub fn color(&self) -> [f32; 4] {
        match self {
            PieceKind::BottomPreBreak => [0.0, 0.0, 1.0, 1.0],
            PieceKind::BottomPostBreak => [1.0, 0.0, 0.0, 1.0],
            PieceKind::Top => [1.0, 0.65, 0.0, 1.0],
        }
    }
}

impl From<PhaseTag> for PieceKind {
    fn from(tag: PhaseTag) -> Self {
        match tag {
            PhaseTag::PreBreak => PieceKind::BottomPreBreak,
            PhaseTag::PostBreak => PieceKind::BottomPostBreak,
        }
    }
}

/// How densely to sample frames for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Keep every Nth bottom-piece frame (0 is treated as 1)
    pub bottom_stride: usize,
    /// Keep every Nth top-piece frame (0 is treated as 1)
    pub top_stride: usize,
    /// Ground line extends this far past the pivot and the chimney tip
    pub ground_margin: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            bottom_stride: 10,
            top_stride: 5,
            ground_margin: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub segment: Segment,
    pub kind: PieceKind,
    pub color: [f32; 4],
}

impl DisplayLine {
    fn new(segment: Segment, kind: PieceKind) -> Self {
        Self {
            segment,
            kind,
            color: kind.color(),
        }
    }
}

/// Frames ready for an external plotter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayFrames {
    pub ground: Segment,
    pub bottom: Vec<DisplayLine>,
    pub top: Vec<DisplayLine>,
}

impl DisplayFrames {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the frames to `path` as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Sample and clip the run's history for display
pub fn extract_frames(output: &SimulationOutput, sampling: &SamplingConfig) -> DisplayFrames {
    let margin = sampling.ground_margin;
    let ground = Segment::new(-margin, 0.0, output.original_length + margin, 0.0);

    let bottom = output
        .bottom
        .iter()
        .step_by(sampling.bottom_stride.max(1))
        .filter_map(|r| clip_to_ground(r.segment).map(|seg| DisplayLine::new(seg, r.phase.into())))
        .collect();

    let top = output
        .top
        .iter()
        .step_by(sampling.top_stride.max(1))
        .filter_map(|&seg| clip_to_ground(seg).map(|seg| DisplayLine::new(seg, PieceKind::Top)))
        .collect();

    DisplayFrames { ground, bottom, top }
}
