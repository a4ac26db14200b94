//! Chimney Fall - a toppling chimney that snaps in two
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pendulum dynamics, break event, ground clipping)
//! - `settings`: Run configuration with validation and JSON loading
//! - `display`: Sampled, ground-clipped frames for an external plotter

pub mod display;
pub mod settings;
pub mod sim;

pub use display::{DisplayFrames, ExportError, PieceKind, SamplingConfig, extract_frames};
pub use settings::{ConfigError, SimConfig};
pub use sim::{BreakEvent, Segment, SimulationOutput, Termination, run};

/// Simulation constants that are not part of the run configuration
pub mod consts {
    /// Fraction of the full length at which the chimney snaps (measured from the base)
    pub const BREAK_POINT_RATIO: f64 = 0.33;
    /// Scale applied to the stress proxy before comparing with `break_strength`
    pub const STRESS_SCALE: f64 = 1000.0;

    /// Reference parameters
    pub const DEFAULT_GRAVITY: f64 = 9.81;
    pub const DEFAULT_LENGTH: f64 = 50.0;
    pub const DEFAULT_BREAK_STRENGTH: f64 = 20_000.0;
    pub const DEFAULT_INITIAL_ANGLE_DEG: f64 = 5.0;
    pub const DEFAULT_DT: f64 = 0.01;
    pub const DEFAULT_MAX_TIME: f64 = 8.0;
}

/// Unit direction for an angle measured from vertical (x = sin, y = cos)
#[inline]
pub fn direction_from_vertical(angle: f64) -> glam::DVec2 {
    let (sin, cos) = angle.sin_cos();
    glam::DVec2::new(sin, cos)
}

/// Tangent direction of a point rotating about the origin, for angles from vertical.
///
/// Multiplying by `omega * radius` gives the linear velocity of that point.
#[inline]
pub fn tangent_from_vertical(angle: f64) -> glam::DVec2 {
    let (sin, cos) = angle.sin_cos();
    glam::DVec2::new(cos, -sin)
}
