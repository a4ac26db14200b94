//! Deterministic simulation module
//!
//! Pure numeric core. Fixed timestep only, no I/O besides logging, no
//! rendering dependencies.

pub mod clip;
pub mod geometry;
pub mod history;
pub mod run;
pub mod state;
pub mod tick;

pub use clip::clip_to_ground;
pub use geometry::{Segment, rod_endpoints, top_piece_endpoints};
pub use history::{BottomRecord, History};
pub use run::{SimulationOutput, run, simulate};
pub use state::{BreakEvent, Phase, PhaseTag, RodState, SimulationState, Termination, TopPiece};
pub use tick::{check_break, split_rod, stress_proxy, tick};
