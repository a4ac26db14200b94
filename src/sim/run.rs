//! Fixed timestep run loop
//!
//! Steps the state until the top piece lands or `max_time` is used up, then
//! hands the recorded frames to the caller.

use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use super::history::{BottomRecord, History};
use super::state::{BreakEvent, PhaseTag, SimulationState, Termination};
use super::tick::tick;
use crate::settings::{ConfigError, SimConfig};

/// Everything a run produces, ready for reporting or display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// One record per step, whole chimney then stub
    pub bottom: Vec<BottomRecord>,
    /// One record per post-break step; the last one is clipped on landing
    pub top: Vec<Segment>,
    pub break_event: Option<BreakEvent>,
    pub termination: Termination,
    /// Length of the intact chimney
    pub original_length: f64,
    /// Simulated time after the last step taken
    pub end_time: f64,
    pub steps: u64,
}

impl SimulationOutput {
    #[inline]
    pub fn broke(&self) -> bool {
        self.break_event.is_some()
    }

    pub fn landed(&self) -> bool {
        self.termination == Termination::GroundContact
    }

    /// Number of bottom records produced before the break
    pub fn pre_break_frames(&self) -> usize {
        self.bottom
            .iter()
            .take_while(|r| r.phase == PhaseTag::PreBreak)
            .count()
    }
}

/// Validate `config` and run it to completion
pub fn run(config: &SimConfig) -> Result<SimulationOutput, ConfigError> {
    config.validate()?;
    Ok(simulate(config))
}

/// Run a configuration that has already been validated
pub fn simulate(config: &SimConfig) -> SimulationOutput {
    let mut state = SimulationState::new(config);
    let mut history = History::with_expected_steps(config.expected_steps());

    log::debug!(
        "Starting run: L={} g={} strength={} theta0={:.4} dt={} max_time={}",
        config.length,
        config.gravity,
        config.break_strength,
        config.initial_angle,
        config.dt,
        config.max_time
    );

    while !state.is_finished() && state.time < config.max_time {
        tick(&mut state, config, &mut history);
    }

    let termination = state.termination.unwrap_or(Termination::MaxTime);
    if termination == Termination::MaxTime && state.break_event.is_none() {
        log::info!("No break before t={:.2}s", config.max_time);
    }

    let (bottom, top) = history.into_parts();
    SimulationOutput {
        bottom,
        top,
        break_event: state.break_event,
        termination,
        original_length: state.original_length,
        end_time: state.time,
        steps: state.steps,
    }
}
