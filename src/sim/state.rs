//! Simulation state and core types
//!
//! Everything that changes from one step to the next lives in
//! [`SimulationState`]. The break is modelled as a phase change, so the
//! pieces only exist once the chimney has snapped.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, rod_endpoints, top_piece_endpoints};
use crate::settings::SimConfig;

/// Which part of the run produced a bottom-piece record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseTag {
    /// Whole chimney, before the break
    PreBreak,
    /// Stub left standing on the pivot, after the break
    PostBreak,
}

/// A rod rotating about the ground pivot at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodState {
    /// Radians from vertical
    pub angle: f64,
    pub angular_velocity: f64,
    pub length: f64,
}

impl RodState {
    pub fn new(length: f64, angle: f64) -> Self {
        Self {
            angle,
            angular_velocity: 0.0,
            length,
        }
    }

    /// Gravitational angular acceleration of a uniform rod pivoted at one end
    #[inline]
    pub fn angular_acceleration(&self, gravity: f64) -> f64 {
        (3.0 * gravity / (2.0 * self.length)) * self.angle.sin()
    }

    /// Semi-implicit Euler: velocity first, then angle with the new velocity
    pub fn step(&mut self, gravity: f64, dt: f64) {
        let alpha = self.angular_acceleration(gravity);
        self.angular_velocity += alpha * dt;
        self.angle += self.angular_velocity * dt;
    }

    pub fn segment(&self) -> Segment {
        rod_endpoints(self.length, self.angle, DVec2::ZERO)
    }
}

/// The upper piece after the break: a spinning projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopPiece {
    pub length: f64,
    pub center: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    /// Spin rate, fixed at the break (no torque acts on the piece)
    pub angular_velocity: f64,
}

impl TopPiece {
    /// Ballistic update under gravity with constant spin
    pub fn step(&mut self, gravity: f64, dt: f64) {
        self.velocity.y -= gravity * dt;
        self.center += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }

    pub fn segment(&self) -> Segment {
        top_piece_endpoints(self.center, self.angle, self.length)
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// One rigid chimney rotating about its base
    PreBreak { rod: RodState },
    /// Stub still on the pivot, top piece in flight
    PostBreak { bottom: RodState, top: TopPiece },
}

impl Phase {
    #[inline]
    pub fn is_broken(&self) -> bool {
        matches!(self, Phase::PostBreak { .. })
    }

    pub fn tag(&self) -> PhaseTag {
        match self {
            Phase::PreBreak { .. } => PhaseTag::PreBreak,
            Phase::PostBreak { .. } => PhaseTag::PostBreak,
        }
    }
}

/// Snapshot of the break, kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvent {
    /// Simulated time at which the proxy crossed the threshold
    pub time: f64,
    /// Step index at which the break happened
    pub step: u64,
    /// Distance from the base to the break (equal to the stub length)
    pub break_point: f64,
    pub bottom_length: f64,
    pub top_length: f64,
    /// Chimney angle and angular velocity at the break
    pub angle: f64,
    pub angular_velocity: f64,
    /// Stress proxy value that triggered the break
    pub stress: f64,
}

impl fmt::Display for BreakEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Break at t={:.2}s, {:.1} m from base",
            self.time, self.break_point
        )
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Top piece reached the ground
    GroundContact,
    /// Ran out of simulated time
    MaxTime,
}

/// Complete mutable state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Simulation step counter
    pub steps: u64,
    /// Simulated seconds (`steps * dt`)
    pub time: f64,
    pub phase: Phase,
    /// Length of the intact chimney
    pub original_length: f64,
    pub break_event: Option<BreakEvent>,
    pub termination: Option<Termination>,
}

impl SimulationState {
    /// Upright chimney at the configured initial lean, at rest
    pub fn new(config: &SimConfig) -> Self {
        Self {
            steps: 0,
            time: 0.0,
            phase: Phase::PreBreak {
                rod: RodState::new(config.length, config.initial_angle),
            },
            original_length: config.length,
            break_event: None,
            termination: None,
        }
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.phase.is_broken()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }
}
