//! Fixed timestep simulation tick
//!
//! One call advances the run by one step: break check, then the integrator
//! for the current phase, then the ground check for the flying piece.

use super::clip::clip_to_ground;
use super::history::History;
use super::state::{BreakEvent, Phase, PhaseTag, RodState, SimulationState, Termination, TopPiece};
use crate::consts::*;
use crate::settings::SimConfig;
use crate::{direction_from_vertical, tangent_from_vertical};

/// Bending stress stand-in used to decide when the chimney snaps
#[inline]
pub fn stress_proxy(angle: f64, length: f64) -> f64 {
    (angle.sin() * (length - length / 3.0)).abs() * STRESS_SCALE
}

/// Split an intact chimney at the break point.
///
/// The stub keeps the rod's angle and angular velocity. The top piece starts
/// where its center was on the rigid rod, moving with that point's tangential
/// velocity, and keeps the rod's spin.
pub fn split_rod(rod: &RodState) -> (RodState, TopPiece) {
    // Derive the stub from the top piece so the two lengths sum back to the
    // full length exactly (the second subtraction is exact)
    let top_length = rod.length - rod.length * BREAK_POINT_RATIO;
    let break_point = rod.length - top_length;
    let center_dist = break_point + top_length / 2.0;

    let bottom = RodState {
        angle: rod.angle,
        angular_velocity: rod.angular_velocity,
        length: break_point,
    };
    let top = TopPiece {
        length: top_length,
        center: direction_from_vertical(rod.angle) * center_dist,
        velocity: tangent_from_vertical(rod.angle) * (rod.angular_velocity * center_dist),
        angle: rod.angle,
        angular_velocity: rod.angular_velocity,
    };
    (bottom, top)
}

/// Break the chimney if the stress proxy exceeds `break_strength`.
///
/// Returns the event when the break happens on this call. Once broken this
/// is a no-op.
pub fn check_break(state: &mut SimulationState, config: &SimConfig) -> Option<BreakEvent> {
    let Phase::PreBreak { rod } = state.phase else {
        return None;
    };

    let stress = stress_proxy(rod.angle, state.original_length);
    if stress <= config.break_strength {
        return None;
    }

    let (bottom, top) = split_rod(&rod);
    let event = BreakEvent {
        time: state.time,
        step: state.steps,
        break_point: bottom.length,
        bottom_length: bottom.length,
        top_length: top.length,
        angle: rod.angle,
        angular_velocity: rod.angular_velocity,
        stress,
    };

    state.phase = Phase::PostBreak { bottom, top };
    state.break_event = Some(event);
    log::info!("{}", event);
    log::debug!(
        "Top piece launched at ({:.3}, {:.3}) with velocity ({:.3}, {:.3}), spin {:.4} rad/s",
        top.center.x,
        top.center.y,
        top.velocity.x,
        top.velocity.y,
        top.angular_velocity
    );

    Some(event)
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState, config: &SimConfig, history: &mut History) {
    if state.is_finished() {
        return;
    }

    let dt = config.dt;
    let g = config.gravity;

    check_break(state, config);

    match &mut state.phase {
        Phase::PreBreak { rod } => {
            rod.step(g, dt);
            history.push_bottom(rod.segment(), PhaseTag::PreBreak);
        }
        Phase::PostBreak { bottom, top } => {
            bottom.step(g, dt);
            history.push_bottom(bottom.segment(), PhaseTag::PostBreak);

            top.step(g, dt);
            let seg = top.segment();

            // Stop as soon as either end reaches the ground
            if seg.touches_ground() {
                match clip_to_ground(seg) {
                    Some(clipped) => history.push_top(clipped),
                    None => log::debug!("Top piece overshot the ground, final frame dropped"),
                }
                state.termination = Some(Termination::GroundContact);
            } else {
                history.push_top(seg);
            }
        }
    }

    state.steps += 1;
    state.time = state.steps as f64 * dt;

    if state.is_finished() {
        log::debug!("Top piece hit the ground at t={:.2}s", state.time);
    }
    log::trace!("step {} t={:.3} phase={:?}", state.steps, state.time, state.phase.tag());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Segment;
    use glam::DVec2;
    use proptest::prelude::*;

    fn config_with_strength(break_strength: f64) -> SimConfig {
        SimConfig {
            break_strength,
            ..Default::default()
        }
    }

    #[test]
    fn test_stress_proxy() {
        // |sin(θ) * (L - L/3)| * 1000
        let expected = (0.5_f64.sin() * (50.0 - 50.0 / 3.0)).abs() * 1000.0;
        assert!((stress_proxy(0.5, 50.0) - expected).abs() < 1e-9);
        assert!((stress_proxy(-0.5, 50.0) - expected).abs() < 1e-9);
        assert_eq!(stress_proxy(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_split_lengths() {
        let rod = RodState {
            angle: 0.7,
            angular_velocity: 1.1,
            length: 50.0,
        };
        let (bottom, top) = split_rod(&rod);
        assert!((bottom.length - 16.5).abs() < 1e-12);
        assert!((top.length - 33.5).abs() < 1e-12);
        assert_eq!(bottom.length + top.length, 50.0);
    }

    #[test]
    fn test_split_sum_exact_for_awkward_length() {
        // Rounding L * 0.33 and L - that independently drifts by an ulp here
        let length = 997_534.806_822_746_6;
        let (bottom, top) = split_rod(&RodState::new(length, 0.3));
        assert_eq!(bottom.length + top.length, length);
        assert!((bottom.length - length * 0.33).abs() <= length * 1e-15);
    }

    #[test]
    fn test_split_kinematics() {
        let rod = RodState {
            angle: 0.7,
            angular_velocity: 1.1,
            length: 50.0,
        };
        let (bottom, top) = split_rod(&rod);
        let center_dist = 16.5 + 33.5 / 2.0;

        assert_eq!(bottom.angle, rod.angle);
        assert_eq!(bottom.angular_velocity, rod.angular_velocity);
        assert_eq!(top.angle, rod.angle);
        assert_eq!(top.angular_velocity, rod.angular_velocity);

        assert!((top.center.x - center_dist * 0.7_f64.sin()).abs() < 1e-12);
        assert!((top.center.y - center_dist * 0.7_f64.cos()).abs() < 1e-12);
        assert!((top.velocity.x - 1.1 * center_dist * 0.7_f64.cos()).abs() < 1e-12);
        assert!((top.velocity.y + 1.1 * center_dist * 0.7_f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_top_piece_continues_rigid_rod() {
        // At the break the top piece sits exactly on the upper part of the rod
        let rod = RodState {
            angle: 0.4,
            angular_velocity: 0.8,
            length: 50.0,
        };
        let (bottom, top) = split_rod(&rod);
        let stub_tip = bottom.segment().end();
        let top_seg = top.segment();
        assert!((top_seg.start() - stub_tip).length() < 1e-9);
        assert!((top_seg.end() - rod.segment().end()).length() < 1e-9);
    }

    #[test]
    fn test_no_break_below_threshold() {
        let config = config_with_strength(20_000.0);
        let mut state = SimulationState::new(&config);
        // 5 degrees gives a proxy of about 2905
        assert!(check_break(&mut state, &config).is_none());
        assert!(!state.is_broken());
    }

    #[test]
    fn test_break_is_one_shot() {
        let config = config_with_strength(0.0);
        let mut state = SimulationState::new(&config);

        let event = check_break(&mut state, &config).expect("should break");
        assert!(state.is_broken());
        assert!((event.break_point - 16.5).abs() < 1e-12);
        assert_eq!(event.time, 0.0);

        let phase = state.phase;
        for _ in 0..5 {
            assert!(check_break(&mut state, &config).is_none());
        }
        assert_eq!(state.phase, phase);
        assert_eq!(state.break_event, Some(event));
    }

    #[test]
    fn test_pre_break_tick_records_rod() {
        let config = SimConfig {
            initial_angle: 0.0873,
            ..Default::default()
        };
        let mut state = SimulationState::new(&config);
        let mut history = History::new();

        tick(&mut state, &config, &mut history);

        assert_eq!(state.steps, 1);
        assert!((state.time - 0.01).abs() < 1e-15);
        assert_eq!(history.bottom().len(), 1);
        assert!(history.top().is_empty());

        let record = history.bottom()[0];
        assert_eq!(record.phase, PhaseTag::PreBreak);
        let Phase::PreBreak { rod } = state.phase else {
            panic!("expected pre-break phase");
        };
        assert!((rod.angle - 0.087303).abs() < 1e-6);
        assert_eq!(record.segment, rod.segment());
    }

    #[test]
    fn test_post_break_tick_records_both() {
        let config = config_with_strength(0.0);
        let mut state = SimulationState::new(&config);
        let mut history = History::new();

        tick(&mut state, &config, &mut history);

        assert!(state.is_broken());
        assert_eq!(history.bottom().len(), 1);
        assert_eq!(history.bottom()[0].phase, PhaseTag::PostBreak);
        assert_eq!(history.top().len(), 1);
        assert!((history.bottom()[0].segment.length() - 16.5).abs() < 1e-9);
        assert!((history.top()[0].length() - 33.5).abs() < 1e-9);
    }

    #[test]
    fn test_ground_contact_clips_and_stops() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);
        // Top piece about to land: lower end just above the ground, falling
        state.phase = Phase::PostBreak {
            bottom: RodState {
                angle: 1.2,
                angular_velocity: 1.0,
                length: 16.5,
            },
            top: TopPiece {
                length: 10.0,
                center: DVec2::new(20.0, 5.001),
                velocity: DVec2::new(0.0, -1.0),
                angle: 0.0,
                angular_velocity: 0.0,
            },
        };
        let mut history = History::new();

        tick(&mut state, &config, &mut history);

        assert_eq!(state.termination, Some(Termination::GroundContact));
        // The landing step counts, so the reported time is past it
        assert_eq!(state.steps, 1);
        assert_eq!(state.time, config.dt);
        let last = *history.top().last().expect("clipped frame");
        assert!(last.y1 >= 0.0 && last.y2 >= 0.0);
        assert_eq!(last.y1, 0.0);

        // Further ticks do nothing
        let steps = state.steps;
        tick(&mut state, &config, &mut history);
        assert_eq!(state.steps, steps);
        assert_eq!(history.top().len(), 1);
        assert_eq!(history.bottom().len(), 1);
    }

    #[test]
    fn test_overshoot_drops_final_frame() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);
        // Lying flat just above the ground, moving fast enough to sink fully in one step
        state.phase = Phase::PostBreak {
            bottom: RodState::new(16.5, 0.5),
            top: TopPiece {
                length: 10.0,
                center: DVec2::new(20.0, 0.05),
                velocity: DVec2::new(0.0, -50.0),
                angle: std::f64::consts::FRAC_PI_2,
                angular_velocity: 0.0,
            },
        };
        let mut history = History::new();

        tick(&mut state, &config, &mut history);

        assert_eq!(state.termination, Some(Termination::GroundContact));
        assert!(history.top().is_empty());
    }

    #[test]
    fn test_unclipped_frame_when_airborne() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);
        let top = TopPiece {
            length: 10.0,
            center: DVec2::new(0.0, 30.0),
            velocity: DVec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
        };
        state.phase = Phase::PostBreak {
            bottom: RodState::new(16.5, 0.5),
            top,
        };
        let mut history = History::new();

        tick(&mut state, &config, &mut history);

        assert!(state.termination.is_none());
        let seg: Segment = history.top()[0];
        assert!(seg.min_y() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_split_sum_is_exact(length in 1e-3f64..1e6) {
            let (bottom, top) = split_rod(&RodState::new(length, 0.5));
            prop_assert_eq!(bottom.length + top.length, length);
            prop_assert!(bottom.length < top.length);
        }
    }
}
