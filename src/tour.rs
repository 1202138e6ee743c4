//! Guided look-around tour played once before first-person control.
//!
//! The camera stands at a fixed point and eases its gaze to each interactive
//! prop in panel order, pauses, then settles on the canonical north
//! orientation (yaw 0, pitch 0) and hands off to first person. The sequence
//! is an explicit phase machine sampled every frame — no timers exist, so
//! leaving the mode cannot strand a stale callback.

use bevy::prelude::*;

use crate::controls::Player;
use crate::math;
use crate::modes::{ModeMachine, ViewMode};
use crate::room;

/// Per-plugin configuration for the tour sequence.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TourConfig {
    /// Fixed camera position for the whole tour (look-only, no translation).
    pub camera_position: Vec3,
    /// Initial gaze point, re-normalized through YXZ so the very first frame
    /// does not start with an inverted pitch.
    pub initial_look_at: Vec3,
    /// Gaze targets in panel order: picture frame, board, PC, trophy.
    pub look_targets: [Vec3; 4],
    /// Pause before the first target (seconds).
    pub lead_in: f32,
    /// Duration of each eased look (seconds).
    pub step_duration: f32,
    /// Dwell on each target (seconds).
    pub step_pause: f32,
    /// Pause before the final reorientation (seconds).
    pub final_pause: f32,
    /// Duration of the settle to north (seconds).
    pub exit_duration: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            camera_position: room::TOUR_CAMERA_POSITION,
            initial_look_at: room::TOUR_INITIAL_LOOK_AT,
            look_targets: [
                room::PICTURE_FRAME_POSITION,
                room::BOARD_POSITION,
                room::PC_POSITION,
                room::TROPHY_POSITION,
            ],
            lead_in: 1.0,
            step_duration: 1.5,
            step_pause: 1.0,
            final_pause: 0.5,
            exit_duration: 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TourPhase {
    LeadIn,
    Animate(usize),
    Hold(usize),
    FinalPause,
    LookNorth,
    Done,
}

/// What the sequence wants this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TourFrame {
    /// Hold the current orientation.
    Wait,
    /// Write this gaze onto the camera.
    Look {
        /// Yaw to apply.
        yaw: f32,
        /// Pitch to apply.
        pitch: f32,
    },
    /// Sequence complete; hand off to first person.
    Finished,
}

/// Phase machine driving the tour. Pure: the ECS system only forwards
/// elapsed time in and camera writes out.
#[derive(Resource)]
pub struct TourSequence {
    phase: TourPhase,
    timer: f32,
    from_yaw: f32,
    from_pitch: f32,
    yaw_delta: f32,
    pitch_delta: f32,
}

impl TourSequence {
    /// Sequence at its start, gaze on the configured initial point.
    pub fn new(cfg: &TourConfig) -> Self {
        let (yaw, pitch) = math::look_angles(cfg.camera_position, cfg.initial_look_at);
        Self {
            phase: TourPhase::LeadIn,
            timer: 0.0,
            from_yaw: yaw,
            from_pitch: pitch,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
        }
    }

    /// Starting yaw/pitch for the fixed camera (applied on mode entry).
    pub fn start_angles(&self) -> (f32, f32) {
        (self.from_yaw, self.from_pitch)
    }

    /// `true` once the hand-off frame has been emitted.
    pub fn done(&self) -> bool {
        self.phase == TourPhase::Done
    }

    fn begin_segment(&mut self, to_yaw: f32, to_pitch: f32) {
        // The previous segment always ends exactly on its target, so the
        // stored "from" angles are the current gaze.
        self.from_yaw += self.yaw_delta;
        self.from_pitch += self.pitch_delta;
        self.yaw_delta = math::shortest_angle_delta(self.from_yaw, to_yaw);
        self.pitch_delta = to_pitch - self.from_pitch;
        self.timer = 0.0;
    }

    fn segment_frame(&self, t: f32) -> TourFrame {
        let k = math::ease_in_out_cubic(t.min(1.0));
        TourFrame::Look {
            yaw: self.from_yaw + self.yaw_delta * k,
            pitch: self.from_pitch + self.pitch_delta * k,
        }
    }

    /// Advances by `dt` and returns the camera write for this frame.
    pub fn advance(&mut self, dt: f32, cfg: &TourConfig) -> TourFrame {
        self.timer += dt;
        match self.phase {
            TourPhase::LeadIn => {
                if self.timer >= cfg.lead_in {
                    let (yaw, pitch) =
                        math::look_angles(cfg.camera_position, cfg.look_targets[0]);
                    self.begin_segment(yaw, pitch);
                    self.phase = TourPhase::Animate(0);
                }
                TourFrame::Wait
            }
            TourPhase::Animate(step) => {
                let t = self.timer / cfg.step_duration;
                let frame = self.segment_frame(t);
                if t >= 1.0 {
                    self.phase = TourPhase::Hold(step);
                    self.timer = 0.0;
                }
                frame
            }
            TourPhase::Hold(step) => {
                if self.timer >= cfg.step_pause {
                    if step + 1 < cfg.look_targets.len() {
                        let (yaw, pitch) =
                            math::look_angles(cfg.camera_position, cfg.look_targets[step + 1]);
                        self.begin_segment(yaw, pitch);
                        self.phase = TourPhase::Animate(step + 1);
                    } else {
                        self.phase = TourPhase::FinalPause;
                        self.timer = 0.0;
                    }
                }
                TourFrame::Wait
            }
            TourPhase::FinalPause => {
                if self.timer >= cfg.final_pause {
                    self.begin_segment(0.0, 0.0);
                    self.phase = TourPhase::LookNorth;
                }
                TourFrame::Wait
            }
            TourPhase::LookNorth => {
                let t = self.timer / cfg.exit_duration;
                let frame = self.segment_frame(t);
                if t >= 1.0 {
                    self.phase = TourPhase::Done;
                    return TourFrame::Finished;
                }
                frame
            }
            TourPhase::Done => TourFrame::Finished,
        }
    }
}

/// Scripted tour sequencer plugin.
pub struct TourPlugin(pub TourConfig);

impl Plugin for TourPlugin {
    fn build(&self, app: &mut App) {
        let sequence = TourSequence::new(&self.0);
        app.register_type::<TourConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(sequence)
            .add_systems(OnEnter(ViewMode::Tour), begin_tour)
            .add_systems(Update, run_tour.run_if(in_state(ViewMode::Tour)));
    }
}

/// Snaps the camera to the tour's fixed position and initial gaze.
fn begin_tour(
    cfg: Res<TourConfig>,
    mut sequence: ResMut<TourSequence>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    *sequence = TourSequence::new(&cfg);
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    let (yaw, pitch) = sequence.start_angles();
    transform.translation = cfg.camera_position;
    transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
}

/// Samples the phase machine and writes the gaze; on the hand-off frame the
/// machine transitions `Tour -> Fps` and marks the tour as played.
fn run_tour(
    time: Res<Time>,
    cfg: Res<TourConfig>,
    mut sequence: ResMut<TourSequence>,
    mut machine: ResMut<ModeMachine>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    match sequence.advance(time.delta_secs(), &cfg) {
        TourFrame::Wait => {}
        TourFrame::Look { yaw, pitch } => {
            transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
        }
        TourFrame::Finished => {
            if machine.mode() == ViewMode::Tour {
                info!("tour complete, handing off to first person");
                machine.end_tour();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles_to(cfg: &TourConfig, target: Vec3) -> (f32, f32) {
        math::look_angles(cfg.camera_position, target)
    }

    fn close(a: f32, b: f32) -> bool {
        math::shortest_angle_delta(a, b).abs() < 1e-3
    }

    #[test]
    fn visits_every_target_in_order_then_settles_north() {
        let cfg = TourConfig::default();
        let mut seq = TourSequence::new(&cfg);
        let dt = 1.0 / 60.0;

        let mut looks: Vec<(f32, f32)> = Vec::new();
        let mut finished = false;
        for _ in 0..10_000 {
            match seq.advance(dt, &cfg) {
                TourFrame::Look { yaw, pitch } => looks.push((yaw, pitch)),
                TourFrame::Wait => {}
                TourFrame::Finished => {
                    finished = true;
                    break;
                }
            }
        }
        assert!(finished, "tour never completed");

        // Each target's gaze must appear, in order.
        let mut cursor = 0;
        for target in cfg.look_targets {
            let (ty, tp) = angles_to(&cfg, target);
            let pos = looks[cursor..]
                .iter()
                .position(|(y, p)| close(*y, ty) && close(*p, tp));
            assert!(pos.is_some(), "target {target:?} never reached in order");
            cursor += pos.unwrap();
        }

        // The final gaze is canonical north.
        let (last_yaw, last_pitch) = *looks.last().unwrap();
        assert!(close(last_yaw, 0.0), "final yaw {last_yaw}");
        assert!(last_pitch.abs() < 1e-3, "final pitch {last_pitch}");
        assert!(seq.done());
    }

    #[test]
    fn lead_in_emits_no_camera_writes() {
        let cfg = TourConfig::default();
        let mut seq = TourSequence::new(&cfg);
        // Just under the lead-in: still waiting.
        assert_eq!(seq.advance(cfg.lead_in - 0.01, &cfg), TourFrame::Wait);
    }

    #[test]
    fn start_angles_match_initial_look_at() {
        let cfg = TourConfig::default();
        let seq = TourSequence::new(&cfg);
        let (yaw, pitch) = seq.start_angles();
        let (ey, ep) = math::look_angles(cfg.camera_position, cfg.initial_look_at);
        assert!(close(yaw, ey) && close(pitch, ep));
    }

    #[test]
    fn finished_is_sticky() {
        let cfg = TourConfig::default();
        let mut seq = TourSequence::new(&cfg);
        for _ in 0..10_000 {
            if seq.advance(0.05, &cfg) == TourFrame::Finished {
                break;
            }
        }
        assert!(seq.done());
        assert_eq!(seq.advance(0.05, &cfg), TourFrame::Finished);
    }
}
