//! Eased camera transitions between explicit poses.
//!
//! Entering split mode (and navigating between its panels) flies the camera
//! to the prop's configured viewpoint. Instead of tween callbacks, an
//! in-flight transition is an explicit record sampled every frame by
//! [`advance`]; cancellation bumps a generation counter, so a transition
//! whose owning mode has been exited can never write to the camera again.
//!
//! While a flight is active the walk controller is inert (it only runs in
//! `Fps`, flights only in `Split`), so exactly one writer touches the camera
//! pose per frame.

use bevy::prelude::*;

use crate::controls::Player;
use crate::math;
use crate::modes::ViewMode;

/// Camera pose as position plus YXZ yaw/pitch (no roll).
///
/// The fixed rotation order is what keeps look-at conversions stable across
/// mode transitions; every camera write in the app goes through this type.
#[derive(Clone, Copy, Debug, Reflect)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Rotation around Y, applied first.
    pub yaw: f32,
    /// Rotation around local X, clamped to `[-PI/2, PI/2]`.
    pub pitch: f32,
}

impl CameraPose {
    /// Reads a pose back from a transform, re-deriving yaw/pitch in the same
    /// fixed YXZ order.
    pub fn from_transform(transform: &Transform) -> Self {
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        Self {
            position: transform.translation,
            yaw,
            pitch,
        }
    }

    /// Writes the pose onto a transform.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.position;
        transform.rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
    }
}

/// A transition goal: stand at `position`, look toward `look_at`.
#[derive(Clone, Copy, Debug, Reflect)]
pub struct CameraTarget {
    /// Where the camera ends up.
    pub position: Vec3,
    /// Point the camera faces on arrival.
    pub look_at: Vec3,
}

impl CameraTarget {
    /// Resolves the goal to a concrete pose via the yaw/pitch derivation.
    pub fn pose(&self) -> CameraPose {
        let (yaw, pitch) = math::look_angles(self.position, self.look_at);
        CameraPose {
            position: self.position,
            yaw,
            pitch,
        }
    }
}

/// One in-flight transition.
#[derive(Clone, Copy, Debug)]
struct Flight {
    start: CameraPose,
    end: CameraPose,
    /// Shortest signed yaw travel; avoids unwinding accumulated look turns.
    yaw_delta: f32,
    elapsed: f32,
    duration: f32,
    generation: u64,
}

/// Drives at most one camera transition at a time.
#[derive(Resource, Default)]
pub struct TransitionDirector {
    flight: Option<Flight>,
    generation: u64,
}

impl TransitionDirector {
    /// Begins a flight from `from` to `target`, replacing any current flight.
    pub fn start(&mut self, from: CameraPose, target: CameraTarget, duration: f32) {
        self.generation += 1;
        let end = target.pose();
        self.flight = Some(Flight {
            start: from,
            end,
            yaw_delta: math::shortest_angle_delta(from.yaw, end.yaw),
            elapsed: 0.0,
            duration: duration.max(1e-6),
            generation: self.generation,
        });
    }

    /// Cancels any in-flight transition. Also invalidates the generation, so
    /// a stale flight record can never produce another pose.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.flight = None;
    }

    /// `true` while a flight is in progress.
    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    /// Advances by `dt` and returns the pose to write this frame, or `None`
    /// when idle. The final sample lands exactly on the target pose.
    pub fn sample(&mut self, dt: f32) -> Option<CameraPose> {
        let flight = self.flight.as_mut()?;
        if flight.generation != self.generation {
            // Stale record from before a cancel; drop it without a write.
            self.flight = None;
            return None;
        }

        flight.elapsed += dt;
        let t = (flight.elapsed / flight.duration).min(1.0);
        let k = math::ease_in_out_cubic(t);
        let pose = CameraPose {
            position: flight.start.position.lerp(flight.end.position, k),
            yaw: flight.start.yaw + flight.yaw_delta * k,
            pitch: flight.start.pitch + (flight.end.pitch - flight.start.pitch) * k,
        };
        if t >= 1.0 {
            self.flight = None;
        }
        Some(pose)
    }
}

/// Transition timing configuration.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TransitionConfig {
    /// Flight duration when a prop interaction enters split mode (seconds).
    pub enter_duration: f32,
    /// Flight duration when navigating between split panels (seconds).
    pub navigate_duration: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter_duration: 1.0,
            navigate_duration: 0.8,
        }
    }
}

/// Camera transition director plugin.
pub struct TransitionPlugin(pub TransitionConfig);

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TransitionConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<TransitionDirector>()
            .add_systems(Update, advance.run_if(in_state(ViewMode::Split)))
            .add_systems(OnExit(ViewMode::Split), cancel_on_exit);
    }
}

/// Samples the active flight and writes the camera pose.
fn advance(
    time: Res<Time>,
    mut director: ResMut<TransitionDirector>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    if !director.is_active() {
        return;
    }
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    if let Some(pose) = director.sample(time.delta_secs()) {
        pose.apply_to(&mut transform);
    }
}

/// Leaving split mode cancels any flight synchronously; no further camera
/// writes may come from a transition owned by the exited mode.
fn cancel_on_exit(mut director: ResMut<TransitionDirector>) {
    director.cancel();
}
