//! First-person movement and look controller.
//!
//! Active only in [`ViewMode::Fps`]. Raw input is adapted into one
//! [`FrameInput`] record (movement axes + look delta) by whichever profile is
//! active — pointer-lock mouse + WASD on desktop, a virtual joystick +
//! drag-look on touch — and a single walk system consumes it: integrate,
//! resolve collisions with wall sliding, damp, clamp.

mod entities;
mod systems;

pub use entities::{FrameInput, InputProfile, Player};

use bevy::prelude::*;

use crate::modes::ViewMode;

/// Per-plugin configuration for the walk controller.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ControlsConfig {
    /// Look sensitivity (radians per pixel of pointer/drag delta).
    pub look_sensitivity: f32,
    /// Margin from vertical to prevent camera flip (radians).
    pub pitch_margin: f32,
    /// Acceleration applied per second of held input (world units).
    pub move_speed: f32,
    /// Exponential velocity damping factor (per second).
    pub damping: f32,
    /// Player body radius used for collision queries.
    pub collision_radius: f32,
    /// Camera height above the floor; Y is pinned here every tick.
    pub eye_height: f32,
    /// Walkable half-extent of the world on X and Z.
    pub bounds: Vec2,
    /// Pixel margin from window edge that triggers cursor recentering.
    pub edge_margin: f32,
    /// Virtual joystick radius in logical pixels (touch profile).
    pub joystick_radius: f32,
    /// Joystick center inset from the bottom-left corner, in logical pixels.
    pub joystick_margin: f32,
    /// Viewport size at or below which the touch profile is selected.
    pub small_viewport: Vec2,
    /// Where the player camera spawns.
    pub spawn_position: Vec3,
    /// Initial look-at point, re-normalized through YXZ at spawn.
    pub spawn_look_at: Vec3,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.002,
            pitch_margin: 0.01,
            move_speed: 0.5,
            damping: 10.0,
            collision_radius: 0.3,
            eye_height: 1.7,
            bounds: Vec2::new(40.0, 40.0),
            edge_margin: 100.0,
            joystick_radius: 56.0,
            joystick_margin: 24.0,
            small_viewport: Vec2::new(1024.0, 768.0),
            spawn_position: crate::room::TOUR_CAMERA_POSITION,
            spawn_look_at: crate::room::TOUR_INITIAL_LOOK_AT,
        }
    }
}

/// Normalized world-space walk direction for a movement axis input.
///
/// `axis.x` strafes along `right`, `axis.y` walks along `forward`; both base
/// vectors are expected to be flattened to the XZ plane already.
pub fn desired_direction(forward: Vec3, right: Vec3, axis: Vec2) -> Vec3 {
    (forward * axis.y + right * axis.x).normalize_or_zero()
}

/// Maps a touch position to a joystick axis, clamped to the unit disk.
///
/// Screen Y grows downward, so it is negated into "forward" here.
pub fn joystick_axis(touch: Vec2, center: Vec2, radius: f32) -> Vec2 {
    let mut disp = (touch - center) / radius.max(1.0);
    if disp.length_squared() > 1.0 {
        disp = disp.normalize();
    }
    Vec2::new(disp.x, -disp.y)
}

/// First-person walk controller with collision sliding and dual input
/// profiles.
pub struct ControlsPlugin(pub ControlsConfig);

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>()
            .register_type::<ControlsConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<entities::FrameInput>()
            .init_resource::<entities::InputProfile>()
            .init_resource::<entities::CursorRecentered>()
            .init_resource::<entities::JoystickState>()
            .add_systems(Startup, systems::spawn_player)
            .add_systems(Update, (systems::detect_profile, systems::recenter_cursor))
            .add_systems(
                Update,
                (
                    (
                        systems::gather_desktop
                            .run_if(resource_equals(entities::InputProfile::Desktop)),
                        systems::gather_touch
                            .run_if(resource_equals(entities::InputProfile::Touch)),
                    ),
                    systems::walk_and_look,
                )
                    .chain()
                    .after(systems::recenter_cursor)
                    .run_if(in_state(ViewMode::Fps)),
            )
            .add_systems(OnExit(ViewMode::Fps), systems::reset_input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── desired_direction ───────────────────────────────────────────

    #[test]
    fn forward_axis_walks_forward() {
        let d = desired_direction(Vec3::NEG_Z, Vec3::X, Vec2::new(0.0, 1.0));
        assert!((d - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let d = desired_direction(Vec3::NEG_Z, Vec3::X, Vec2::new(1.0, 1.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.z < 0.0);
    }

    #[test]
    fn zero_axis_is_zero_direction() {
        assert_eq!(
            desired_direction(Vec3::NEG_Z, Vec3::X, Vec2::ZERO),
            Vec3::ZERO
        );
    }

    // ── joystick_axis ───────────────────────────────────────────────

    #[test]
    fn joystick_rest_is_zero() {
        let c = Vec2::new(80.0, 600.0);
        assert_eq!(joystick_axis(c, c, 56.0), Vec2::ZERO);
    }

    #[test]
    fn joystick_up_is_forward() {
        let c = Vec2::new(80.0, 600.0);
        // Touch above the center: screen Y decreases, forward increases.
        let axis = joystick_axis(c - Vec2::new(0.0, 28.0), c, 56.0);
        assert!((axis.y - 0.5).abs() < 1e-6);
        assert!(axis.x.abs() < 1e-6);
    }

    #[test]
    fn joystick_displacement_clamps_to_unit_disk() {
        let c = Vec2::new(80.0, 600.0);
        let axis = joystick_axis(c + Vec2::new(500.0, -500.0), c, 56.0);
        assert!((axis.length() - 1.0).abs() < 1e-5);
    }
}
