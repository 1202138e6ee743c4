use bevy::prelude::*;

/// Marker component for the player camera entity.
#[derive(Component, Reflect)]
pub struct Player;

/// Accumulated walk velocity, damped every tick after collision resolution.
#[derive(Component, Default, Reflect)]
pub struct WalkVelocity(pub Vec3);

/// Which input adapter feeds [`FrameInput`], re-evaluated on resize and on
/// the first touch contact.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum InputProfile {
    /// Pointer-lock mouse look + WASD/arrow keys.
    #[default]
    Desktop,
    /// Virtual joystick for movement, single-finger drag for look.
    Touch,
}

/// The abstract per-frame input both adapters write and the walk system
/// reads: a movement axis pair and a look delta in pixels.
#[derive(Resource, Default, Debug, Reflect)]
pub struct FrameInput {
    /// `x` strafe, `y` forward, each in `[-1, 1]`.
    pub move_axis: Vec2,
    /// Summed pointer/drag delta for this frame.
    pub look_delta: Vec2,
}

/// Set to `true` on frames where the cursor was warped back to center, so
/// the desktop adapter can discard the synthetic mouse-motion delta.
#[derive(Resource, Default)]
pub struct CursorRecentered(pub bool);

/// Tracking state for the touch profile's virtual joystick.
#[derive(Resource, Default)]
pub struct JoystickState {
    /// Touch id currently captured by the joystick, if any.
    pub touch_id: Option<u64>,
    /// Current axis value; reset to zero when the touch lifts.
    pub axis: Vec2,
}
