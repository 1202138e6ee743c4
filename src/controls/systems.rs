use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{WindowFocused, WindowResized};

use super::ControlsConfig;
use super::entities::{CursorRecentered, FrameInput, InputProfile, JoystickState, Player, WalkVelocity};
use crate::collision::{self, CollisionRegistry};
use crate::math;
use crate::modes::PointerLock;

/// Spawns the player Camera3d at the room's entry viewpoint.
pub fn spawn_player(mut commands: Commands, cfg: Res<ControlsConfig>) {
    let (yaw, pitch) = math::look_angles(cfg.spawn_position, cfg.spawn_look_at);
    commands.spawn((
        Name::new("Player"),
        Camera3d::default(),
        Transform::from_translation(cfg.spawn_position)
            .with_rotation(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)),
        Player,
        WalkVelocity::default(),
    ));
}

/// Re-evaluates the input profile on resize; the first touch contact also
/// switches to the touch profile (native has no capability query for it).
pub fn detect_profile(
    mut resized: MessageReader<WindowResized>,
    touches: Res<Touches>,
    cfg: Res<ControlsConfig>,
    mut profile: ResMut<InputProfile>,
) {
    if touches.iter_just_pressed().next().is_some() && *profile != InputProfile::Touch {
        info!("touch contact seen, switching to touch profile");
        *profile = InputProfile::Touch;
        return;
    }
    for ev in resized.read() {
        let small = ev.width <= cfg.small_viewport.x || ev.height <= cfg.small_viewport.y;
        let wanted = if small {
            InputProfile::Touch
        } else {
            InputProfile::Desktop
        };
        if wanted != *profile {
            info!("viewport {}x{}, switching to {wanted:?} profile", ev.width, ev.height);
            *profile = wanted;
        }
    }
}

/// Desktop adapter: pointer-lock mouse deltas + WASD/arrow movement flags.
///
/// Look input is only taken while capture is actually engaged; losing the
/// window (capture dropped) silently stops look updates without leaving the
/// mode, matching the recoverable-lock-loss rule.
pub fn gather_desktop(
    mut input: ResMut<FrameInput>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    lock: Res<PointerLock>,
    recentered: Res<CursorRecentered>,
) {
    input.look_delta = Vec2::ZERO;
    if lock.engaged && !recentered.0 {
        for ev in mouse_motion.read() {
            input.look_delta += ev.delta;
        }
    } else {
        // Drain so a warp or an unfocused stretch cannot bank a huge delta.
        mouse_motion.read().count();
    }

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    input.move_axis = axis;
}

/// Touch adapter: a bounded joystick anchored bottom-left feeds the movement
/// axes; any other finger drags the look with the same delta formula as the
/// mouse.
pub fn gather_touch(
    mut input: ResMut<FrameInput>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    cfg: Res<ControlsConfig>,
    mut joystick: ResMut<JoystickState>,
) {
    input.look_delta = Vec2::ZERO;
    let Ok(window) = windows.single() else {
        return;
    };
    let center = Vec2::new(
        cfg.joystick_margin + cfg.joystick_radius,
        window.height() - cfg.joystick_margin - cfg.joystick_radius,
    );

    // Track or drop the joystick's captured touch.
    if let Some(id) = joystick.touch_id {
        match touches.get_pressed(id) {
            Some(touch) => {
                joystick.axis = super::joystick_axis(touch.position(), center, cfg.joystick_radius);
            }
            None => {
                // Released: snap back to rest.
                joystick.touch_id = None;
                joystick.axis = Vec2::ZERO;
            }
        }
    }
    for touch in touches.iter_just_pressed() {
        if joystick.touch_id.is_none()
            && touch.position().distance(center) <= cfg.joystick_radius
        {
            joystick.touch_id = Some(touch.id());
            joystick.axis = super::joystick_axis(touch.position(), center, cfg.joystick_radius);
        }
    }

    // Every other finger is look drag.
    for touch in touches.iter() {
        if Some(touch.id()) != joystick.touch_id {
            input.look_delta += touch.delta();
        }
    }
    input.move_axis = joystick.axis;
}

/// Applies the frame's look delta and integrates movement.
///
/// Tick order is a correctness requirement: integrate into velocity, resolve
/// collisions with sliding, damp the velocity, then clamp Y to eye height
/// and X/Z to the world bounds. Damping after resolution keeps a blocked
/// velocity from re-failing the same collision check at full magnitude.
pub fn walk_and_look(
    time: Res<Time>,
    cfg: Res<ControlsConfig>,
    input: Res<FrameInput>,
    registry: Res<CollisionRegistry>,
    mut query: Query<(&mut Transform, &mut WalkVelocity), With<Player>>,
) {
    let Ok((mut transform, mut velocity)) = query.single_mut() else {
        return;
    };

    // Mouse/drag look, fixed YXZ order, pitch clamped.
    if input.look_delta != Vec2::ZERO {
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let new_yaw = yaw - input.look_delta.x * cfg.look_sensitivity;
        let pitch_delta = math::clamp_pitch(
            pitch,
            -input.look_delta.y * cfg.look_sensitivity,
            cfg.pitch_margin,
        );
        transform.rotation = Quat::from_euler(EulerRot::YXZ, new_yaw, pitch + pitch_delta, 0.0);
    }

    // Movement in the camera's flattened forward/right frame.
    let forward = transform.forward();
    let right = transform.right();
    let dir = super::desired_direction(
        math::flatten_xz(Vec3::new(forward.x, forward.y, forward.z)),
        math::flatten_xz(Vec3::new(right.x, right.y, right.z)),
        input.move_axis,
    );

    let dt = time.delta_secs();
    velocity.0 += dir * cfg.move_speed * dt;

    let mut pos = collision::slide_move(
        &registry,
        transform.translation,
        velocity.0,
        cfg.collision_radius,
    );

    velocity.0 *= (1.0 - cfg.damping * dt).max(0.0);

    pos.y = cfg.eye_height;
    pos.x = pos.x.clamp(-cfg.bounds.x, cfg.bounds.x);
    pos.z = pos.z.clamp(-cfg.bounds.y, cfg.bounds.y);
    transform.translation = pos;
}

/// Warps the cursor back to center when it drifts near a window edge or when
/// the window regains focus, flagging the frame so the synthetic delta is
/// discarded.
pub fn recenter_cursor(
    mut windows: Query<&mut Window>,
    mut focus_events: MessageReader<WindowFocused>,
    mut recentered: ResMut<CursorRecentered>,
    lock: Res<PointerLock>,
    cfg: Res<ControlsConfig>,
) {
    recentered.0 = false;
    let gained_focus = focus_events.read().any(|ev| ev.focused);
    if !lock.engaged {
        return;
    }

    for mut window in &mut windows {
        let w = window.width();
        let h = window.height();
        let center = Vec2::new(w / 2.0, h / 2.0);

        if gained_focus {
            window.set_cursor_position(Some(center));
            recentered.0 = true;
            continue;
        }

        if let Some(pos) = window.cursor_position()
            && (pos.x < cfg.edge_margin
                || pos.x > w - cfg.edge_margin
                || pos.y < cfg.edge_margin
                || pos.y > h - cfg.edge_margin)
        {
            window.set_cursor_position(Some(center));
            recentered.0 = true;
        }
    }
}

/// Clears ephemeral input on mode exit so nothing carries into the next
/// activation (joystick snaps to rest, movement axes drop to zero).
pub fn reset_input(
    mut input: ResMut<FrameInput>,
    mut joystick: ResMut<JoystickState>,
    mut query: Query<&mut WalkVelocity, With<Player>>,
) {
    *input = FrameInput::default();
    joystick.touch_id = None;
    joystick.axis = Vec2::ZERO;
    for mut velocity in &mut query {
        velocity.0 = Vec3::ZERO;
    }
}
