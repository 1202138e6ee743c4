//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::Vec3;

/// Yaw/pitch pair for a camera looking from `position` toward `look_at`.
///
/// Assumes a camera whose local forward is `-Z` with YXZ rotation order
/// (yaw around Y first, then pitch around local X, no roll):
/// `yaw = atan2(-dx, -dz)`, `pitch = asin(dy)`.
///
/// Returns `(0.0, 0.0)` when the two points coincide.
pub fn look_angles(position: Vec3, look_at: Vec3) -> (f32, f32) {
    let dir = (look_at - position).normalize_or_zero();
    if dir == Vec3::ZERO {
        return (0.0, 0.0);
    }
    let yaw = (-dir.x).atan2(-dir.z);
    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}

/// Unit forward vector for a YXZ yaw/pitch camera; inverse of [`look_angles`].
pub fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Cubic ease-in/ease-out curve: slow start, fast middle, slow end.
///
/// Used for camera transitions and the tour's look animations.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-PI, PI]`.
///
/// Interpolating yaw through this delta avoids whole extra turns when the
/// accumulated look angle has wandered far from the principal range.
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut d = (to - from) % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

/// Clamps a pitch angle so the camera cannot flip past vertical.
///
/// `current` is the existing pitch in radians (from `Quat::to_euler`).
/// `delta` is the desired change. The result is clamped to
/// `(-PI/2 + margin, PI/2 - margin)` and the *effective* delta is returned
/// (i.e. how much to actually rotate).
pub fn clamp_pitch(current: f32, delta: f32, margin: f32) -> f32 {
    let limit = std::f32::consts::FRAC_PI_2 - margin;
    let clamped = (current + delta).clamp(-limit, limit);
    clamped - current
}

/// Projects a direction onto the XZ plane and renormalizes.
///
/// Movement input is applied in the camera's flattened forward/right frame so
/// looking up or down never changes walk speed. Returns `Vec3::ZERO` for a
/// (near-)vertical input direction.
pub fn flatten_xz(dir: Vec3) -> Vec3 {
    Vec3::new(dir.x, 0.0, dir.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    // ── look_angles / forward_from_angles ───────────────────────────

    #[test]
    fn north_is_zero_yaw_zero_pitch() {
        // Camera forward is -Z, so looking down -Z is the canonical "north".
        let (yaw, pitch) = look_angles(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
        assert!(yaw.abs() < 1e-6);
        assert!(pitch.abs() < 1e-6);
    }

    #[test]
    fn east_is_negative_quarter_yaw() {
        let (yaw, pitch) = look_angles(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
        assert!((yaw - (-FRAC_PI_2)).abs() < 1e-6);
        assert!(pitch.abs() < 1e-6);
    }

    #[test]
    fn straight_up_is_half_pi_pitch() {
        let (_, pitch) = look_angles(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0));
        assert!((pitch - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn coincident_points_return_zero() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(look_angles(p, p), (0.0, 0.0));
    }

    #[test]
    fn angles_round_trip_to_original_direction() {
        // Reconstructing a forward vector from the derived yaw/pitch must
        // reproduce the normalized look direction.
        let cases = [
            (Vec3::new(3.265, 1.78, 2.24), Vec3::new(0.0, 1.7, 160.0)),
            (Vec3::new(2.0, 1.7, -2.5), Vec3::new(0.0, 1.0, -6.0)),
            (Vec3::new(2.0, 1.7, -0.5), Vec3::new(70.0, 15.0, -20.0)),
            (Vec3::new(1.6, 1.7, 1.5), Vec3::new(0.3, 0.5, 2.8)),
            (Vec3::ZERO, Vec3::new(-1.0, -1.0, 1.0)),
        ];
        for (pos, target) in cases {
            let expected = (target - pos).normalize();
            let (yaw, pitch) = look_angles(pos, target);
            let rebuilt = forward_from_angles(yaw, pitch);
            assert!(
                (rebuilt - expected).length() < 1e-5,
                "round trip failed for {pos:?} -> {target:?}"
            );
        }
    }

    // ── easing ──────────────────────────────────────────────────────

    #[test]
    fn ease_in_out_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ease_in_out_is_monotonic() {
        let steps: Vec<f32> = (0..=100)
            .map(|i| ease_in_out_cubic(i as f32 / 100.0))
            .collect();
        for w in steps.windows(2) {
            assert!(w[1] >= w[0], "ease_in_out_cubic must be non-decreasing");
        }
    }

    #[test]
    fn ease_in_out_starts_and_ends_slow() {
        assert!(ease_in_out_cubic(0.1) < 0.1);
        assert!(ease_in_out_cubic(0.9) > 0.9);
    }

    // ── shortest_angle_delta ────────────────────────────────────────

    #[test]
    fn small_delta_unchanged() {
        assert!((shortest_angle_delta(0.0, 0.3) - 0.3).abs() < 1e-6);
        assert!((shortest_angle_delta(0.3, 0.0) + 0.3).abs() < 1e-6);
    }

    #[test]
    fn wraps_across_pi_seam() {
        let d = shortest_angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn ignores_whole_turns() {
        let d = shortest_angle_delta(10.0 * PI + FRAC_PI_4, FRAC_PI_4);
        assert!(d.abs() < 1e-4, "got {d}");
    }

    // ── clamp_pitch ─────────────────────────────────────────────────

    #[test]
    fn small_delta_passes_through() {
        let delta = clamp_pitch(0.0, 0.1, 0.05);
        assert!((delta - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clamps_at_upper_limit() {
        let limit = FRAC_PI_2 - 0.05;
        // Already near limit, trying to push past
        let delta = clamp_pitch(limit - 0.01, 0.1, 0.05);
        assert!((delta - 0.01).abs() < 1e-4, "should clamp to remaining room");
    }

    #[test]
    fn clamps_at_lower_limit() {
        let limit = -(FRAC_PI_2 - 0.05);
        let delta = clamp_pitch(limit + 0.01, -0.1, 0.05);
        assert!((delta - (-0.01)).abs() < 1e-4);
    }

    // ── flatten_xz ──────────────────────────────────────────────────

    #[test]
    fn flattened_direction_is_unit_length_in_plane() {
        let f = flatten_xz(Vec3::new(1.0, -3.0, 1.0));
        assert!(f.y == 0.0);
        assert!((f.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_direction_flattens_to_zero() {
        assert_eq!(flatten_xz(Vec3::Y), Vec3::ZERO);
    }
}
