//! Static collision volumes and sphere-vs-box resolution.
//!
//! The room registers one [`CollisionVolume`] per wall or furniture piece at
//! spawn. The walk controller queries the registry every tick with the
//! player's eye position and a small radius; blocked moves are resolved by
//! [`slide_move`], which retries each horizontal axis independently so the
//! player slides along walls instead of stopping dead.

use bevy::prelude::*;

/// An oriented box obstacle, tested as sphere-vs-OBB.
///
/// `rotation = Quat::IDENTITY` degrades to a plain axis-aligned box test.
#[derive(Clone, Debug, Reflect)]
pub struct CollisionVolume {
    /// Stable identifier; unique among live volumes, reusable after removal.
    pub id: String,
    /// World-space center of the box.
    pub center: Vec3,
    /// Half the box size along each local axis.
    pub half_extents: Vec3,
    /// Box orientation.
    pub rotation: Quat,
    inv_rotation: Quat,
}

impl CollisionVolume {
    /// Axis-aligned volume.
    pub fn aabb(id: impl Into<String>, center: Vec3, half_extents: Vec3) -> Self {
        Self::oriented(id, center, half_extents, Quat::IDENTITY)
    }

    /// Oriented volume; the inverse rotation is precomputed once here.
    pub fn oriented(
        id: impl Into<String>,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
    ) -> Self {
        Self {
            id: id.into(),
            center,
            half_extents,
            rotation,
            inv_rotation: rotation.inverse(),
        }
    }

    /// `true` if a sphere at `point` with `radius` touches this box.
    fn overlaps(&self, point: Vec3, radius: f32) -> bool {
        // Transform into the box's unrotated frame, clamp to the surface,
        // compare the residual distance against the sphere radius.
        let local = self.inv_rotation * (point - self.center);
        let closest = local.clamp(-self.half_extents, self.half_extents);
        local.distance_squared(closest) < radius * radius
    }
}

/// Process-wide store of static collision volumes.
///
/// Mutated only when props spawn/despawn; read-only during the movement tick.
#[derive(Resource, Default, Reflect)]
pub struct CollisionRegistry {
    volumes: Vec<CollisionVolume>,
}

impl CollisionRegistry {
    /// Registers a complete volume. Live ids must be unique; a removed id may
    /// be registered again.
    pub fn register(&mut self, volume: CollisionVolume) {
        let duplicate = self.volumes.iter().any(|v| v.id == volume.id);
        debug_assert!(!duplicate, "duplicate collision volume id {:?}", volume.id);
        if duplicate {
            warn!("ignoring duplicate collision volume id {:?}", volume.id);
            return;
        }
        self.volumes.push(volume);
    }

    /// Removes the volume registered under `id`, if any.
    pub fn remove(&mut self, id: &str) {
        self.volumes.retain(|v| v.id != id);
    }

    /// Number of live volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// `true` when no volumes are registered.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Iterates live volumes (debug gizmo drawing).
    pub fn iter(&self) -> impl Iterator<Item = &CollisionVolume> {
        self.volumes.iter()
    }

    /// `true` if a sphere at `point` with `radius` touches any volume.
    /// An empty registry reports no collision.
    pub fn check(&self, point: Vec3, radius: f32) -> bool {
        self.volumes.iter().any(|v| v.overlaps(point, radius))
    }
}

/// Resolves a displacement against the registry with wall sliding.
///
/// The full move is attempted first. On collision, the X component is retried
/// alone from the pre-move position; if still blocked, X reverts. The Z
/// component is then retried from the X-pass result; if blocked, Z reverts.
/// The two passes must run in this order for sliding to work along both wall
/// orientations. Vertical displacement is not resolved here (the walk
/// controller pins Y to eye height afterwards).
pub fn slide_move(registry: &CollisionRegistry, from: Vec3, displacement: Vec3, radius: f32) -> Vec3 {
    let attempted = from + displacement;
    if !registry.check(attempted, radius) {
        return attempted;
    }

    let mut pos = from;
    pos.x += displacement.x;
    if registry.check(pos, radius) {
        pos.x = from.x;
    }

    let after_x = pos;
    pos.z += displacement.z;
    if registry.check(pos, radius) {
        pos.z = after_x.z;
    }
    pos
}

/// A ray with origin and unit direction, for look-at targeting.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray start (camera position).
    pub origin: Vec3,
    /// Normalized direction (camera forward).
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Distance along `ray` to an oriented box, or `None` on a miss.
///
/// Slab test in the box's local frame. Returns `0.0` when the origin is
/// already inside the box; boxes entirely behind the origin are misses.
pub fn ray_box_distance(ray: Ray, center: Vec3, rotation: Quat, half_extents: Vec3) -> Option<f32> {
    let inv = rotation.inverse();
    let origin = inv * (ray.origin - center);
    let dir = inv * ray.direction;

    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = half_extents[axis];
        if d.abs() < 1e-8 {
            if o.abs() > h {
                return None;
            }
            continue;
        }
        let mut t1 = (-h - o) / d;
        let mut t2 = (h - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn wall(id: &str, center: Vec3, half: Vec3) -> CollisionVolume {
        CollisionVolume::aabb(id, center, half)
    }

    // ── registry queries ────────────────────────────────────────────

    #[test]
    fn empty_registry_reports_no_collision() {
        let reg = CollisionRegistry::default();
        assert!(!reg.check(Vec3::ZERO, 10.0));
    }

    #[test]
    fn point_at_center_always_collides() {
        let mut reg = CollisionRegistry::default();
        reg.register(wall("desk", Vec3::new(1.0, 0.5, -2.0), Vec3::splat(0.4)));
        assert!(reg.check(Vec3::new(1.0, 0.5, -2.0), 0.01));
    }

    #[test]
    fn distant_point_never_collides() {
        let mut reg = CollisionRegistry::default();
        let half = Vec3::new(0.5, 1.5, 0.25);
        reg.register(wall("wall", Vec3::ZERO, half));
        let radius = 0.3;
        // Beyond max(half_extents) + radius along each world axis.
        let clearance = half.max_element() + radius + 0.01;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!(!reg.check(axis * clearance, radius));
            assert!(!reg.check(axis * -clearance, radius));
        }
    }

    #[test]
    fn sphere_touching_face_collides() {
        let mut reg = CollisionRegistry::default();
        reg.register(wall("wall", Vec3::ZERO, Vec3::new(1.0, 1.0, 0.25)));
        // 0.2 away from the +Z face, radius 0.3.
        assert!(reg.check(Vec3::new(0.0, 0.0, 0.45), 0.3));
        assert!(!reg.check(Vec3::new(0.0, 0.0, 0.56), 0.3));
    }

    #[test]
    fn oriented_volume_rotates_with_its_frame() {
        let mut reg = CollisionRegistry::default();
        // Long thin wall rotated 45 degrees around Y.
        reg.register(CollisionVolume::oriented(
            "diag",
            Vec3::ZERO,
            Vec3::new(3.0, 1.0, 0.1),
            Quat::from_rotation_y(FRAC_PI_4),
        ));
        // A point along the rotated long axis is inside...
        let along = Quat::from_rotation_y(FRAC_PI_4) * Vec3::new(2.0, 0.0, 0.0);
        assert!(reg.check(along, 0.2));
        // ...but the same offset along the unrotated axis is clear.
        assert!(!reg.check(Vec3::new(2.0, 0.0, 0.0), 0.2));
    }

    #[test]
    fn removal_allows_reregistration() {
        let mut reg = CollisionRegistry::default();
        reg.register(wall("couch", Vec3::ZERO, Vec3::ONE));
        assert!(reg.check(Vec3::ZERO, 0.1));
        reg.remove("couch");
        assert!(reg.is_empty());
        assert!(!reg.check(Vec3::ZERO, 0.1));
        reg.register(wall("couch", Vec3::new(5.0, 0.0, 0.0), Vec3::ONE));
        assert_eq!(reg.len(), 1);
        assert!(reg.check(Vec3::new(5.0, 0.0, 0.0), 0.1));
    }

    // ── sliding resolution ──────────────────────────────────────────

    #[test]
    fn unobstructed_move_applies_fully() {
        let reg = CollisionRegistry::default();
        let to = slide_move(&reg, Vec3::ZERO, Vec3::new(0.3, 0.0, -0.2), 0.3);
        assert_eq!(to, Vec3::new(0.3, 0.0, -0.2));
    }

    #[test]
    fn sliding_along_x_blocking_wall() {
        let mut reg = CollisionRegistry::default();
        // Wall face at x = 2.0.
        reg.register(wall("east", Vec3::new(2.5, 0.0, 0.0), Vec3::new(0.5, 2.0, 10.0)));
        let from = Vec3::new(1.8, 0.0, 0.0);
        let to = slide_move(&reg, from, Vec3::new(0.5, 0.0, 0.3), 0.3);
        // X is blocked entirely, Z moves the full amount.
        assert_eq!(to.x, from.x);
        assert!((to.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn sliding_along_z_blocking_wall() {
        let mut reg = CollisionRegistry::default();
        // Wall face at z = -2.0.
        reg.register(wall("north", Vec3::new(0.0, 0.0, -2.5), Vec3::new(10.0, 2.0, 0.5)));
        let from = Vec3::new(0.0, 0.0, -1.8);
        let to = slide_move(&reg, from, Vec3::new(-0.4, 0.0, -0.5), 0.3);
        assert!((to.x - (-0.4)).abs() < 1e-6);
        assert_eq!(to.z, from.z);
    }

    #[test]
    fn single_axis_block_is_a_full_stop_on_that_axis() {
        let mut reg = CollisionRegistry::default();
        reg.register(wall("east", Vec3::new(2.5, 0.0, 0.0), Vec3::new(0.5, 2.0, 10.0)));
        let from = Vec3::new(1.8, 0.0, 0.0);
        let to = slide_move(&reg, from, Vec3::new(0.5, 0.0, 0.0), 0.3);
        assert_eq!(to, from);
    }

    #[test]
    fn corner_blocks_both_axes() {
        let mut reg = CollisionRegistry::default();
        reg.register(wall("east", Vec3::new(2.5, 0.0, 0.0), Vec3::new(0.5, 2.0, 10.0)));
        reg.register(wall("north", Vec3::new(0.0, 0.0, -2.5), Vec3::new(10.0, 2.0, 0.5)));
        let from = Vec3::new(1.8, 0.0, -1.8);
        let to = slide_move(&reg, from, Vec3::new(0.5, 0.0, -0.5), 0.3);
        assert_eq!(to, from);
    }

    #[test]
    fn walking_into_a_wall_converges_at_the_surface() {
        // Integrate the walk loop (accumulate, slide, damp) straight into a
        // wall for many ticks; the position must approach the wall face minus
        // the collision radius and never cross it.
        let mut reg = CollisionRegistry::default();
        reg.register(wall("east", Vec3::new(2.5, 1.7, 0.0), Vec3::new(0.5, 2.0, 10.0)));

        let radius = 0.3;
        let speed = 2.0;
        let damping = 10.0;
        let dt = 1.0 / 60.0;
        let limit = 2.0 - radius;

        let mut pos = Vec3::new(0.0, 1.7, 0.0);
        let mut velocity = Vec3::ZERO;
        for _ in 0..600 {
            velocity.x += speed * dt;
            pos = slide_move(&reg, pos, velocity, radius);
            velocity *= 1.0 - damping * dt;
            assert!(pos.x <= limit + 1e-4, "crossed the wall: {}", pos.x);
        }
        // The stopping gap is bounded by one steady-state step, speed/damping.
        let step = speed / damping;
        assert!(limit - pos.x < step, "stopped short of the wall: {}", pos.x);
    }

    // ── raycasting ──────────────────────────────────────────────────

    #[test]
    fn ray_hits_front_face_at_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let d = ray_box_distance(ray, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        assert!((d.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_to_the_side() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_box_distance(ray, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE).is_none());
    }

    #[test]
    fn box_behind_origin_is_a_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray_box_distance(ray, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE).is_none());
    }

    #[test]
    fn origin_inside_box_reports_zero() {
        let ray = Ray::new(Vec3::new(0.2, 0.0, 0.0), Vec3::X);
        let d = ray_box_distance(ray, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        assert_eq!(d, Some(0.0));
    }

    #[test]
    fn rotated_box_is_tested_in_its_own_frame() {
        let rot = Quat::from_rotation_y(FRAC_PI_4);
        // Rotating the thin plate 45 degrees shrinks its world-space x span
        // from 2.0 to ~1.45, so a ray down -Z at x=1.8 hits the unrotated
        // plate but misses the rotated one.
        let half = Vec3::new(2.0, 1.0, 0.05);
        let ray = Ray::new(Vec3::new(1.8, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_box_distance(ray, Vec3::ZERO, Quat::IDENTITY, half).is_some());
        assert!(ray_box_distance(ray, Vec3::ZERO, rot, half).is_none());
    }
}
