use bevy::prelude::*;

use crate::modes::{CollectibleInfo, PanelKind};

/// Marks a prop as look-targetable and names it for the interact prompt.
#[derive(Component, Reflect)]
pub struct Interactive {
    /// Label shown next to the interact prompt.
    pub title: String,
}

/// The prop's own hit geometry: an oriented box in the prop's local frame,
/// sized generously so targeting feels forgiving. Rays are tested against
/// this only, never the rest of the scene.
#[derive(Component, Reflect)]
pub struct Hitbox {
    /// Half the hit volume size along each local axis.
    pub half_extents: Vec3,
}

/// Maximum camera-to-prop distance at which interaction is allowed. This is
/// an independent gate from the ray-hit distance: a long sightline through
/// empty space does not count, nor does standing close while looking away.
#[derive(Component, Reflect)]
pub struct InteractionRange(pub f32);

/// Interacting with this prop opens the given split-mode panel.
#[derive(Component, Reflect)]
pub struct PanelProp {
    /// Panel the prop maps to.
    pub kind: PanelKind,
}

/// Interacting with this prop opens the object viewer with its payload.
#[derive(Component, Reflect)]
pub struct Collectible {
    /// Payload handed to the viewer.
    pub info: CollectibleInfo,
}

/// The single global targeted-object slot.
///
/// Each prop claims the slot when its look test turns true and releases it
/// when the test turns false; releasing is a no-op unless the caller holds
/// the slot, so one prop can never clear another prop's claim.
#[derive(Resource, Default, Debug)]
pub struct Targeted {
    holder: Option<Entity>,
}

impl Targeted {
    /// Entity currently targeted, if any.
    pub fn holder(&self) -> Option<Entity> {
        self.holder
    }

    /// Takes the slot for `entity`, replacing any previous holder.
    pub fn claim(&mut self, entity: Entity) {
        self.holder = Some(entity);
    }

    /// Gives up the slot, but only if `entity` holds it.
    pub fn release(&mut self, entity: Entity) {
        if self.holder == Some(entity) {
            self.holder = None;
        }
    }

    /// Unconditionally empties the slot (mode exit).
    pub fn clear(&mut self) {
        self.holder = None;
    }
}
