use bevy::prelude::*;

use super::PropsConfig;
use super::entities::{Collectible, Hitbox, InteractionRange, Interactive, PanelProp, Targeted};
use crate::collision::{self, Ray};
use crate::controls::Player;
use crate::modes::ModeMachine;
use crate::room::PanelTargets;
use crate::transition::{CameraPose, TransitionConfig, TransitionDirector};

/// Recomputes the targeted-object slot every tick.
///
/// A prop is targeted iff the camera's look ray hits its own hitbox within
/// the look-distance cutoff AND the straight-line distance to the prop is
/// within its interaction range. Props without a [`Hitbox`] are simply never
/// targeted. Claims overwrite; releases only clear a prop's own claim.
pub fn update_targeting(
    cfg: Res<PropsConfig>,
    camera: Query<&Transform, With<Player>>,
    props: Query<(Entity, &Hitbox, &InteractionRange, &Transform), (With<Interactive>, Without<Player>)>,
    mut targeted: ResMut<Targeted>,
) {
    let Ok(cam) = camera.single() else {
        return;
    };
    let forward = cam.forward();
    let ray = Ray::new(cam.translation, Vec3::new(forward.x, forward.y, forward.z));

    for (entity, hitbox, range, transform) in &props {
        let hit = collision::ray_box_distance(
            ray,
            transform.translation,
            transform.rotation,
            hitbox.half_extents,
        );
        let in_range = cam.translation.distance(transform.translation) <= range.0;
        let looking = matches!(hit, Some(d) if d < cfg.max_look_distance) && in_range;

        if looking {
            targeted.claim(entity);
        } else {
            targeted.release(entity);
        }
    }
}

/// Interact key/click on the targeted prop.
///
/// Panel props enter split mode and start the camera flight toward the
/// panel's configured viewpoint; collectibles open the object viewer.
pub fn interact(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    targeted: Res<Targeted>,
    panels: Query<&PanelProp>,
    collectibles: Query<&Collectible>,
    panel_targets: Res<PanelTargets>,
    transition_cfg: Res<TransitionConfig>,
    camera: Query<&Transform, With<Player>>,
    mut machine: ResMut<ModeMachine>,
    mut director: ResMut<TransitionDirector>,
) {
    if !keys.just_pressed(KeyCode::KeyE) && !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(entity) = targeted.holder() else {
        return;
    };

    if let Ok(panel) = panels.get(entity) {
        let Ok(cam) = camera.single() else {
            return;
        };
        machine.enter_split(panel.kind);
        director.start(
            CameraPose::from_transform(cam),
            panel_targets.get(panel.kind),
            transition_cfg.enter_duration,
        );
    } else if let Ok(collectible) = collectibles.get(entity) {
        machine.view_object(collectible.info.clone());
    }
}

/// Targeting is derived per-tick state; it never survives a mode exit.
pub fn clear_targeting(mut targeted: ResMut<Targeted>) {
    targeted.clear();
}

/// A despawned prop must release the slot if it held it.
pub fn release_despawned(
    mut removed: RemovedComponents<Interactive>,
    mut targeted: ResMut<Targeted>,
) {
    for entity in removed.read() {
        targeted.release(entity);
    }
}
