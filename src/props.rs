//! Interactive props: look-ray targeting and the interact action.
//!
//! Every prop that can be "looked at" carries the same small component set
//! ([`Interactive`] + [`Hitbox`] + [`InteractionRange`]), so the targeting
//! logic exists exactly once and is instantiated per prop by the room. Props
//! additionally carry either a [`PanelProp`] (opens a split-mode panel) or a
//! [`Collectible`] (opens the object viewer).

mod entities;
mod systems;

pub use entities::{Collectible, Hitbox, InteractionRange, Interactive, PanelProp, Targeted};

use bevy::prelude::*;

use crate::modes::ViewMode;

/// Per-plugin configuration for targeting.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PropsConfig {
    /// A ray hit farther than this never targets, regardless of range.
    pub max_look_distance: f32,
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            max_look_distance: 5.0,
        }
    }
}

/// Raycast targeting and prop interaction.
pub struct PropsPlugin(pub PropsConfig);

impl Plugin for PropsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PropsConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<Targeted>()
            .add_systems(
                Update,
                (systems::update_targeting, systems::interact)
                    .chain()
                    .run_if(in_state(ViewMode::Fps)),
            )
            .add_systems(Update, systems::release_despawned)
            .add_systems(OnExit(ViewMode::Fps), systems::clear_targeting);
    }
}
