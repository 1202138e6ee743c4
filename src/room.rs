//! The loft: placeholder geometry, collision volumes, lights, and the four
//! interactive panels plus three collectible objects.
//!
//! Everything position-shaped the rest of the crate needs lives here as a
//! constant, so the tour, the spawn point, and the panel camera goals all
//! agree on where things are.

use bevy::prelude::*;

use crate::collision::{CollisionRegistry, CollisionVolume};
use crate::modes::{CollectibleInfo, PanelKind};
use crate::props::{Collectible, Hitbox, InteractionRange, Interactive, PanelProp};
use crate::transition::CameraTarget;

/// Fixed camera position for the tour, also the player spawn.
pub const TOUR_CAMERA_POSITION: Vec3 = Vec3::new(3.265, 1.78, 2.24);
/// Far gaze point giving the spawn orientation a level, north-facing start.
pub const TOUR_INITIAL_LOOK_AT: Vec3 = Vec3::new(0.0, 1.7, 160.0);

/// Picture frame on the south wall (About panel).
pub const PICTURE_FRAME_POSITION: Vec3 = Vec3::new(0.3, 0.7, 1.8);
/// Whiteboard near the north wall (Technical panel).
pub const BOARD_POSITION: Vec3 = Vec3::new(-1.4, 1.1, -2.7);
/// Desk PC against the north wall (Projects panel).
pub const PC_POSITION: Vec3 = Vec3::new(2.2, 1.15, -4.5);
/// Trophy on the east shelf (Certifications panel).
pub const TROPHY_POSITION: Vec3 = Vec3::new(5.04, 1.21, 0.44);

const PANEL_INTERACTION_RANGE: f32 = 2.5;

/// Room plugin configuration.
#[derive(Resource, Default, Clone, Debug, Reflect)]
pub struct RoomConfig {
    /// Draw wireframes for every registered collision volume.
    pub show_colliders: bool,
}

/// Camera goal for each split-mode panel: where the camera flies and what it
/// faces when the panel opens.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PanelTargets {
    about: CameraTarget,
    technical: CameraTarget,
    projects: CameraTarget,
    certifications: CameraTarget,
}

impl Default for PanelTargets {
    fn default() -> Self {
        Self {
            about: CameraTarget {
                position: Vec3::new(1.6, 1.7, 1.5),
                look_at: Vec3::new(0.3, 0.5, 2.8),
            },
            technical: CameraTarget {
                position: Vec3::new(0.0, 1.7, -1.5),
                look_at: Vec3::new(-2.5, 2.0, -1.7),
            },
            projects: CameraTarget {
                position: Vec3::new(2.0, 1.7, -2.5),
                look_at: Vec3::new(0.0, 1.0, -6.0),
            },
            // Faces out the window toward the skyline.
            certifications: CameraTarget {
                position: Vec3::new(2.0, 1.7, -0.5),
                look_at: Vec3::new(70.0, 15.0, -20.0),
            },
        }
    }
}

impl PanelTargets {
    /// Camera goal for `kind`.
    pub fn get(&self, kind: PanelKind) -> CameraTarget {
        match kind {
            PanelKind::About => self.about,
            PanelKind::Technical => self.technical,
            PanelKind::Projects => self.projects,
            PanelKind::Certifications => self.certifications,
        }
    }
}

/// Spawns the room and owns the collision registry.
pub struct RoomPlugin(pub RoomConfig);

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RoomConfig>()
            .register_type::<PanelTargets>()
            .insert_resource(self.0.clone())
            .init_resource::<CollisionRegistry>()
            .init_resource::<PanelTargets>()
            .add_systems(Startup, (setup_room, spawn_props))
            .add_systems(Update, draw_colliders.run_if(colliders_visible));
    }
}

fn colliders_visible(cfg: Res<RoomConfig>) -> bool {
    cfg.show_colliders
}

/// Floor, walls, lights, and the wall/furniture collision volumes.
fn setup_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<CollisionRegistry>,
) {
    commands.insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.09)));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });
    commands.spawn((
        Name::new("CeilingLight"),
        PointLight {
            intensity: 400_000.0,
            range: 40.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 2.7, 0.8),
    ));

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.3, 0.26),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.78, 0.74),
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(20.0, 0.1, 20.0))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -0.05, 0.0),
    ));

    // Walls: visual slab + matching collision volume. Sizes follow the
    // as-built loft, not a symmetric box (the west wall sits at x = -3.3).
    let walls = [
        ("wall-north", Vec3::new(0.0, 1.5, -5.4), Vec3::new(20.0, 3.0, 0.5)),
        ("wall-south", Vec3::new(0.0, 1.5, 3.0), Vec3::new(20.0, 3.0, 0.5)),
        ("wall-east", Vec3::new(5.5, 1.5, 0.0), Vec3::new(0.5, 3.0, 20.0)),
        ("wall-west", Vec3::new(-3.3, 1.5, 0.0), Vec3::new(0.5, 3.0, 20.0)),
    ];
    for (id, center, size) in walls {
        commands.spawn((
            Name::new(id),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
        ));
        registry.register(CollisionVolume::aabb(id, center, size / 2.0));
    }
}

/// The four panel props and three collectible objects.
fn spawn_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<CollisionRegistry>,
) {
    // Panel props: (panel, position, visual + hitbox half extents, color).
    let panels = [
        (
            PanelKind::About,
            PICTURE_FRAME_POSITION,
            Vec3::new(0.6, 0.7, 0.25),
            Color::srgb(0.55, 0.42, 0.3),
        ),
        (
            PanelKind::Technical,
            BOARD_POSITION,
            Vec3::new(0.9, 0.6, 0.25),
            Color::srgb(0.92, 0.92, 0.95),
        ),
        (
            PanelKind::Projects,
            PC_POSITION,
            Vec3::new(0.55, 0.55, 0.45),
            Color::srgb(0.15, 0.15, 0.18),
        ),
        (
            PanelKind::Certifications,
            TROPHY_POSITION,
            Vec3::new(0.35, 0.45, 0.35),
            Color::srgb(0.85, 0.68, 0.2),
        ),
    ];
    for (kind, position, half, color) in panels {
        commands.spawn((
            Name::new(kind.label()),
            Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                ..default()
            })),
            Transform::from_translation(position),
            Interactive {
                title: kind.label().to_owned(),
            },
            Hitbox { half_extents: half },
            InteractionRange(PANEL_INTERACTION_RANGE),
            PanelProp { kind },
        ));
    }

    // Collectibles: small floating cubes the viewer opens on interact. Each
    // also blocks walking, like any other piece of furniture.
    let collectibles = [
        (
            Vec3::new(-3.0, 0.5, -3.0),
            Color::srgb(0.4, 0.49, 0.92),
            CollectibleInfo {
                id: "project1".into(),
                title: "Project One".into(),
                content: "This is my first amazing project. Built with React and \
                    Three.js, it showcases interactive 3D experiences."
                    .into(),
            },
        ),
        (
            Vec3::new(3.0, 0.5, -3.0),
            Color::srgb(0.94, 0.58, 0.98),
            CollectibleInfo {
                id: "project2".into(),
                title: "Project Two".into(),
                content: "A revolutionary web application that combines \
                    cutting-edge design with powerful functionality."
                    .into(),
            },
        ),
        (
            Vec3::new(0.0, 0.5, -5.0),
            Color::srgb(0.31, 0.67, 1.0),
            CollectibleInfo {
                id: "about".into(),
                title: "About Me".into(),
                content: "I'm a passionate developer who loves creating immersive \
                    web experiences. Let's build something amazing together!"
                    .into(),
            },
        ),
    ];
    for (position, color, info) in collectibles {
        registry.register(CollisionVolume::aabb(
            format!("object-{}", info.id),
            position,
            Vec3::splat(0.5),
        ));
        commands.spawn((
            Name::new(info.title.clone()),
            Mesh3d(meshes.add(Cuboid::new(0.6, 0.6, 0.6))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: LinearRgba::from(color) * 0.3,
                ..default()
            })),
            Transform::from_translation(position),
            Interactive {
                title: info.title.clone(),
            },
            Hitbox {
                half_extents: Vec3::splat(0.5),
            },
            InteractionRange(PANEL_INTERACTION_RANGE),
            Collectible { info },
        ));
    }
}

/// Debug wireframes for every registered collision volume.
fn draw_colliders(registry: Res<CollisionRegistry>, mut gizmos: Gizmos) {
    for volume in registry.iter() {
        gizmos.cube(
            Transform::from_translation(volume.center)
                .with_rotation(volume.rotation)
                .with_scale(volume.half_extents * 2.0),
            Color::srgb(0.2, 1.0, 0.4),
        );
    }
}
