#![warn(missing_docs)]
//! Walkable portfolio loft.
//!
//! A landing page gives way to a first-person apartment: a one-time guided
//! tour, WASD/joystick walking with sliding collision, raycast-targeted props
//! that open content panels or an object viewer, and a split mode that flies
//! the camera to a curated viewpoint beside each panel.

mod collision;
mod controls;
pub mod math;
mod modes;
mod overlay;
mod props;
mod room;
mod tour;
mod transition;

use bevy::prelude::*;

#[cfg(feature = "native")]
use clap::Parser;

/// Command-line options (native builds only; the web build uses defaults).
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about = "Walkable portfolio loft")]
struct Args {
    /// Skip the guided tour and drop straight into first person.
    #[arg(long)]
    skip_tour: bool,
    /// Draw wireframes for the registered collision volumes.
    #[arg(long)]
    show_colliders: bool,
}

fn main() {
    #[cfg(feature = "native")]
    let (skip_tour, show_colliders) = {
        let args = Args::parse();
        (args.skip_tour, args.show_colliders)
    };
    #[cfg(not(feature = "native"))]
    let (skip_tour, show_colliders) = (false, false);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "The Loft".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(modes::ModesPlugin { skip_tour })
    .add_plugins(room::RoomPlugin(room::RoomConfig { show_colliders }))
    .add_plugins(controls::ControlsPlugin(controls::ControlsConfig::default()))
    .add_plugins(props::PropsPlugin(props::PropsConfig::default()))
    .add_plugins(transition::TransitionPlugin(
        transition::TransitionConfig::default(),
    ))
    .add_plugins(tour::TourPlugin(tour::TourConfig::default()))
    .add_plugins(overlay::OverlayPlugin);

    app.run();
}
