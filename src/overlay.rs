//! Egui overlays: the website landing page, the split-mode panel, the object
//! viewer, and the first-person HUD (crosshair, interact prompt, joystick).
//!
//! Overlays read the mode machine and issue its actions; they never touch the
//! camera directly. Panel navigation also restarts the camera flight so the
//! view follows the panel being shown.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::controls::{ControlsConfig, InputProfile, Player};
use crate::modes::{ModeMachine, ViewMode};
use crate::props::{Interactive, Targeted};
use crate::room::PanelTargets;
use crate::transition::{CameraPose, TransitionConfig, TransitionDirector};

/// All four overlays, each scheduled only in its mode.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                website_overlay.run_if(in_state(ViewMode::Website)),
                split_overlay.run_if(in_state(ViewMode::Split)),
                object_overlay.run_if(in_state(ViewMode::ViewingObject)),
                fps_hud.run_if(in_state(ViewMode::Fps)),
            ),
        );
    }
}

/// Placeholder body text for each split-mode panel.
fn panel_body(kind: crate::modes::PanelKind) -> &'static str {
    use crate::modes::PanelKind;
    match kind {
        PanelKind::About => {
            "Hi, I'm a developer who builds immersive experiences for the web. \
             This loft is my portfolio: walk around and look closer at anything \
             that interests you."
        }
        PanelKind::Technical => {
            "Rust, TypeScript, real-time rendering, and a soft spot for \
             physically plausible interaction. The whiteboard never stays \
             clean for long."
        }
        PanelKind::Projects => {
            "A selection of shipped work, from data-heavy dashboards to \
             interactive 3D scenes. The PC holds the archives."
        }
        PanelKind::Certifications => {
            "Certificates and awards collected along the way. The trophy is \
             real, the skyline is not."
        }
    }
}

/// Landing page: a dark veil with a single call to action.
fn website_overlay(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut machine: ResMut<ModeMachine>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(egui::Color32::from_black_alpha(180)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.heading(egui::RichText::new("The Loft").size(42.0));
                ui.label("a walkable portfolio");
                ui.add_space(24.0);
                let button =
                    egui::Button::new(egui::RichText::new("Step inside").size(20.0))
                        .min_size(egui::vec2(180.0, 44.0));
                if ui.add(button).clicked() {
                    machine.enter();
                }
            });
        });
}

/// Split mode: content on the right, the 3D view left alone on the left.
fn split_overlay(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut machine: ResMut<ModeMachine>,
    mut director: ResMut<TransitionDirector>,
    panel_targets: Res<PanelTargets>,
    transition_cfg: Res<TransitionConfig>,
    camera: Query<&Transform, With<Player>>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();
    let Some(kind) = machine.panel() else {
        return;
    };

    let mut navigate_to = None;
    let mut close = false;

    egui::SidePanel::right("split-panel")
        .exact_width(ctx.screen_rect().width() * 0.45)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(kind.label());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕ Close").clicked() {
                        close = true;
                    }
                });
            });
            ui.separator();
            ui.label(panel_body(kind));
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if let Some(prev) = kind.prev()
                    && ui.button(format!("← {}", prev.label())).clicked()
                {
                    navigate_to = Some(prev);
                }
                if let Some(next) = kind.next()
                    && ui.button(format!("{} →", next.label())).clicked()
                {
                    navigate_to = Some(next);
                }
            });
        });

    if close {
        machine.exit_split();
    } else if let Some(next) = navigate_to {
        machine.navigate_split(next);
        if let Ok(cam) = camera.single() {
            director.start(
                CameraPose::from_transform(cam),
                panel_targets.get(next),
                transition_cfg.navigate_duration,
            );
        }
    }
}

/// Centered viewer for a collectible's payload.
fn object_overlay(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut machine: ResMut<ModeMachine>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();
    let Some(info) = machine.viewed().cloned() else {
        return;
    };

    let mut close = false;
    egui::Window::new(&info.title)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.label(&info.content);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });
    if close {
        machine.close_object();
    }
}

/// Crosshair, interact prompt, and (touch profile) the joystick ring.
fn fps_hud(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    targeted: Res<Targeted>,
    props: Query<&Interactive>,
    profile: Res<InputProfile>,
    cfg: Res<ControlsConfig>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("fps-hud"),
    ));
    let rect = ctx.screen_rect();
    let center = rect.center();

    painter.circle_stroke(center, 3.0, egui::Stroke::new(1.5, egui::Color32::WHITE));

    if let Some(entity) = targeted.holder()
        && let Ok(interactive) = props.get(entity)
    {
        painter.text(
            center + egui::vec2(0.0, 32.0),
            egui::Align2::CENTER_CENTER,
            format!("[E] {}", interactive.title),
            egui::FontId::proportional(16.0),
            egui::Color32::WHITE,
        );
    }

    if *profile == InputProfile::Touch {
        let joy_center = egui::pos2(
            cfg.joystick_margin + cfg.joystick_radius,
            rect.height() - cfg.joystick_margin - cfg.joystick_radius,
        );
        painter.circle_stroke(
            joy_center,
            cfg.joystick_radius,
            egui::Stroke::new(2.0, egui::Color32::from_white_alpha(90)),
        );
        painter.circle_filled(joy_center, 10.0, egui::Color32::from_white_alpha(60));
    }
}
