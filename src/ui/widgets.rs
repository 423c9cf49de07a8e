//! Overlay widgets drawn over the scene
//!
//! Pure egui layout: each widget reads the session and pushes the actions the
//! user triggered. Nothing here mutates run state directly.

use std::time::Instant;
use egui::{Align2, Area, Color32, Frame, Id, Order, RichText, Sense, Slider, Vec2 as EVec2};
use sushirun_core::{format_distance, format_elapsed, format_speed};
use crate::input::InputAction;
use crate::systems::RunSession;

const SLATE_400: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
const SLATE_500: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);
const SLATE_600: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
const SLATE_800: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const GREEN_500: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const RED_500: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const CARD_FILL: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);

/// Frame timing shown when `debug.show_frame_stats` is on
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_ms: f32,
    pub triangles: usize,
}

/// Everything the overlay shows for one frame
pub struct UiView<'a> {
    pub session: &'a RunSession,
    pub now: Instant,
    pub title: &'a str,
    pub auto_rotating: bool,
    pub stats: Option<FrameStats>,
}

/// Draw every overlay widget
pub fn draw(ctx: &egui::Context, view: &UiView<'_>, actions: &mut Vec<InputAction>) {
    header(ctx, view.title);
    tracker_card(ctx, view, actions);
    control_panel(ctx, view.session, actions);
    rotation_toggle(ctx, view.auto_rotating, actions);
    if let Some(stats) = view.stats {
        frame_stats(ctx, stats);
    }
}

/// Translucent white card with the window shadow and rounding
fn card(ui: &egui::Ui) -> Frame {
    Frame::window(ui.style()).fill(CARD_FILL).inner_margin(12.0)
}

fn header(ctx: &egui::Context, title: &str) {
    Area::new(Id::new("header"))
        .anchor(Align2::CENTER_TOP, [0.0, 72.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(title).size(40.0).strong().color(SLATE_800));
        });
}

fn tracker_card(ctx: &egui::Context, view: &UiView<'_>, actions: &mut Vec<InputAction>) {
    let treadmill = &view.session.treadmill;
    Area::new(Id::new("tracker"))
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .order(Order::Foreground)
        .show(ctx, |ui| {
            card(ui).show(ui, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(RichText::new("Current Run").size(13.0).color(SLATE_600));
                    ui.label(
                        RichText::new(format_distance(treadmill.distance_km()))
                            .size(24.0)
                            .strong()
                            .color(SLATE_800),
                    );
                    ui.label(
                        RichText::new(format!("Time: {}", format_elapsed(treadmill.elapsed(view.now))))
                            .size(11.0)
                            .color(SLATE_500),
                    );
                    if ui.small_button("Reset").clicked() {
                        actions.push(InputAction::ResetDistance);
                    }
                });
            });
        });
}

fn control_panel(ctx: &egui::Context, session: &RunSession, actions: &mut Vec<InputAction>) {
    let panel = &session.panel;
    let treadmill = &session.treadmill;
    let pos = panel.position();
    let footprint = panel.footprint();

    Area::new(Id::new("control_panel"))
        .fixed_pos([pos.x, pos.y])
        .constrain(false)
        .order(Order::Foreground)
        .show(ctx, |ui| {
            if panel.is_minimized() {
                // Clicks and drags here are handled by the panel gesture, not egui
                let (rect, _) = ui.allocate_exact_size(EVec2::new(footprint.x, footprint.y), Sense::hover());
                let painter = ui.painter();
                painter.circle_filled(rect.center(), rect.width() * 0.5, CARD_FILL);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "⚙",
                    egui::FontId::proportional(20.0),
                    SLATE_600,
                );
                return;
            }

            card(ui).show(ui, |ui| {
                ui.set_width(footprint.x - 24.0);
                ui.spacing_mut().item_spacing.y = 10.0;

                ui.horizontal(|ui| {
                    ui.label(RichText::new("☰").color(SLATE_400));
                    ui.label(RichText::new("Treadmill Speed").size(16.0).color(SLATE_800));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗕").on_hover_text("Minimize (M)").clicked() {
                            actions.push(InputAction::TogglePanel);
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.label(RichText::new(format_speed(treadmill.speed())).strong());
                    let (dot, _) = ui.allocate_exact_size(EVec2::splat(8.0), Sense::hover());
                    let color = if treadmill.is_running() { GREEN_500 } else { RED_500 };
                    ui.painter().circle_filled(dot.center(), 4.0, color);
                });

                ui.horizontal(|ui| {
                    if ui.add_enabled(treadmill.can_decrease(), egui::Button::new("−")).clicked() {
                        actions.push(InputAction::DecreaseSpeed);
                    }
                    let settings = treadmill.settings();
                    let mut speed = treadmill.speed();
                    ui.spacing_mut().slider_width = footprint.x - 110.0;
                    let slider = Slider::new(&mut speed, 0.0..=settings.max_speed)
                        .step_by(settings.slider_step as f64)
                        .show_value(false);
                    if ui.add(slider).changed() {
                        actions.push(InputAction::SetSpeed(speed));
                    }
                    if ui.add_enabled(treadmill.can_increase(), egui::Button::new("+")).clicked() {
                        actions.push(InputAction::IncreaseSpeed);
                    }
                });

                let (label, fill) = if treadmill.is_running() {
                    ("⏸ Pause", RED_500)
                } else {
                    ("▶ Start", SLATE_800)
                };
                let button = egui::Button::new(RichText::new(label).color(Color32::WHITE)).fill(fill);
                if ui.add_sized([ui.available_width(), 28.0], button).clicked() {
                    actions.push(InputAction::ToggleRunning);
                }
            });
        });
}

fn rotation_toggle(ctx: &egui::Context, auto_rotating: bool, actions: &mut Vec<InputAction>) {
    Area::new(Id::new("rotation_toggle"))
        .anchor(Align2::LEFT_BOTTOM, [16.0, -16.0])
        .show(ctx, |ui| {
            let label = if auto_rotating { "Stop Rotation" } else { "Start Rotation" };
            let button = egui::Button::new(RichText::new(label).size(12.0).color(SLATE_600))
                .fill(Color32::from_white_alpha(128));
            if ui.add(button).clicked() {
                actions.push(InputAction::ToggleAutoRotate);
            }
        });
}

fn frame_stats(ctx: &egui::Context, stats: FrameStats) {
    Area::new(Id::new("frame_stats"))
        .anchor(Align2::LEFT_TOP, [16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "{:.0} fps ({:.2} ms)\n{} triangles",
                    stats.fps, stats.frame_ms, stats.triangles
                ))
                .monospace()
                .size(11.0)
                .color(SLATE_500),
            );
        });
}
