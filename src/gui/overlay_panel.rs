use crate::fonts::FontRegistry;
use crate::form::{parse_hex, DEFAULT_COLOR};
use crate::overlay::{OverlayAction, OverlayShell, PointerFrame};
use crate::viewport;
use eframe::egui::{self, FontId, Sense};
use std::time::Instant;

/// Draw the countdown overlay and route its input.
///
/// Returns the context menu choice, if one was made this frame.
pub fn show(
    ctx: &egui::Context,
    shell: &mut OverlayShell,
    fonts: &mut FontRegistry,
) -> Option<OverlayAction> {
    let now = Instant::now();
    shell.poll_tick(now);
    if let Some(wait) = shell.until_next_tick(now) {
        ctx.request_repaint_after(wait);
    }

    // Prefer the position reported by the windowing system; our own record
    // is only a fallback for platforms that do not report it.
    let window_pos = ctx
        .input(|i| i.viewport().outer_rect)
        .map(|r| (r.min.x.round() as i32, r.min.y.round() as i32))
        .unwrap_or_else(|| shell.position());

    let mut action = None;
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let response = ui.interact(rect, ui.id().with("overlay_surface"), Sense::click_and_drag());

            let font = shell.font().clone();
            let family = fonts.font_family(ctx, &font.family, font.bold);
            let color = parse_hex(&font.color_hex).unwrap_or(DEFAULT_COLOR);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                shell.display_text(),
                FontId::new(font.size as f32, family),
                color,
            );

            let hovered = response.hovered();
            let frame = ctx.input(|i| PointerFrame {
                pressed: i.pointer.primary_pressed(),
                down: i.pointer.primary_down(),
                hovered,
                local: i.pointer.latest_pos().map(|p| (p.x, p.y)),
            });
            if let Some((nx, ny)) = shell.route_pointer(frame, window_pos) {
                viewport::move_window_to(ctx, nx, ny);
            }

            response.context_menu(|ui| {
                if ui.button("Close").clicked() {
                    action = Some(OverlayAction::Close);
                    ui.close_menu();
                }
                if ui.button("Back to settings").clicked() {
                    action = Some(OverlayAction::ReturnToSettings);
                    ui.close_menu();
                }
            });
        });
    action
}
