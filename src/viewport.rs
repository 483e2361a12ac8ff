use crate::settings::{OverlayGeometry, WindowSize};
use eframe::egui;

pub const SETTINGS_MIN_SIZE: [f32; 2] = [320.0, 240.0];

/// The subset of [`egui::Context`] used to reshape the application window.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Turn the window into the borderless, topmost countdown overlay.
pub fn enter_overlay_mode<C: ViewportCtx>(ctx: &C, geometry: &OverlayGeometry) {
    tracing::debug!(?geometry, "entering overlay mode");
    ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::Resizable(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
        egui::WindowLevel::AlwaysOnTop,
    ));
    ctx.send_viewport_cmd(egui::ViewportCommand::MinInnerSize(egui::vec2(1.0, 1.0)));
    ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
        geometry.width,
        geometry.height,
    )));
    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
        geometry.x, geometry.y,
    )));
    ctx.request_repaint();
}

/// Restore the regular settings window.
pub fn enter_settings_mode<C: ViewportCtx>(ctx: &C, size: &WindowSize) {
    tracing::debug!(?size, "entering settings mode");
    ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(egui::WindowLevel::Normal));
    ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
    ctx.send_viewport_cmd(egui::ViewportCommand::Resizable(true));
    ctx.send_viewport_cmd(egui::ViewportCommand::MinInnerSize(SETTINGS_MIN_SIZE.into()));
    ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
        size.width,
        size.height,
    )));
    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    ctx.request_repaint();
}

pub fn move_window_to<C: ViewportCtx>(ctx: &C, x: i32, y: i32) {
    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
        x as f32, y as f32,
    )));
}

/// Close the root viewport, which ends the application.
pub fn close_application<C: ViewportCtx>(ctx: &C) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    ctx.request_repaint();
}
