use crate::viewport::ViewportCtx;
use eframe::egui;

/// Modal message shown when the countdown cannot be started.
#[derive(Default)]
pub struct ErrorDialog {
    pub open: bool,
    msg: String,
}

impl ErrorDialog {
    /// Open the dialog and repaint at once so it shows without further input.
    pub fn open_message<C: ViewportCtx>(&mut self, ctx: &C, msg: String) {
        self.msg = msg;
        self.open = true;
        ctx.request_repaint();
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let mut open_val = self.open;
        let mut close = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open_val)
            .show(ctx, |ui| {
                ui.colored_label(egui::Color32::LIGHT_RED, format!("Could not start: {}", self.msg));
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close || ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
            open_val = false;
        }
        self.open = open_val;
    }
}
