mod error_dialog;
mod overlay_panel;
mod settings_panel;

pub use error_dialog::ErrorDialog;

use crate::fonts::{FontCatalog, FontRegistry};
use crate::form::SettingsForm;
use crate::overlay::OverlayAction;
use crate::session::{ScreenKind, Session, StartError};
use crate::settings::{AppConfig, WindowSize};
use crate::viewport;
use eframe::egui;
use std::time::Instant;

pub struct CountdownApp {
    session: Session,
    fonts: FontRegistry,
    families: Vec<String>,
    error_dialog: ErrorDialog,
    settings_window: WindowSize,
}

impl CountdownApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, catalog: FontCatalog) -> Self {
        let mut fonts = FontRegistry::new(catalog);
        fonts.install_fallback(&cc.egui_ctx);
        let families = fonts.catalog().families();
        if families.is_empty() {
            tracing::warn!("no installed fonts found; using built-in fonts only");
        }
        let form = SettingsForm::new(&config.defaults, &families);
        Self {
            session: Session::new(form, &config),
            fonts,
            families,
            error_dialog: ErrorDialog::default(),
            settings_window: config.settings_window,
        }
    }

    fn start_countdown(&mut self, ctx: &egui::Context) {
        let now = chrono::Local::now().naive_local();
        match self.session.start(now, Instant::now()) {
            Ok(()) => {
                viewport::enter_overlay_mode(ctx, self.session.overlay_geometry());
            }
            Err(StartError::Invalid(e)) => {
                self.error_dialog.open_message(ctx, e.to_string());
            }
            Err(e @ StartError::NotOnSettings(_)) => tracing::debug!(error = %e, "start ignored"),
        }
    }

    fn handle_overlay_action(&mut self, ctx: &egui::Context, action: OverlayAction) {
        self.session.apply(action);
        match self.session.kind() {
            ScreenKind::Closed => viewport::close_application(ctx),
            ScreenKind::Settings => viewport::enter_settings_mode(ctx, &self.settings_window),
            ScreenKind::Overlay => {}
        }
    }
}

impl eframe::App for CountdownApp {
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        match self.session.kind() {
            ScreenKind::Overlay => [0.0; 4],
            _ => visuals.panel_fill.to_normalized_gamma_f32(),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.session.close();
            return;
        }
        match self.session.kind() {
            ScreenKind::Settings => {
                let enabled = !self.error_dialog.open;
                let start = settings_panel::show(
                    ctx,
                    self.session.form_mut(),
                    &self.families,
                    &mut self.fonts,
                    enabled,
                );
                self.error_dialog.ui(ctx);
                if start && enabled {
                    self.start_countdown(ctx);
                }
            }
            ScreenKind::Overlay => {
                let action = match self.session.overlay_mut() {
                    Some(shell) => overlay_panel::show(ctx, shell, &mut self.fonts),
                    None => None,
                };
                if let Some(action) = action {
                    self.handle_overlay_action(ctx, action);
                }
            }
            ScreenKind::Closed => {}
        }
    }
}
