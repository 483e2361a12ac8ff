use crate::countdown::ValidationError;
use crate::form::SettingsForm;
use crate::overlay::{OverlayAction, OverlayShell};
use crate::settings::{AppConfig, OverlayGeometry};
use chrono::NaiveDateTime;
use std::fmt;
use std::time::{Duration, Instant};

/// Why [`Session::start`] did not open the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// The form holds an invalid target time.
    Invalid(ValidationError),
    /// The session is not showing the settings screen.
    NotOnSettings(ScreenKind),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::Invalid(e) => e.fmt(f),
            StartError::NotOnSettings(kind) => {
                write!(f, "cannot start a countdown from the {kind:?} screen")
            }
        }
    }
}

impl std::error::Error for StartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartError::Invalid(e) => Some(e),
            StartError::NotOnSettings(_) => None,
        }
    }
}

impl From<ValidationError> for StartError {
    fn from(e: ValidationError) -> Self {
        StartError::Invalid(e)
    }
}

pub enum Screen {
    Settings,
    Overlay(OverlayShell),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Settings,
    Overlay,
    Closed,
}

/// Owns the settings form and the overlay and moves between them.
///
/// Edges: `start` (settings -> overlay), `reopen` (overlay -> settings) and
/// `close` (any -> closed).
pub struct Session {
    form: SettingsForm,
    screen: Screen,
    overlay_geometry: OverlayGeometry,
    tick_interval: Duration,
}

impl Session {
    pub fn new(form: SettingsForm, config: &AppConfig) -> Self {
        Self {
            form,
            screen: Screen::Settings,
            overlay_geometry: config.overlay,
            tick_interval: Duration::from_millis(config.tick_ms),
        }
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SettingsForm {
        &mut self.form
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        match self.screen {
            Screen::Settings => ScreenKind::Settings,
            Screen::Overlay(_) => ScreenKind::Overlay,
            Screen::Closed => ScreenKind::Closed,
        }
    }

    pub fn overlay(&self) -> Option<&OverlayShell> {
        match &self.screen {
            Screen::Overlay(shell) => Some(shell),
            _ => None,
        }
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlayShell> {
        match &mut self.screen {
            Screen::Overlay(shell) => Some(shell),
            _ => None,
        }
    }

    pub fn overlay_geometry(&self) -> &OverlayGeometry {
        &self.overlay_geometry
    }

    /// Validate the form and open the overlay.
    ///
    /// On error the session stays on the screen it was on.
    pub fn start(&mut self, now: NaiveDateTime, started: Instant) -> Result<(), StartError> {
        if !matches!(self.screen, Screen::Settings) {
            tracing::warn!(from = ?self.kind(), "start ignored outside the settings screen");
            return Err(StartError::NotOnSettings(self.kind()));
        }
        let config = match self.form.validate() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(input = %self.form.time, error = %e, "invalid target time");
                return Err(e.into());
            }
        };
        let position = (
            self.overlay_geometry.x.round() as i32,
            self.overlay_geometry.y.round() as i32,
        );
        let shell = OverlayShell::new(config, now, started, self.tick_interval, position);
        self.screen = Screen::Overlay(shell);
        tracing::debug!("session: settings -> overlay");
        Ok(())
    }

    /// Drop the overlay and show the settings screen with the form as it was.
    pub fn reopen(&mut self) {
        let Some(shell) = self.overlay_mut() else {
            tracing::warn!(from = ?self.kind(), "reopen ignored without an overlay");
            return;
        };
        shell.close();
        self.screen = Screen::Settings;
        tracing::debug!("session: overlay -> settings");
    }

    pub fn close(&mut self) {
        if let Screen::Overlay(shell) = &mut self.screen {
            shell.close();
        }
        if !matches!(self.screen, Screen::Closed) {
            tracing::debug!(from = ?self.kind(), "session: -> closed");
        }
        self.screen = Screen::Closed;
    }

    /// Route a context menu choice from the overlay.
    pub fn apply(&mut self, action: OverlayAction) {
        if let Some(shell) = self.overlay_mut() {
            shell.apply(action);
        }
        match action {
            OverlayAction::Close => self.close(),
            OverlayAction::ReturnToSettings => self.reopen(),
        }
    }
}
