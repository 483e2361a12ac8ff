use crate::countdown::{display_text, CountdownConfig, CountdownState, FontSpec, Phase};
use crate::drag::DragState;
use crate::ticker::RepeatingTick;
use chrono::NaiveDateTime;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Active,
    Closed,
}

/// Choices offered by the overlay's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Terminate the whole application.
    Close,
    /// Drop the overlay and show the settings screen again.
    ReturnToSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPointerEvent {
    Press { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Release,
}

/// Pointer input sampled once per frame. `local` is relative to the
/// overlay's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub pressed: bool,
    pub down: bool,
    pub hovered: bool,
    pub local: Option<(f32, f32)>,
}

/// Convert a window-local pointer position to screen coordinates.
pub fn to_screen(window_pos: (i32, i32), local: (f32, f32)) -> (i32, i32) {
    (
        window_pos.0 + local.0.round() as i32,
        window_pos.1 + local.1.round() as i32,
    )
}

/// A running countdown overlay: countdown state, tick schedule and drag.
pub struct OverlayShell {
    config: CountdownConfig,
    countdown: CountdownState,
    ticker: RepeatingTick,
    drag: DragState,
    state: ShellState,
    position: (i32, i32),
}

impl OverlayShell {
    pub fn new(
        config: CountdownConfig,
        now: NaiveDateTime,
        started: Instant,
        interval: Duration,
        position: (i32, i32),
    ) -> Self {
        let countdown = CountdownState::starting_at(config.target, now);
        let mut ticker = RepeatingTick::start(interval, started);
        if !countdown.is_running() {
            ticker.cancel();
        }
        tracing::info!(
            target_time = %config.target.format("%H:%M"),
            remaining = countdown.remaining_secs(),
            "countdown started"
        );
        Self {
            config,
            countdown,
            ticker,
            drag: DragState::default(),
            state: ShellState::Active,
            position,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn font(&self) -> &FontSpec {
        &self.config.font
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn display_text(&self) -> String {
        display_text(&self.countdown, &self.config)
    }

    /// Run a due tick. Returns `true` when the displayed text changed.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if self.state != ShellState::Active || !self.ticker.poll(now) {
            return false;
        }
        if self.countdown.tick() {
            self.ticker.cancel();
            tracing::info!("countdown finished");
        }
        true
    }

    /// Delay until the next tick should be handled, `None` once ticking stopped.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        if self.state != ShellState::Active || self.countdown.phase() == Phase::Finished {
            return None;
        }
        self.ticker.until_next(now)
    }

    /// Feed a pointer event in screen coordinates. `window_pos` is the current
    /// top-left corner of the overlay. Returns the position the window should
    /// move to.
    pub fn handle_pointer(
        &mut self,
        event: OverlayPointerEvent,
        window_pos: (i32, i32),
    ) -> Option<(i32, i32)> {
        if self.state != ShellState::Active {
            return None;
        }
        match event {
            OverlayPointerEvent::Press { x, y } => {
                self.drag.press(x, y);
                None
            }
            OverlayPointerEvent::Move { x, y } => {
                let (dx, dy) = self.drag.move_to(x, y)?;
                if dx == 0 && dy == 0 {
                    return None;
                }
                self.position = (window_pos.0 + dx, window_pos.1 + dy);
                Some(self.position)
            }
            OverlayPointerEvent::Release => {
                self.drag.release();
                None
            }
        }
    }

    /// Turn one frame of pointer input into drag events. A drag ends as soon
    /// as the primary button is no longer held, even if the release itself
    /// was delivered elsewhere. Returns the position the window should move to.
    pub fn route_pointer(
        &mut self,
        frame: PointerFrame,
        window_pos: (i32, i32),
    ) -> Option<(i32, i32)> {
        if self.is_dragging() && !frame.down {
            self.handle_pointer(OverlayPointerEvent::Release, window_pos);
            return None;
        }
        let (x, y) = to_screen(window_pos, frame.local?);
        if frame.pressed && frame.hovered {
            self.handle_pointer(OverlayPointerEvent::Press { x, y }, window_pos)
        } else if self.is_dragging() {
            self.handle_pointer(OverlayPointerEvent::Move { x, y }, window_pos)
        } else {
            None
        }
    }

    /// Apply a context menu choice. The shell is closed either way.
    pub fn apply(&mut self, action: OverlayAction) -> OverlayAction {
        tracing::debug!(?action, "overlay action");
        self.close();
        action
    }

    pub fn close(&mut self) {
        if self.state == ShellState::Closed {
            return;
        }
        self.ticker.cancel();
        self.drag.release();
        self.state = ShellState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{FontSpec, Phase};
    use chrono::{NaiveDate, NaiveTime};

    const SECOND: Duration = Duration::from_millis(1000);

    fn config(h: u32, m: u32) -> CountdownConfig {
        CountdownConfig {
            target: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
            font: FontSpec {
                family: "Arial".into(),
                size: 48,
                color_hex: "#00FF00".into(),
                bold: true,
            },
            end_message: "done".into(),
        }
    }

    fn now(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn ticks_until_finished_then_stops() {
        let t0 = Instant::now();
        let mut shell = OverlayShell::new(config(12, 0), now(11, 59, 57), t0, SECOND, (0, 0));
        assert_eq!(shell.display_text(), "00:00:03");
        assert!(shell.poll_tick(t0 + SECOND));
        assert!(shell.poll_tick(t0 + SECOND * 2));
        assert_eq!(shell.display_text(), "00:00:01");
        assert!(shell.poll_tick(t0 + SECOND * 3));
        assert_eq!(shell.countdown().phase(), Phase::Finished);
        assert_eq!(shell.display_text(), "done");
        assert!(!shell.poll_tick(t0 + SECOND * 4));
        assert_eq!(shell.until_next_tick(t0 + SECOND * 4), None);
    }

    #[test]
    fn zero_remaining_never_schedules() {
        let t0 = Instant::now();
        let mut shell = OverlayShell::new(config(12, 0), now(12, 0, 0), t0, SECOND, (0, 0));
        assert_eq!(shell.display_text(), "done");
        assert!(!shell.poll_tick(t0 + SECOND));
    }

    fn held(local: (f32, f32)) -> PointerFrame {
        PointerFrame {
            pressed: false,
            down: true,
            hovered: true,
            local: Some(local),
        }
    }

    #[test]
    fn routed_drag_uses_screen_coordinates() {
        let mut shell = OverlayShell::new(config(12, 0), now(11, 0, 0), Instant::now(), SECOND, (500, 300));
        let press = PointerFrame {
            pressed: true,
            ..held((20.0, 30.0))
        };
        assert_eq!(shell.route_pointer(press, (500, 300)), None);
        assert!(shell.is_dragging());
        // The window has not moved yet, so the local position carries the delta.
        assert_eq!(shell.route_pointer(held((30.4, 45.0)), (500, 300)), Some((510, 315)));
        // Pointer held still while the window caught up: same screen point.
        assert_eq!(shell.route_pointer(held((20.4, 30.0)), (510, 315)), None);
    }

    #[test]
    fn lost_release_ends_drag() {
        let mut shell = OverlayShell::new(config(12, 0), now(11, 0, 0), Instant::now(), SECOND, (0, 0));
        let press = PointerFrame {
            pressed: true,
            ..held((10.0, 10.0))
        };
        shell.route_pointer(press, (0, 0));
        assert!(shell.is_dragging());

        // Button released outside the window: no release event, just a hover.
        let hover = PointerFrame {
            down: false,
            ..held((50.0, 50.0))
        };
        assert_eq!(shell.route_pointer(hover, (0, 0)), None);
        assert!(!shell.is_dragging());
        assert_eq!(shell.route_pointer(hover, (0, 0)), None);
        assert_eq!(shell.position(), (0, 0));
    }

    #[test]
    fn press_outside_surface_does_not_drag() {
        let mut shell = OverlayShell::new(config(12, 0), now(11, 0, 0), Instant::now(), SECOND, (0, 0));
        let press = PointerFrame {
            pressed: true,
            hovered: false,
            ..held((10.0, 10.0))
        };
        assert_eq!(shell.route_pointer(press, (0, 0)), None);
        assert!(!shell.is_dragging());
    }

    #[test]
    fn to_screen_rounds_local_offset() {
        assert_eq!(to_screen((500, 300), (10.6, 4.4)), (511, 304));
    }

    #[test]
    fn closed_shell_ignores_input() {
        let t0 = Instant::now();
        let mut shell = OverlayShell::new(config(12, 0), now(11, 0, 0), t0, SECOND, (0, 0));
        assert_eq!(shell.apply(OverlayAction::ReturnToSettings), OverlayAction::ReturnToSettings);
        assert_eq!(shell.state(), ShellState::Closed);
        assert!(!shell.poll_tick(t0 + SECOND));
        assert_eq!(
            shell.handle_pointer(OverlayPointerEvent::Press { x: 1, y: 1 }, (0, 0)),
            None
        );
        assert_eq!(shell.countdown().remaining_secs(), 3600);
    }
}
