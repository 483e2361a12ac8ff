use chrono::{Duration as ChronoDuration, NaiveDateTime, NaiveTime};

/// Message shown when the countdown reaches zero and the form was left untouched.
pub const DEFAULT_END_MESSAGE: &str = "到点儿啦！";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input is not of the form `HH:MM`.
    Format { input: String },
    /// Hour or minute lies outside the 24-hour clock.
    OutOfRange { hour: u32, minute: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Format { input } => {
                write!(f, "'{input}' is not a time in 24-hour HH:MM format")
            }
            ValidationError::OutOfRange { hour, minute } => {
                write!(f, "{hour:02}:{minute:02} is not a valid time of day")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a time of day in `HH:MM` format.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, ValidationError> {
    let format_err = || ValidationError::Format {
        input: input.to_string(),
    };
    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.len() != 2 {
        return Err(format_err());
    }
    let field = |s: &str| -> Option<u32> {
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };
    let h = field(parts[0]).ok_or_else(format_err)?;
    let m = field(parts[1]).ok_or_else(format_err)?;
    if h >= 24 || m >= 60 {
        return Err(ValidationError::OutOfRange { hour: h, minute: m });
    }
    NaiveTime::from_hms_opt(h, m, 0).ok_or(ValidationError::OutOfRange { hour: h, minute: m })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
    pub color_hex: String,
    pub bold: bool,
}

/// Everything the overlay needs to run one countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig {
    pub target: NaiveTime,
    pub font: FontSpec,
    pub end_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    remaining_secs: u64,
    phase: Phase,
}

impl CountdownState {
    pub fn new(remaining_secs: u64) -> Self {
        let phase = if remaining_secs == 0 {
            Phase::Finished
        } else {
            Phase::Running
        };
        Self {
            remaining_secs,
            phase,
        }
    }

    /// Build the state for `target` as seen from `now`.
    pub fn starting_at(target: NaiveTime, now: NaiveDateTime) -> Self {
        Self::new(compute_initial_remaining(target, now))
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Advance by one second. Returns `true` if this tick finished the countdown.
    pub fn tick(&mut self) -> bool {
        if self.phase == Phase::Finished || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.phase = Phase::Finished;
            return true;
        }
        false
    }
}

/// Whole seconds from `now` until the next occurrence of `target`.
///
/// A target earlier than `now` on the same day refers to tomorrow.
pub fn compute_initial_remaining(target: NaiveTime, now: NaiveDateTime) -> u64 {
    let mut candidate = now.date().and_time(target);
    if candidate < now {
        candidate += ChronoDuration::days(1);
    }
    (candidate - now).num_seconds().max(0) as u64
}

/// Format seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

pub fn display_text(state: &CountdownState, config: &CountdownConfig) -> String {
    match state.phase() {
        Phase::Running => format_hms(state.remaining_secs()),
        Phase::Finished => config.end_message.clone(),
    }
}
