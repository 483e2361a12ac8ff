use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "countdown.json";

/// Initial values of the settings form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    pub time: String,
    /// Font family preselected in the form. If `None`, the first installed
    /// family is used.
    pub font_family: Option<String>,
    pub font_size: u32,
    pub font_color: String,
    pub end_message: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            time: "18:00".into(),
            font_family: None,
            font_size: 48,
            font_color: "#00FF00".into(),
            end_message: crate::countdown::DEFAULT_END_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct OverlayGeometry {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            x: 500.0,
            y: 300.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 460.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub defaults: FormDefaults,
    #[serde(default)]
    pub overlay: OverlayGeometry,
    #[serde(default)]
    pub settings_window: WindowSize,
    /// Interval between countdown ticks in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            defaults: FormDefaults::default(),
            overlay: OverlayGeometry::default(),
            settings_window: WindowSize::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        if cfg.tick_ms == 0 {
            tracing::warn!("tick_ms of 0 is not allowed; using {}", default_tick_ms());
            cfg.tick_ms = default_tick_ms();
        }
        Ok(cfg)
    }
}

/// Resolve the configuration path: `countdown.json` in the working directory
/// if present, otherwise the per-user config directory.
pub fn config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs_next::config_dir()
        .map(|d| d.join("countdown-overlay").join("config.json"))
        .unwrap_or(local)
}
