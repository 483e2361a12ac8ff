use crate::countdown::{parse_hhmm, CountdownConfig, FontSpec, ValidationError};
use crate::settings::FormDefaults;
use eframe::egui::Color32;

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 100;
pub const FALLBACK_FAMILY: &str = "Arial";
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(0x00, 0xFF, 0x00);

/// Editable fields of the settings screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub time: String,
    pub font_family: String,
    pub font_size: u32,
    pub font_color: String,
    pub end_message: String,
}

impl SettingsForm {
    /// Build the initial form. `families` is the sorted list of installed
    /// families; the first one is preselected unless the defaults name one.
    pub fn new(defaults: &FormDefaults, families: &[String]) -> Self {
        let font_family = defaults
            .font_family
            .clone()
            .or_else(|| families.first().cloned())
            .unwrap_or_else(|| FALLBACK_FAMILY.to_string());
        Self {
            time: defaults.time.clone(),
            font_family,
            font_size: defaults.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            font_color: to_hex(color_or_default(&defaults.font_color)),
            end_message: defaults.end_message.clone(),
        }
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size: self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            color_hex: self.font_color.clone(),
            bold: true,
        }
    }

    /// Turn the form into a countdown configuration.
    ///
    /// The end message is taken verbatim, an empty string included.
    pub fn validate(&self) -> Result<CountdownConfig, ValidationError> {
        let target = parse_hhmm(&self.time)?;
        Ok(CountdownConfig {
            target,
            font: self.font_spec(),
            end_message: self.end_message.clone(),
        })
    }

    pub fn color(&self) -> Color32 {
        parse_hex(&self.font_color).unwrap_or(DEFAULT_COLOR)
    }

    pub fn set_color(&mut self, color: Color32) {
        self.font_color = to_hex(color);
    }
}

/// Parse `#RRGGBB` or `#RGB`.
pub fn parse_hex(input: &str) -> Option<Color32> {
    let s = input.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }
    let bytes = match s.len() {
        6 => (
            u8::from_str_radix(&s[0..2], 16).ok()?,
            u8::from_str_radix(&s[2..4], 16).ok()?,
            u8::from_str_radix(&s[4..6], 16).ok()?,
        ),
        3 => (
            u8::from_str_radix(&s[0..1], 16).ok()? * 17,
            u8::from_str_radix(&s[1..2], 16).ok()? * 17,
            u8::from_str_radix(&s[2..3], 16).ok()? * 17,
        ),
        _ => return None,
    };
    Some(Color32::from_rgb(bytes.0, bytes.1, bytes.2))
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

pub fn color_or_default(hex: &str) -> Color32 {
    match parse_hex(hex) {
        Some(c) => c,
        None => {
            tracing::warn!("font color '{}' is invalid; using default green", hex);
            DEFAULT_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families() -> Vec<String> {
        vec!["DejaVuSans".into(), "Noto Sans".into()]
    }

    #[test]
    fn defaults_pick_first_family() {
        let form = SettingsForm::new(&FormDefaults::default(), &families());
        assert_eq!(form.font_family, "DejaVuSans");
        assert_eq!(form.time, "18:00");
        assert_eq!(form.font_size, 48);
        assert_eq!(form.end_message, "到点儿啦！");
    }

    #[test]
    fn no_families_falls_back() {
        let form = SettingsForm::new(&FormDefaults::default(), &[]);
        assert_eq!(form.font_family, FALLBACK_FAMILY);
    }

    #[test]
    fn invalid_default_color_is_replaced() {
        let defaults = FormDefaults {
            font_color: "green".into(),
            ..FormDefaults::default()
        };
        assert_eq!(SettingsForm::new(&defaults, &[]).font_color, "#00FF00");
    }

    #[test]
    fn size_is_clamped() {
        let defaults = FormDefaults {
            font_size: 400,
            ..FormDefaults::default()
        };
        assert_eq!(SettingsForm::new(&defaults, &[]).font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn empty_end_message_is_kept() {
        let mut form = SettingsForm::new(&FormDefaults::default(), &families());
        form.end_message.clear();
        let cfg = form.validate().unwrap();
        assert_eq!(cfg.end_message, "");
        assert!(cfg.font.bold);
    }

    #[test]
    fn invalid_time_is_rejected() {
        let mut form = SettingsForm::new(&FormDefaults::default(), &families());
        form.time = "25:61".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex("#00FF00"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(parse_hex("f00"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(to_hex(Color32::from_rgb(18, 52, 86)), "#123456");
        assert_eq!(color_or_default("nope"), DEFAULT_COLOR);
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        assert_eq!(parse_hex("#ééé"), None);
        // Three bytes, but slicing by byte would split the first char.
        assert_eq!(parse_hex("#éa"), None);
        assert_eq!(color_or_default("#éa"), DEFAULT_COLOR);
    }
}
