use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Families able to render CJK text, matched against the lowercase family
/// name without spaces.
const CJK_FALLBACKS: &[&str] = &[
    "msyh",
    "microsoftyahei",
    "notosanscjk",
    "notosanssc",
    "sourcehansans",
    "pingfang",
    "simhei",
    "simsun",
    "wqy",
    "droidsansfallback",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFace {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

impl FontFace {
    pub fn path(&self, bold: bool) -> Option<&Path> {
        let (first, second) = if bold {
            (&self.bold, &self.regular)
        } else {
            (&self.regular, &self.bold)
        };
        first.as_deref().or(second.as_deref())
    }
}

/// Installed font families keyed by family name.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    faces: BTreeMap<String, FontFace>,
}

impl FontCatalog {
    /// Scan the platform font directories.
    pub fn system() -> Self {
        let catalog = Self::scan(&font_dirs());
        tracing::debug!(families = catalog.faces.len(), "font catalog loaded");
        catalog
    }

    pub fn scan(dirs: &[PathBuf]) -> Self {
        let mut faces: BTreeMap<String, FontFace> = BTreeMap::new();
        for dir in dirs {
            for entry in WalkDir::new(dir).follow_links(true).into_iter() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::debug!(path = %dir.display(), error = %e, "skipping font directory entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase());
                if !ext.is_some_and(|e| FONT_EXTENSIONS.contains(&e.as_str())) {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let Some((family, bold)) = split_family(stem) else {
                    continue;
                };
                let face = faces.entry(family).or_default();
                let slot = if bold { &mut face.bold } else { &mut face.regular };
                if slot.is_none() {
                    *slot = Some(path.to_path_buf());
                }
            }
        }
        Self { faces }
    }

    /// Family names, sorted and de-duplicated.
    pub fn families(&self) -> Vec<String> {
        self.faces.keys().cloned().collect()
    }

    pub fn face(&self, family: &str) -> Option<&FontFace> {
        self.faces.get(family)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// First installed family known to cover CJK glyphs.
    pub fn cjk_fallback(&self) -> Option<&str> {
        CJK_FALLBACKS.iter().find_map(|needle| {
            self.faces
                .keys()
                .find(|name| name.to_lowercase().replace(' ', "").contains(needle))
                .map(|s| s.as_str())
        })
    }
}

/// Split a font file stem into family name and bold flag.
///
/// Italic and other non-regular styles are skipped.
pub fn split_family(stem: &str) -> Option<(String, bool)> {
    let stem = stem.trim();
    if stem.is_empty() {
        return None;
    }
    let (family, style) = match stem.rsplit_once('-') {
        Some((f, s)) if !f.is_empty() => (f, s.to_ascii_lowercase()),
        _ => (stem, String::new()),
    };
    if style.contains("italic") || style.contains("oblique") {
        return None;
    }
    match style.as_str() {
        "" | "regular" | "book" | "roman" | "normal" | "medium" => Some((family.to_string(), false)),
        s if s.contains("bold") => Some((family.to_string(), true)),
        _ => None,
    }
}

pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(d) = dirs_next::font_dir() {
        dirs.push(d);
    }
    #[cfg(target_os = "windows")]
    {
        let windir = std::env::var("WINDIR").unwrap_or_else(|_| "C:\\Windows".into());
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    #[cfg(target_os = "macos")]
    {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
    }
    dirs.retain(|d| d.is_dir());
    dirs
}

/// egui panics on font data it cannot parse, so check the sfnt/collection magic first.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(0..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

#[derive(Debug, Clone, Copy)]
enum Registration {
    Ready { frame: u64 },
    Failed,
}

/// Loads catalog families into egui on first use.
pub struct FontRegistry {
    catalog: FontCatalog,
    definitions: FontDefinitions,
    registered: HashMap<String, Registration>,
}

impl FontRegistry {
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            definitions: FontDefinitions::default(),
            registered: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Append a CJK capable font to the built-in families so the default end
    /// message renders in every font.
    pub fn install_fallback(&mut self, ctx: &egui::Context) {
        let Some(family) = self.catalog.cjk_fallback().map(str::to_string) else {
            tracing::debug!("no CJK fallback font found");
            return;
        };
        let Some(key) = self.load_data(&family, false) else {
            return;
        };
        for fam in [FontFamily::Proportional, FontFamily::Monospace] {
            self.definitions
                .families
                .entry(fam)
                .or_default()
                .push(key.clone());
        }
        ctx.set_fonts(self.definitions.clone());
        tracing::info!(%family, "installed fallback font");
    }

    /// Resolve the egui family for `family`, registering it if needed.
    ///
    /// Newly registered families only become usable on the next frame, so the
    /// default proportional family is returned until then.
    pub fn font_family(&mut self, ctx: &egui::Context, family: &str, bold: bool) -> FontFamily {
        let key = family_key(family, bold);
        let frame = ctx.frame_nr();
        match self.registered.get(&key) {
            Some(Registration::Ready { frame: at }) if frame > *at => {
                return FontFamily::Name(key.into());
            }
            Some(_) => return FontFamily::Proportional,
            None => {}
        }
        let Some(data_key) = self.load_data(family, bold) else {
            self.registered.insert(key, Registration::Failed);
            return FontFamily::Proportional;
        };
        let mut list = vec![data_key];
        if let Some(defaults) = self.definitions.families.get(&FontFamily::Proportional) {
            list.extend(defaults.iter().cloned());
        }
        self.definitions
            .families
            .insert(FontFamily::Name(key.clone().into()), list);
        ctx.set_fonts(self.definitions.clone());
        ctx.request_repaint();
        tracing::debug!(%family, bold, "registered font family");
        self.registered.insert(key, Registration::Ready { frame });
        FontFamily::Proportional
    }

    fn load_data(&mut self, family: &str, bold: bool) -> Option<String> {
        let path = self.catalog.face(family)?.path(bold)?.to_path_buf();
        let key = format!("file:{}", path.display());
        if self.definitions.font_data.contains_key(&key) {
            return Some(key);
        }
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read font");
                return None;
            }
        };
        if !looks_like_font(&bytes) {
            tracing::warn!(path = %path.display(), "not a TrueType/OpenType font");
            return None;
        }
        self.definitions
            .font_data
            .insert(key.clone(), FontData::from_owned(bytes));
        Some(key)
    }
}

fn family_key(family: &str, bold: bool) -> String {
    if bold {
        format!("{family} Bold")
    } else {
        family.to_string()
    }
}
