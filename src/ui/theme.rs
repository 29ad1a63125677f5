use std::fmt;
use std::fs;
use std::str::FromStr;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::json_store::JsonStore;

/// Storage key holding the current [`ThemeFlag`].
pub const THEME_KEY: &str = "theme";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeFlag {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected 'dark' or 'light')")]
pub struct UnknownTheme(pub String);

impl ThemeFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeFlag::Dark => "dark",
            ThemeFlag::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeFlag::Dark => ThemeFlag::Light,
            ThemeFlag::Light => ThemeFlag::Dark,
        }
    }
}

impl FromStr for ThemeFlag {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(ThemeFlag::Dark),
            "light" => Ok(ThemeFlag::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub key_bg: String,
    pub key_fg: String,
    pub key_active_bg: String,
    pub key_active_fg: String,
    pub bar_filled: String,
}

impl Theme {
    /// A palette file in the user's config dir wins over the bundled one.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("kbmirror")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("ignoring {}: {e}", user_theme_path.display()),
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn for_flag(flag: ThemeFlag) -> Self {
        Self::load(flag.as_str()).unwrap_or_else(|| Self {
            name: flag.as_str().to_string(),
            colors: match flag {
                ThemeFlag::Dark => ThemeColors::dark(),
                ThemeFlag::Light => ThemeColors::light(),
            },
        })
    }
}

impl ThemeColors {
    fn dark() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            key_bg: "#313244".to_string(),
            key_fg: "#cdd6f4".to_string(),
            key_active_bg: "#f9e2af".to_string(),
            key_active_fg: "#1e1e2e".to_string(),
            bar_filled: "#89b4fa".to_string(),
        }
    }

    fn light() -> Self {
        Self {
            bg: "#eff1f5".to_string(),
            fg: "#4c4f69".to_string(),
            muted: "#8c8fa1".to_string(),
            accent: "#1e66f5".to_string(),
            border: "#bcc0cc".to_string(),
            header_bg: "#dce0e8".to_string(),
            header_fg: "#4c4f69".to_string(),
            key_bg: "#ccd0da".to_string(),
            key_fg: "#4c4f69".to_string(),
            key_active_bg: "#df8e1d".to_string(),
            key_active_fg: "#eff1f5".to_string(),
            bar_filled: "#1e66f5".to_string(),
        }
    }

    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        // Byte slicing below needs every char to be one byte.
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn key_bg(&self) -> Color { Self::parse_color(&self.key_bg) }
    pub fn key_fg(&self) -> Color { Self::parse_color(&self.key_fg) }
    pub fn key_active_bg(&self) -> Color { Self::parse_color(&self.key_active_bg) }
    pub fn key_active_fg(&self) -> Color { Self::parse_color(&self.key_active_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
}

/// Owns the persisted theme flag and the palette it selects.
pub struct ThemeManager {
    flag: ThemeFlag,
    theme: Theme,
}

impl ThemeManager {
    /// Read the persisted flag, writing the dark default first when none was
    /// ever stored. An unreadable value is replaced by the default.
    pub fn load(store: &mut JsonStore) -> Self {
        let flag = read_flag(store);
        Self {
            flag,
            theme: Theme::for_flag(flag),
        }
    }

    pub fn flag(&self) -> ThemeFlag {
        self.flag
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Flip between dark and light and persist the new flag.
    pub fn toggle(&mut self, store: &mut JsonStore) -> ThemeFlag {
        let next = self.flag.toggled();
        self.apply(next, store);
        next
    }

    pub fn apply(&mut self, flag: ThemeFlag, store: &mut JsonStore) {
        if let Err(e) = store.set(THEME_KEY, flag.as_str()) {
            log::warn!("could not persist theme '{flag}': {e:#}");
        }
        self.flag = flag;
        self.theme = Theme::for_flag(flag);
        log::info!("theme set to {flag}");
    }

    pub fn reload(&mut self, store: &mut JsonStore) {
        *self = Self::load(store);
    }
}

fn read_flag(store: &mut JsonStore) -> ThemeFlag {
    if store.get(THEME_KEY).is_none() {
        write_default(store);
    }
    let parsed = store.get(THEME_KEY).map(ThemeFlag::from_str);
    match parsed {
        Some(Ok(flag)) => flag,
        Some(Err(e)) => {
            log::warn!("{e}; resetting to {}", ThemeFlag::default());
            write_default(store);
            ThemeFlag::default()
        }
        None => ThemeFlag::default(),
    }
}

fn write_default(store: &mut JsonStore) {
    if let Err(e) = store.set(THEME_KEY, ThemeFlag::default().as_str()) {
        log::warn!("could not persist default theme: {e:#}");
    }
}
