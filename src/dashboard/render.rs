//! Condition glyphs, background gradients and theme colours.

use serde::Serialize;

/// Condition id assumed when upstream omits one.
pub const DEFAULT_CONDITION_ID: u16 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    fn background(self) -> &'static str {
        match self {
            Self::Dark => "linear-gradient(180deg,#071029,#0f2b45)",
            Self::Light => "linear-gradient(180deg,#e0f7fa,#b2ebf2)",
        }
    }
}

/// Resolved page colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
}

/// Glyph for an OpenWeatherMap condition id.
pub fn glyph_for(condition_id: u16) -> &'static str {
    match condition_id {
        200..=299 => "⛈️",
        300..=599 => "🌧️",
        600..=699 => "❄️",
        700..=799 => "🌫️",
        800 => "☀️",
        801 => "🌤️",
        _ => "☁️",
    }
}

/// Gradient derived from the weather alone.
pub fn weather_background(condition_id: u16) -> &'static str {
    match condition_id {
        200..=599 => "linear-gradient(180deg,#0b3a59,#06324a)",
        600..=699 => "linear-gradient(180deg,#2b5b7a,#1c3f59)",
        800 => "linear-gradient(180deg,#ffd86b,#66ccff)",
        _ => "linear-gradient(180deg,#334e68,#0f2b45)",
    }
}

/// Page colours; an explicit theme overrides the weather gradient.
pub fn palette(theme: Option<Theme>, condition_id: u16) -> Palette {
    let background = match theme {
        Some(theme) => theme.background(),
        None => weather_background(condition_id),
    };
    let text = match theme {
        Some(Theme::Light) => "#000",
        _ => "#e6eef8",
    };
    Palette { background, text }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
