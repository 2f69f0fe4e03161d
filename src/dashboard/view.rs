//! Dashboard view state and the view model derived from it.
//!
//! `ViewState` holds the last applied (current, forecast) pair together with
//! the display toggles. Everything shown on screen is recomputed from it by
//! [`ViewState::render`]; toggles never trigger a fetch.
//!
//! Searches may overlap. Each one takes a [`SearchTicket`] from
//! [`ViewState::begin_search`]; only the newest ticket may apply its result,
//! so a slow earlier response cannot overwrite a later one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::alerts::detect_alert;
use crate::dashboard::forecast::{day_cards, hour_cards, DayCard, HourCard};
use crate::dashboard::render::{capitalize, glyph_for, palette, Palette, Theme, DEFAULT_CONDITION_ID};
use crate::dashboard::units::TemperatureUnit;
use crate::models::{CurrentConditions, Forecast};

/// Generation number of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// A fetched pair and when it was applied.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub current: CurrentConditions,
    pub forecast: Forecast,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub unit: TemperatureUnit,
    /// `None` lets the weather pick the background.
    pub theme: Option<Theme>,
    last: Option<Snapshot>,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            theme: Some(Theme::Dark),
            last: None,
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn new(unit: TemperatureUnit, theme: Option<Theme>) -> Self {
        Self {
            unit,
            theme,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }

    /// Issue a ticket for a new search, superseding all earlier ones.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.generation += 1;
        SearchTicket(self.generation)
    }

    /// Apply a fetched pair if `ticket` is still the newest. Returns whether
    /// the pair was applied.
    pub fn apply(
        &mut self,
        ticket: SearchTicket,
        current: CurrentConditions,
        forecast: Forecast,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                "Discarding stale search result (ticket {}, latest {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.last = Some(Snapshot {
            current,
            forecast,
            updated_at: Utc::now(),
        });
        true
    }

    /// Flip Celsius/Fahrenheit. A no-op until something has been fetched.
    pub fn toggle_unit(&mut self) -> bool {
        if self.last.is_none() {
            return false;
        }
        self.unit = self.unit.toggled();
        true
    }

    /// Flip dark/light. Following the weather switches to dark first.
    pub fn toggle_theme(&mut self) {
        self.theme = Some(self.theme.map(Theme::toggled).unwrap_or(Theme::Dark));
    }

    /// Derive the full dashboard, if a pair has been applied.
    pub fn render(&self) -> Option<DashboardView> {
        let snapshot = self.last.as_ref()?;
        Some(DashboardView::build(snapshot, self.unit, self.theme))
    }
}

/// Main conditions card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    /// "{name}, {country}"
    pub title: String,
    pub glyph: &'static str,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub updated: String,
}

/// Everything the dashboard displays for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub current: CurrentCard,
    pub palette: Palette,
    pub alert: Option<String>,
    pub days: Vec<DayCard>,
    pub hours: Vec<HourCard>,
}

impl DashboardView {
    fn build(snapshot: &Snapshot, unit: TemperatureUnit, theme: Option<Theme>) -> Self {
        let current = &snapshot.current;
        let condition = current.condition();
        let condition_id = condition.and_then(|c| c.id).unwrap_or(DEFAULT_CONDITION_ID);
        let description = condition.map(|c| c.description.as_str()).unwrap_or("");

        let card = CurrentCard {
            title: format!(
                "{}, {}",
                current.name,
                current.sys.country.as_deref().unwrap_or("")
            ),
            glyph: glyph_for(condition_id),
            description: capitalize(description),
            temperature: unit.format(current.main.temp),
            feels_like: format!("Feels like {}", unit.format(current.main.feels_like)),
            humidity: format!("Humidity {}%", current.main.humidity),
            wind: format!("{}", current.wind.speed),
            pressure: format!("{}", current.main.pressure),
            visibility: format!("{:.1} km", current.visibility / 1000.0),
            sunrise: local_clock(current.sys.sunrise, current.timezone),
            sunset: local_clock(current.sys.sunset, current.timezone),
            updated: format!(
                "Last updated: {}",
                snapshot.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        };

        Self {
            current: card,
            palette: palette(theme, condition_id),
            alert: detect_alert(current, &snapshot.forecast),
            days: day_cards(&snapshot.forecast, unit),
            hours: hour_cards(&snapshot.forecast, unit),
        }
    }
}

/// Wall-clock time at the observed location, e.g. "Tue, 14 Oct 2025 06:03:20".
fn local_clock(unix: i64, utc_offset_secs: i64) -> String {
    unix.checked_add(utc_offset_secs)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.format("%a, %d %b %Y %H:%M:%S").to_string())
        .unwrap_or_default()
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.current;
        if let Some(alert) = &self.alert {
            writeln!(f, "⚠️  {}", alert)?;
            writeln!(f)?;
        }
        writeln!(f, "{}  {}", c.glyph, c.title)?;
        writeln!(f, "   {}  {}", c.temperature, c.description)?;
        writeln!(f, "   {} · {}", c.feels_like, c.humidity)?;
        writeln!(
            f,
            "   Wind {} m/s · Pressure {} hPa · Visibility {}",
            c.wind, c.pressure, c.visibility
        )?;
        writeln!(f, "   Sunrise {} · Sunset {}", c.sunrise, c.sunset)?;
        writeln!(f, "   {}", c.updated)?;

        writeln!(f)?;
        writeln!(f, "Next days")?;
        for day in &self.days {
            writeln!(
                f,
                "   {:<12} {} {:>6}  {}",
                day.label, day.glyph, day.temperature, day.description
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Next hours")?;
        for hour in &self.hours {
            writeln!(f, "   {} {} {:>6}", hour.label, hour.glyph, hour.temperature)?;
        }
        Ok(())
    }
}
