//! Day and hour forecast cards.
//!
//! Slots are bucketed by the calendar day they fall on at the forecast
//! location (UTC when upstream omits the offset). The middle slot of each day
//! stands in for the whole day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::dashboard::render::{glyph_for, DEFAULT_CONDITION_ID};
use crate::dashboard::units::TemperatureUnit;
use crate::models::{Forecast, ForecastEntry};

/// Maximum number of day cards rendered.
pub const MAX_DAY_CARDS: usize = 5;

/// Number of leading slots rendered as hour cards (12 × 3h).
pub const HOUR_CARD_COUNT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub date: NaiveDate,
    /// e.g. "Mon, 13 Oct"
    pub label: String,
    pub glyph: &'static str,
    pub temperature: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourCard {
    /// e.g. "15:00"
    pub label: String,
    pub glyph: &'static str,
    pub temperature: String,
}

/// Slots of one calendar day, in upstream order.
#[derive(Debug)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a ForecastEntry>,
}

impl<'a> DayGroup<'a> {
    /// Middle slot of the day (`len / 2`).
    pub fn representative(&self) -> &'a ForecastEntry {
        self.entries[self.entries.len() / 2]
    }
}

/// Local wall-clock time of a slot.
fn local_time(dt: i64, utc_offset_secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(dt.checked_add(utc_offset_secs)?, 0).map(|t| t.naive_utc())
}

/// Group slots by calendar day, days ordered by first appearance.
pub fn group_by_day(forecast: &Forecast) -> Vec<DayGroup<'_>> {
    let offset = forecast.utc_offset_secs();
    let mut groups: Vec<DayGroup<'_>> = Vec::new();

    for entry in &forecast.list {
        let Some(local) = local_time(entry.dt, offset) else {
            tracing::warn!("Skipping forecast slot with out-of-range timestamp {}", entry.dt);
            continue;
        };
        let date = local.date();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DayGroup {
                date,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Up to five day cards, one per calendar day.
pub fn day_cards(forecast: &Forecast, unit: TemperatureUnit) -> Vec<DayCard> {
    group_by_day(forecast)
        .into_iter()
        .take(MAX_DAY_CARDS)
        .map(|group| {
            let pick = group.representative();
            let condition = pick.condition();
            DayCard {
                date: group.date,
                label: group.date.format("%a, %-d %b").to_string(),
                glyph: glyph_for(pick.condition_id().unwrap_or(DEFAULT_CONDITION_ID)),
                temperature: unit.format(pick.main.temp),
                description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Hour cards for the first twelve slots.
pub fn hour_cards(forecast: &Forecast, unit: TemperatureUnit) -> Vec<HourCard> {
    let offset = forecast.utc_offset_secs();
    forecast
        .list
        .iter()
        .take(HOUR_CARD_COUNT)
        .map(|entry| {
            let label = local_time(entry.dt, offset)
                .map(|t| t.format("%H:00").to_string())
                .unwrap_or_else(|| "--:00".to_string());
            HourCard {
                label,
                glyph: glyph_for(entry.condition_id().unwrap_or(DEFAULT_CONDITION_ID)),
                temperature: unit.format(entry.main.temp),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, ForecastCity, ForecastReadings};

    /// 2026-10-19T00:00:00Z
    const MIDNIGHT_UTC: i64 = 1_792_368_000;
    const THREE_HOURS: i64 = 3 * 3600;

    fn slot(dt: i64, temp: f64, id: u16) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: ForecastReadings { temp },
            weather: vec![Condition {
                id: Some(id),
                main: String::new(),
                description: format!("cond {id}"),
            }],
            pop: 0.0,
        }
    }

    fn five_day_forecast() -> Forecast {
        Forecast {
            list: (0..40)
                .map(|i| slot(MIDNIGHT_UTC + i * THREE_HOURS, i as f64, 800))
                .collect(),
            city: None,
        }
    }

    #[test]
    fn test_forty_slots_yield_five_days_and_twelve_hours() {
        let forecast = five_day_forecast();
        let days = day_cards(&forecast, TemperatureUnit::Celsius);
        let hours = hour_cards(&forecast, TemperatureUnit::Celsius);
        assert_eq!(days.len(), 5);
        assert_eq!(hours.len(), 12);
    }

    #[test]
    fn test_middle_slot_represents_day() {
        let forecast = five_day_forecast();
        let days = day_cards(&forecast, TemperatureUnit::Celsius);
        // Eight slots per day; index 4 is 12:00 local.
        assert_eq!(days[0].temperature, "4°C");
        assert_eq!(days[1].temperature, "12°C");
        assert_eq!(days[0].label, "Mon, 19 Oct");
    }

    #[test]
    fn test_partial_days_are_grouped_separately() {
        // Starts at 18:00: 2 slots on the first day, then 8 per day.
        let start = MIDNIGHT_UTC + 18 * 3600;
        let forecast = Forecast {
            list: (0..40).map(|i| slot(start + i * THREE_HOURS, 0.0, 500)).collect(),
            city: None,
        };
        let groups = group_by_day(&forecast);
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[0].representative().dt, start + THREE_HOURS);
        assert_eq!(day_cards(&forecast, TemperatureUnit::Celsius).len(), MAX_DAY_CARDS);
    }

    #[test]
    fn test_city_offset_shifts_day_boundary() {
        let forecast = Forecast {
            list: vec![slot(MIDNIGHT_UTC - 3600, 0.0, 800), slot(MIDNIGHT_UTC, 0.0, 800)],
            city: Some(ForecastCity {
                name: "Chennai".into(),
                timezone: Some(19800),
            }),
        };
        // 23:00Z and 00:00Z are 04:30 and 05:30 on the same local day.
        assert_eq!(group_by_day(&forecast).len(), 1);
        let hours = hour_cards(&forecast, TemperatureUnit::Celsius);
        assert_eq!(hours[0].label, "04:00");
        assert_eq!(hours[1].label, "05:00");
    }

    #[test]
    fn test_hour_cards_follow_unit() {
        let forecast = Forecast {
            list: vec![slot(MIDNIGHT_UTC, 20.0, 211)],
            city: None,
        };
        let hours = hour_cards(&forecast, TemperatureUnit::Fahrenheit);
        assert_eq!(hours[0].temperature, "68°F");
        assert_eq!(hours[0].glyph, "⛈️");
        assert_eq!(hours[0].label, "00:00");
    }

    #[test]
    fn test_empty_forecast() {
        let forecast = Forecast::default();
        assert!(day_cards(&forecast, TemperatureUnit::Celsius).is_empty());
        assert!(hour_cards(&forecast, TemperatureUnit::Celsius).is_empty());
    }
}
