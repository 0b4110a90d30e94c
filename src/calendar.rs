use crate::types::SlotStatus;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const OPEN_COLOR: &str = "#2e7d32";
pub const BOOKED_COLOR: &str = "#c62828";

const OPEN_GLYPH: char = '○';
const BOOKED_GLYPH: char = '●';

/// Longest location prefix shown in an event title.
const ABBREVIATION_LEN: usize = 6;

/// What a calendar widget needs to render one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
}

/// Projects slot listings into calendar events. Pure, stateless, and total:
/// a malformed time range degrades to the fallback 08:00 - 09:00 hour
/// instead of failing the feed.
pub fn events(statuses: &[SlotStatus]) -> Vec<CalendarEvent> {
    statuses.iter().map(event_for).collect()
}

fn event_for(status: &SlotStatus) -> CalendarEvent {
    let slot = &status.slot;
    let (start, end) = parse_time_range(&slot.time_range).unwrap_or_else(fallback_range);

    let abbreviation: String = slot.location.chars().take(ABBREVIATION_LEN).collect();
    let glyph = if status.booked { BOOKED_GLYPH } else { OPEN_GLYPH };
    let mut title = format!("{abbreviation} {glyph}");
    if let Some(note) = slot.note.as_deref() {
        if !note.trim().is_empty() {
            title.push(' ');
            title.push_str(note.trim());
        }
    }

    CalendarEvent {
        title,
        start: slot.date.and_time(start),
        end: slot.date.and_time(end),
        color: if status.booked { BOOKED_COLOR } else { OPEN_COLOR }.to_string(),
    }
}

fn parse_time_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (start, end) = text.split_once('-')?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    Some((start, end))
}

fn fallback_range() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
    )
}
