use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a bookable offering: exact equality on all three components.
/// Two slots with overlapping but textually different time ranges are
/// independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub location: String,
    pub time_range: String,
}

/// An administrator-configured offering. The time range is kept textual
/// ("HH:MM - HH:MM"); only the calendar projection ever interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub location: String,
    pub time_range: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl Slot {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            location: self.location.clone(),
            time_range: self.time_range.clone(),
        }
    }
}

/// A user's claim on exactly one slot. References the slot by key only, so a
/// booking survives deletion of its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub location: String,
    pub time_range: String,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Booking {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            location: self.location.clone(),
            time_range: self.time_range.clone(),
        }
    }
}

/// A slot together with its current booked state, as listings report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    #[serde(flatten)]
    pub slot: Slot,
    pub booked: bool,
}

/// Listing filter. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFilter {
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

impl SlotFilter {
    pub fn accepts(&self, date: NaiveDate, location: &str) -> bool {
        self.date.map_or(true, |wanted| wanted == date)
            && self
                .location
                .as_deref()
                .map_or(true, |wanted| wanted == location)
    }
}
