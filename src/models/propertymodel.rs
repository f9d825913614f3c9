use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub booked: bool,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    // Minor currency units
    pub price: i64,

    // Location, all required for properties
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,

    // JSONB array of image URLs
    pub images: JsonValue,

    // JSONB array of {date, booked} viewing slots
    pub slots: JsonValue,

    pub category_id: Uuid,
    pub subcategory: Option<String>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn slot_list(&self) -> Vec<TimeSlot> {
        serde_json::from_value(self.slots.clone()).unwrap_or_default()
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SlotError {
    #[error("No slot exists for that date")]
    NotFound,
    #[error("Slot is already booked")]
    AlreadyBooked,
    #[error("A slot already exists for that date")]
    Duplicate,
}

/// Append an unbooked slot, keeping the list ordered by date.
pub fn add_slot(mut slots: Vec<TimeSlot>, date: NaiveDate) -> Result<Vec<TimeSlot>, SlotError> {
    if slots.iter().any(|s| s.date == date) {
        return Err(SlotError::Duplicate);
    }
    slots.push(TimeSlot { date, booked: false });
    slots.sort_by_key(|s| s.date);
    Ok(slots)
}

/// Mark the slot on `date` booked. Booking an already-booked slot fails.
pub fn book_slot(mut slots: Vec<TimeSlot>, date: NaiveDate) -> Result<Vec<TimeSlot>, SlotError> {
    let slot = slots
        .iter_mut()
        .find(|s| s.date == date)
        .ok_or(SlotError::NotFound)?;

    if slot.booked {
        return Err(SlotError::AlreadyBooked);
    }
    slot.booked = true;
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn add_slot_keeps_dates_ordered_and_unique() {
        let slots = add_slot(vec![], date("2026-09-02")).unwrap();
        let slots = add_slot(slots, date("2026-09-01")).unwrap();
        assert_eq!(slots[0].date, date("2026-09-01"));
        assert_eq!(slots[1].date, date("2026-09-02"));
        assert_eq!(
            add_slot(slots, date("2026-09-01")),
            Err(SlotError::Duplicate)
        );
    }

    #[test]
    fn booking_twice_fails() {
        let slots = add_slot(vec![], date("2026-09-01")).unwrap();
        let slots = book_slot(slots, date("2026-09-01")).unwrap();
        assert!(slots[0].booked);
        assert_eq!(
            book_slot(slots, date("2026-09-01")),
            Err(SlotError::AlreadyBooked)
        );
    }

    #[test]
    fn booking_missing_date_fails() {
        assert_eq!(
            book_slot(vec![], date("2026-09-01")),
            Err(SlotError::NotFound)
        );
    }
}
