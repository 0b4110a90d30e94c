use crate::error::StoreError;
use crate::store::Store;
use crate::types::{Booking, Slot};
use std::sync::Mutex;

/// Impersistent store, used when no data directory is configured. Everything
/// is gone on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Vec<Slot>>,
    bookings: Mutex<Vec<Booking>>,
    price_text: Mutex<String>,
}

impl Store for MemoryStore {
    fn load_slots(&self) -> Result<Vec<Slot>, StoreError> {
        Ok(self.slots.lock().unwrap().clone())
    }

    fn save_slots(&self, slots: &[Slot]) -> Result<(), StoreError> {
        *self.slots.lock().unwrap() = slots.to_vec();
        Ok(())
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.bookings.lock().unwrap().clone())
    }

    fn save_bookings(&self, bookings: &[Booking]) -> Result<(), StoreError> {
        *self.bookings.lock().unwrap() = bookings.to_vec();
        Ok(())
    }

    fn load_price_text(&self) -> Result<String, StoreError> {
        Ok(self.price_text.lock().unwrap().clone())
    }

    fn save_price_text(&self, text: &str) -> Result<(), StoreError> {
        *self.price_text.lock().unwrap() = text.to_string();
        Ok(())
    }
}
