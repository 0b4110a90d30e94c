use crate::error::Error;
use crate::store::Store;
use crate::types::{Booking, Slot, SlotFilter, SlotKey, SlotStatus};
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

/// The availability engine: configured slots, bookings, and the
/// one-booking-per-slot invariant. Every mutation runs as a single
/// read-modify-write transaction under the store lock, so the booked check
/// happens immediately before the append and two racing bookers can never
/// both claim the same key.
pub struct AvailabilityEngine<S> {
    store: Mutex<S>,
    require_phone: bool,
}

impl<S: Store> AvailabilityEngine<S> {
    pub fn new(store: S, require_phone: bool) -> Self {
        Self {
            store: Mutex::new(store),
            require_phone,
        }
    }

    /// All configured slots matching the filter, in append order, each with
    /// its booked state. Booked slots are reported, not filtered out.
    pub fn list_slots(&self, filter: &SlotFilter) -> Result<Vec<SlotStatus>, Error> {
        let store = self.store.lock().unwrap();
        let slots = store.load_slots()?;
        let bookings = store.load_bookings()?;
        drop(store);

        let taken: HashSet<SlotKey> = bookings.iter().map(Booking::slot_key).collect();
        Ok(slots
            .into_iter()
            .filter(|slot| filter.accepts(slot.date, &slot.location))
            .map(|slot| SlotStatus {
                booked: taken.contains(&slot.key()),
                slot,
            })
            .collect())
    }

    pub fn is_booked(&self, key: &SlotKey) -> Result<bool, Error> {
        let bookings = self.store.lock().unwrap().load_bookings()?;
        Ok(bookings.iter().any(|booking| booking.slot_key() == *key))
    }

    /// Rejects a second slot with an identical key; the slot set never gains
    /// a duplicate.
    pub fn add_slot(&self, slot: Slot) -> Result<(), Error> {
        let store = self.store.lock().unwrap();
        let mut slots = store.load_slots()?;
        if slots.iter().any(|existing| existing.key() == slot.key()) {
            return Err(Error::DuplicateSlot);
        }
        slots.push(slot);
        store.save_slots(&slots)?;
        Ok(())
    }

    /// Removes the slot with this key. Never cascades to bookings; a booking
    /// for a removed slot stays listed.
    pub fn remove_slot(&self, key: &SlotKey) -> Result<(), Error> {
        let store = self.store.lock().unwrap();
        let mut slots = store.load_slots()?;
        let before = slots.len();
        slots.retain(|slot| slot.key() != *key);
        if slots.len() == before {
            return Err(Error::SlotNotFound);
        }
        store.save_slots(&slots)?;
        Ok(())
    }

    /// Empties the slot set. Bookings are untouched.
    pub fn clear_all_slots(&self) -> Result<(), Error> {
        self.store.lock().unwrap().save_slots(&[])?;
        Ok(())
    }

    /// Books a slot for a customer, first writer wins. The slot must
    /// currently be configured; a vanished slot is not bookable.
    pub fn book_slot(
        &self,
        key: &SlotKey,
        customer_name: &str,
        phone: Option<String>,
        note: Option<String>,
    ) -> Result<Booking, Error> {
        if customer_name.trim().is_empty() {
            return Err(Error::InvalidInput("customer name must not be blank".into()));
        }
        if self.require_phone && phone.as_deref().map_or(true, |p| p.trim().is_empty()) {
            return Err(Error::InvalidInput("phone number is required".into()));
        }

        let store = self.store.lock().unwrap();
        let slots = store.load_slots()?;
        if !slots.iter().any(|slot| slot.key() == *key) {
            return Err(Error::SlotNotFound);
        }
        let mut bookings = store.load_bookings()?;
        if bookings.iter().any(|booking| booking.slot_key() == *key) {
            return Err(Error::SlotAlreadyBooked);
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            date: key.date,
            location: key.location.clone(),
            time_range: key.time_range.clone(),
            customer_name: customer_name.trim().to_string(),
            phone,
            note,
        };
        bookings.push(booking.clone());
        store.save_bookings(&bookings)?;
        Ok(booking)
    }

    /// Cancelling frees the slot key for a new booking.
    pub fn cancel_booking(&self, id: Uuid) -> Result<(), Error> {
        let store = self.store.lock().unwrap();
        let mut bookings = store.load_bookings()?;
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        if bookings.len() == before {
            return Err(Error::BookingNotFound);
        }
        store.save_bookings(&bookings)?;
        Ok(())
    }

    pub fn list_bookings(&self, filter: &SlotFilter) -> Result<Vec<Booking>, Error> {
        let bookings = self.store.lock().unwrap().load_bookings()?;
        Ok(bookings
            .into_iter()
            .filter(|booking| filter.accepts(booking.date, &booking.location))
            .collect())
    }

    pub fn price_text(&self) -> Result<String, Error> {
        Ok(self.store.lock().unwrap().load_price_text()?)
    }

    pub fn set_price_text(&self, text: &str) -> Result<(), Error> {
        self.store.lock().unwrap().save_price_text(text)?;
        Ok(())
    }
}
