use crate::error::StoreError;
use crate::types::{Booking, Slot};

/// Persistence collaborator with whole-collection replace semantics. Each
/// save overwrites the named collection entirely; there is no partial-update
/// API. Implementations must preserve record order across a load/save cycle.
#[cfg_attr(test, mockall::automock)]
pub trait Store: Send + 'static {
    fn load_slots(&self) -> Result<Vec<Slot>, StoreError>;
    fn save_slots(&self, slots: &[Slot]) -> Result<(), StoreError>;
    fn load_bookings(&self) -> Result<Vec<Booking>, StoreError>;
    fn save_bookings(&self, bookings: &[Booking]) -> Result<(), StoreError>;
    fn load_price_text(&self) -> Result<String, StoreError>;
    fn save_price_text(&self, text: &str) -> Result<(), StoreError>;
}
