use crate::configuration::Configuration;
use crate::error::StoreError;
use crate::store::Store;
use crate::types::{Booking, Slot};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

pub struct CountingStoreInner {
    pub fail: AtomicBool,
    pub calls_to_load_slots: AtomicU64,
    pub calls_to_save_slots: AtomicU64,
    pub calls_to_load_bookings: AtomicU64,
    pub calls_to_save_bookings: AtomicU64,
    pub calls_to_load_price_text: AtomicU64,
    pub calls_to_save_price_text: AtomicU64,
    pub slots: Mutex<Vec<Slot>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub price_text: Mutex<String>,
}

/// Store double that records how often each operation is hit and can be
/// switched into failure mode.
#[derive(Clone)]
pub struct CountingStore(pub Arc<CountingStoreInner>);

impl CountingStore {
    pub fn new() -> Self {
        Self(Arc::new(CountingStoreInner {
            fail: AtomicBool::new(false),
            calls_to_load_slots: AtomicU64::default(),
            calls_to_save_slots: AtomicU64::default(),
            calls_to_load_bookings: AtomicU64::default(),
            calls_to_save_bookings: AtomicU64::default(),
            calls_to_load_price_text: AtomicU64::default(),
            calls_to_save_price_text: AtomicU64::default(),
            slots: Mutex::default(),
            bookings: Mutex::default(),
            price_text: Mutex::default(),
        }))
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.0.fail.load(Ordering::SeqCst) {
            false => Ok(()),
            true => Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "supposed to fail",
            ))),
        }
    }
}

impl Store for CountingStore {
    fn load_slots(&self) -> Result<Vec<Slot>, StoreError> {
        self.0.calls_to_load_slots.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.slots.lock().unwrap().clone())
    }

    fn save_slots(&self, slots: &[Slot]) -> Result<(), StoreError> {
        self.0.calls_to_save_slots.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.0.slots.lock().unwrap() = slots.to_vec();
        Ok(())
    }

    fn load_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.0.calls_to_load_bookings.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn save_bookings(&self, bookings: &[Booking]) -> Result<(), StoreError> {
        self.0.calls_to_save_bookings.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.0.bookings.lock().unwrap() = bookings.to_vec();
        Ok(())
    }

    fn load_price_text(&self) -> Result<String, StoreError> {
        self.0
            .calls_to_load_price_text
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.price_text.lock().unwrap().clone())
    }

    fn save_price_text(&self, text: &str) -> Result<(), StoreError> {
        self.0
            .calls_to_save_price_text
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.0.price_text.lock().unwrap() = text.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestConfiguration {
    pub require_phone: bool,
}

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        "1234".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn data_dir(&self) -> Option<PathBuf> {
        None
    }

    fn require_phone(&self) -> bool {
        self.require_phone
    }
}
