use thiserror::Error;

/// Failures of the persistence collaborator. Surfaced unmodified by the
/// engine; retry policy, if any, lives in the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored collection is not a valid json array: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Everything an engine operation can report. All of these are expected
/// conditions answered as values, never panics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a slot with this date, location and time range already exists")]
    DuplicateSlot,
    #[error("no open slot matches this date, location and time range")]
    SlotNotFound,
    #[error("this slot is already booked")]
    SlotAlreadyBooked,
    #[error("no booking with this id exists")]
    BookingNotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
