use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment start {0} is not in the future")]
    PastDateTime(NaiveDateTime),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Failure reported by the booking backend, message kept verbatim.
    #[error("{0}")]
    Remote(String),

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),
}

impl BookingError {
    /// Whether the error was raised locally, before any request left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_) | BookingError::PastDateTime(_) | BookingError::NotFound(_)
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
