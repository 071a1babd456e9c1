use crate::models::booking::ConfirmedBooking;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    Rejected(String),
    Unavailable(String),
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Rejected(reason) => write!(f, "Booking rejected: {}", reason),
            SubmissionError::Unavailable(reason) => {
                write!(f, "Booking service unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Hands a finalized booking to whatever sits behind the front desk.
pub trait BookingSubmitter: Send + Sync {
    fn submit(&self, booking: &ConfirmedBooking) -> Result<(), SubmissionError>;
}

/// No reservation backend exists yet: record the intent and accept it.
pub struct LoggingSubmitter;

impl BookingSubmitter for LoggingSubmitter {
    fn submit(&self, booking: &ConfirmedBooking) -> Result<(), SubmissionError> {
        log::info!(
            "Booking {} accepted: {} night(s), {} room(s), {} adult(s), {} child(ren), total {:.2}",
            booking.reference,
            booking.quote.nights,
            booking.draft.rooms,
            booking.draft.adults,
            booking.draft.children,
            booking.quote.total
        );
        Ok(())
    }
}
