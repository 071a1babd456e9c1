use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{
        booking::{BookingDraft, BookingStep, ConfirmedBooking},
        quote::PricingQuote,
    },
    services::submission::BookingSubmitter,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Moved { step: BookingStep },
    /// Guard failed or there is nowhere to go; nothing changed.
    Unchanged { step: BookingStep },
    SubmissionFailed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepSequencer {
    step: BookingStep,
    confirmation: Option<ConfirmedBooking>,
    submission_error: Option<String>,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self {
            step: BookingStep::Dates,
            confirmation: None,
            submission_error: None,
        }
    }
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn confirmation(&self) -> Option<&ConfirmedBooking> {
        self.confirmation.as_ref()
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn can_advance_from_dates(draft: &BookingDraft) -> bool {
        draft.has_dates() && draft.adults >= 1 && draft.rooms >= 1
    }

    pub fn can_advance(&self, draft: &BookingDraft, quote: Option<&PricingQuote>) -> bool {
        match self.step {
            BookingStep::Dates => Self::can_advance_from_dates(draft),
            BookingStep::Guests => quote.is_some(),
            BookingStep::Confirm => false,
        }
    }

    /// Moves one step forward when the current step's guard holds. Reaching
    /// `confirm` freezes `draft` and `quote` and passes them to `submitter`;
    /// a failed submission keeps the flow on `guests`.
    pub fn advance(
        &mut self,
        draft: &BookingDraft,
        quote: Option<PricingQuote>,
        room_id: Option<&str>,
        submitter: &dyn BookingSubmitter,
    ) -> StepOutcome {
        if !self.can_advance(draft, quote.as_ref()) {
            return StepOutcome::Unchanged { step: self.step };
        }

        match (self.step, quote) {
            (BookingStep::Dates, _) => {
                self.step = BookingStep::Guests;
            }
            (BookingStep::Guests, Some(quote)) => {
                let booking = ConfirmedBooking {
                    reference: Uuid::new_v4(),
                    room_id: room_id.map(str::to_string),
                    draft: draft.clone(),
                    quote,
                    confirmed_at: Utc::now(),
                };
                if let Err(err) = submitter.submit(&booking) {
                    log::warn!("Submission of booking {} failed: {}", booking.reference, err);
                    self.submission_error = Some(err.to_string());
                    return StepOutcome::SubmissionFailed {
                        reason: err.to_string(),
                    };
                }
                self.submission_error = None;
                self.confirmation = Some(booking);
                self.step = BookingStep::Confirm;
            }
            _ => return StepOutcome::Unchanged { step: self.step },
        }

        StepOutcome::Moved { step: self.step }
    }

    /// One step back, keeping every draft field. `dates` is the start and
    /// `confirm` is final, so both stay put.
    pub fn retreat(&mut self) -> StepOutcome {
        match self.step {
            BookingStep::Guests => {
                self.step = BookingStep::Dates;
                self.submission_error = None;
                StepOutcome::Moved { step: self.step }
            }
            BookingStep::Dates | BookingStep::Confirm => StepOutcome::Unchanged { step: self.step },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{pricing_service::PricingService, submission::SubmissionError};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct RecordingSubmitter {
        seen: Mutex<Vec<ConfirmedBooking>>,
        fail: bool,
    }

    impl RecordingSubmitter {
        fn new(fail: bool) -> Self {
            Self { seen: Mutex::new(Vec::new()), fail }
        }
    }

    impl BookingSubmitter for RecordingSubmitter {
        fn submit(&self, booking: &ConfirmedBooking) -> Result<(), SubmissionError> {
            self.seen.lock().unwrap().push(booking.clone());
            if self.fail {
                Err(SubmissionError::Unavailable("front desk offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn draft_with_dates() -> BookingDraft {
        BookingDraft {
            check_in: NaiveDate::from_ymd_opt(2026, 6, 10),
            check_out: NaiveDate::from_ymd_opt(2026, 6, 13),
            ..Default::default()
        }
    }

    fn quote_for(draft: &BookingDraft) -> Option<PricingQuote> {
        PricingService::compute_quote(draft.check_in, draft.check_out, draft.rooms, 295.0, 0.09)
    }

    #[test]
    fn test_dates_guard_blocks_without_check_out() {
        let submitter = RecordingSubmitter::new(false);
        let mut sequencer = StepSequencer::new();
        let draft = BookingDraft {
            check_in: NaiveDate::from_ymd_opt(2026, 6, 10),
            ..Default::default()
        };

        let outcome = sequencer.advance(&draft, None, None, &submitter);
        assert_eq!(outcome, StepOutcome::Unchanged { step: BookingStep::Dates });
        assert_eq!(sequencer.step(), BookingStep::Dates);
    }

    #[test]
    fn test_full_sequence_records_snapshot() {
        let submitter = RecordingSubmitter::new(false);
        let mut sequencer = StepSequencer::new();
        let draft = draft_with_dates();

        sequencer.advance(&draft, quote_for(&draft), None, &submitter);
        assert_eq!(sequencer.step(), BookingStep::Guests);

        let outcome = sequencer.advance(&draft, quote_for(&draft), Some("garden-suite"), &submitter);
        assert_eq!(outcome, StepOutcome::Moved { step: BookingStep::Confirm });

        let confirmation = sequencer.confirmation().unwrap();
        assert_eq!(confirmation.draft, draft);
        assert_eq!(confirmation.room_id.as_deref(), Some("garden-suite"));
        assert_eq!(submitter.seen.lock().unwrap().len(), 1);

        assert_eq!(
            sequencer.advance(&draft, quote_for(&draft), None, &submitter),
            StepOutcome::Unchanged { step: BookingStep::Confirm }
        );
        assert_eq!(sequencer.retreat(), StepOutcome::Unchanged { step: BookingStep::Confirm });
    }

    #[test]
    fn test_retreat_is_one_step() {
        let submitter = RecordingSubmitter::new(false);
        let mut sequencer = StepSequencer::new();
        let draft = draft_with_dates();

        assert_eq!(sequencer.retreat(), StepOutcome::Unchanged { step: BookingStep::Dates });
        sequencer.advance(&draft, quote_for(&draft), None, &submitter);
        assert_eq!(sequencer.retreat(), StepOutcome::Moved { step: BookingStep::Dates });
    }

    #[test]
    fn test_failed_submission_stays_on_guests() {
        let submitter = RecordingSubmitter::new(true);
        let mut sequencer = StepSequencer::new();
        let draft = draft_with_dates();

        sequencer.advance(&draft, quote_for(&draft), None, &submitter);
        let outcome = sequencer.advance(&draft, quote_for(&draft), None, &submitter);

        assert!(matches!(outcome, StepOutcome::SubmissionFailed { .. }));
        assert_eq!(sequencer.step(), BookingStep::Guests);
        assert!(sequencer.confirmation().is_none());
        assert!(sequencer.submission_error().unwrap().contains("front desk offline"));
    }
}
