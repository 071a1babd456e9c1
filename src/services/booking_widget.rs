use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    config::BookingConfig,
    models::{
        booking::{BookingDraft, BookingStep, ConfirmedBooking, Endpoint, GuestField},
        quote::PricingQuote,
        room::RoomRecord,
    },
    services::{
        calendar_service::{Clock, DateRangeSelector, VisibleMonth},
        guest_counter::GuestCounters,
        pricing_service::PricingService,
        step_sequencer::{StepOutcome, StepSequencer},
        submission::BookingSubmitter,
    },
};

pub type FinalizedListener = Box<dyn Fn(&BookingDraft, &PricingQuote) + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub disabled: bool,
    pub in_range: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub open: bool,
    pub selecting: Endpoint,
    pub visible_month: VisibleMonth,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepperView {
    pub value: u32,
    pub can_increment: bool,
    pub can_decrement: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlsView {
    pub can_advance: bool,
    pub can_retreat: bool,
    pub adults: StepperView,
    pub children: StepperView,
    pub rooms: StepperView,
}

/// Everything the presentation layer needs to render the widget.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub step: BookingStep,
    pub draft: BookingDraft,
    pub quote: Option<PricingQuote>,
    pub room: Option<RoomRecord>,
    pub over_capacity: bool,
    pub calendar: CalendarView,
    pub controls: ControlsView,
    pub confirmation: Option<ConfirmedBooking>,
    pub submission_error: Option<String>,
}

/// Owns the draft and all booking-flow state. Everything else reads from it
/// or mutates it through these methods.
pub struct BookingWidget {
    draft: BookingDraft,
    selector: DateRangeSelector,
    counters: GuestCounters,
    sequencer: StepSequencer,
    room: Option<RoomRecord>,
    nightly_rate: f64,
    tax_rate: f64,
    clock: Arc<dyn Clock>,
    submitter: Arc<dyn BookingSubmitter>,
    finalized_listeners: Vec<FinalizedListener>,
}

impl BookingWidget {
    pub fn new(
        config: &BookingConfig,
        clock: Arc<dyn Clock>,
        submitter: Arc<dyn BookingSubmitter>,
    ) -> Self {
        Self {
            draft: BookingDraft::default(),
            selector: DateRangeSelector::new(clock.today()),
            counters: config.counters(),
            sequencer: StepSequencer::new(),
            room: None,
            nightly_rate: config.nightly_rate,
            tax_rate: config.tax_rate,
            clock,
            submitter,
            finalized_listeners: Vec::new(),
        }
    }

    /// Prices the stay at `room`'s nightly rate.
    pub fn for_room(mut self, room: RoomRecord) -> Self {
        self.nightly_rate = room.price_per_night;
        self.room = Some(room);
        self
    }

    pub fn on_booking_finalized(&mut self, listener: FinalizedListener) {
        self.finalized_listeners.push(listener);
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn step(&self) -> BookingStep {
        self.sequencer.step()
    }

    pub fn selector(&self) -> &DateRangeSelector {
        &self.selector
    }

    pub fn confirmation(&self) -> Option<&ConfirmedBooking> {
        self.sequencer.confirmation()
    }

    /// Live quote for the current draft.
    pub fn quote(&self) -> Option<PricingQuote> {
        PricingService::compute_quote(
            self.draft.check_in,
            self.draft.check_out,
            self.draft.rooms,
            self.nightly_rate,
            self.tax_rate,
        )
    }

    fn is_locked(&self) -> bool {
        self.sequencer.step() == BookingStep::Confirm
    }

    /// Dates are only edited on the dates step. Changing them later would
    /// skip the dates guard.
    fn dates_locked(&self) -> bool {
        self.sequencer.step() != BookingStep::Dates
    }

    pub fn open_picker(&mut self, endpoint: Endpoint) {
        if !self.dates_locked() {
            self.selector.open(endpoint);
        }
    }

    pub fn close_picker(&mut self) {
        self.selector.close();
    }

    pub fn next_month(&mut self) {
        self.selector.next_month();
    }

    pub fn previous_month(&mut self) {
        self.selector.previous_month();
    }

    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        self.selector
            .is_date_disabled(&self.draft, date, self.clock.today())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.dates_locked() {
            return false;
        }
        let today = self.clock.today();
        self.selector.select_date(&mut self.draft, date, today)
    }

    pub fn change_count(&mut self, field: GuestField, delta: i32) -> u32 {
        if self.is_locked() {
            return self.stepper(field).value;
        }
        self.counters.change_count(&mut self.draft, field, delta)
    }

    pub fn advance(&mut self) -> StepOutcome {
        let quote = self.quote();
        let room_id = self.room.as_ref().map(|room| room.id.as_str());
        let outcome = self
            .sequencer
            .advance(&self.draft, quote, room_id, &*self.submitter);

        match outcome {
            StepOutcome::Moved { step: BookingStep::Guests } => self.selector.close(),
            StepOutcome::Moved { step: BookingStep::Confirm } => {
                if let Some(booking) = self.sequencer.confirmation() {
                    log::info!("Booking {} finalized", booking.reference);
                    for listener in &self.finalized_listeners {
                        listener(&booking.draft, &booking.quote);
                    }
                }
            }
            _ => {}
        }
        outcome
    }

    pub fn retreat(&mut self) -> StepOutcome {
        self.sequencer.retreat()
    }

    /// Starts over with an empty draft. Reaching `confirm` never does this
    /// on its own.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.selector = DateRangeSelector::new(self.clock.today());
        self.sequencer.reset();
    }

    fn stepper(&self, field: GuestField) -> StepperView {
        let value = match field {
            GuestField::Adults => self.draft.adults,
            GuestField::Children => self.draft.children,
            GuestField::Rooms => self.draft.rooms,
        };
        let editable = !self.is_locked();
        StepperView {
            value,
            can_increment: editable && self.counters.can_increment(&self.draft, field),
            can_decrement: editable && self.counters.can_decrement(&self.draft, field),
        }
    }

    pub fn view(&self) -> BookingView {
        let today = self.clock.today();
        let cells = self
            .selector
            .month_grid()
            .into_iter()
            .map(|date| match date {
                Some(d) => CalendarCell {
                    date,
                    disabled: self.selector.is_date_disabled(&self.draft, d, today),
                    in_range: DateRangeSelector::is_date_in_range(&self.draft, d),
                    selected: self.draft.check_in == Some(d) || self.draft.check_out == Some(d),
                },
                None => CalendarCell {
                    date: None,
                    disabled: true,
                    in_range: false,
                    selected: false,
                },
            })
            .collect();

        let quote = self.quote();
        let over_capacity = self
            .room
            .as_ref()
            .is_some_and(|room| !room.fits(self.draft.guests(), self.draft.rooms));

        BookingView {
            step: self.step(),
            draft: self.draft.clone(),
            quote,
            room: self.room.clone(),
            over_capacity,
            calendar: CalendarView {
                open: self.selector.open,
                selecting: self.selector.selecting,
                visible_month: self.selector.visible_month,
                cells,
            },
            controls: ControlsView {
                can_advance: self.sequencer.can_advance(&self.draft, quote.as_ref()),
                can_retreat: self.step() == BookingStep::Guests,
                adults: self.stepper(GuestField::Adults),
                children: self.stepper(GuestField::Children),
                rooms: self.stepper(GuestField::Rooms),
            },
            confirmation: self.sequencer.confirmation().cloned(),
            submission_error: self.sequencer.submission_error().map(str::to_string),
        }
    }
}
