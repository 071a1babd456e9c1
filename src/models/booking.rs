use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::quote::PricingQuote;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: 1,
            children: 0,
            rooms: 1,
        }
    }
}

impl BookingDraft {
    pub fn has_dates(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    pub fn guests(&self) -> u32 {
        self.adults + self.children
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GuestField {
    Adults,
    Children,
    Rooms,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Dates,
    Guests,
    Confirm,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            BookingStep::Dates => Some(BookingStep::Guests),
            BookingStep::Guests => Some(BookingStep::Confirm),
            BookingStep::Confirm => None,
        }
    }
}

/// Which end of the stay the date picker is currently choosing.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    #[default]
    CheckIn,
    CheckOut,
}

/// Frozen copy of the draft and quote taken when the flow reaches `confirm`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfirmedBooking {
    pub reference: Uuid,
    pub room_id: Option<String>,
    pub draft: BookingDraft,
    pub quote: PricingQuote,
    pub confirmed_at: DateTime<Utc>,
}
