use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingDraft, Endpoint};

/// Source of "today" for every calendar-day decision.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Uses the UTC calendar date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct VisibleMonth {
    pub year: i32,
    /// 1-based, January = 1.
    pub month: u32,
}

impl VisibleMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { month: self.month + 1, ..self }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { month: self.month - 1, ..self }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(self) -> u32 {
        match (self.first_day(), self.next().first_day()) {
            (Some(first), Some(following)) => {
                u32::try_from(following.signed_duration_since(first).num_days()).unwrap_or(0)
            }
            _ => 0,
        }
    }
}

/// Picker state for choosing a check-in/check-out range. The dates themselves
/// live on the [`BookingDraft`] owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct DateRangeSelector {
    pub selecting: Endpoint,
    pub visible_month: VisibleMonth,
    pub open: bool,
}

impl DateRangeSelector {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selecting: Endpoint::CheckIn,
            visible_month: VisibleMonth::containing(today),
            open: false,
        }
    }

    pub fn open(&mut self, endpoint: Endpoint) {
        self.selecting = endpoint;
        self.open = true;
    }

    /// Drops the in-progress endpoint pointer. Committed dates are left alone.
    pub fn close(&mut self) {
        self.selecting = Endpoint::CheckIn;
        self.open = false;
    }

    pub fn next_month(&mut self) {
        self.visible_month = self.visible_month.next();
    }

    pub fn previous_month(&mut self) {
        self.visible_month = self.visible_month.previous();
    }

    /// Applies a click on `date`. Returns `false` and changes nothing when the
    /// date is disabled.
    pub fn select_date(&mut self, draft: &mut BookingDraft, date: NaiveDate, today: NaiveDate) -> bool {
        if self.is_date_disabled(draft, date, today) {
            return false;
        }

        match self.selecting {
            Endpoint::CheckIn => {
                draft.check_in = Some(date);
                if draft.check_out.is_some_and(|check_out| check_out <= date) {
                    draft.check_out = None;
                }
                self.selecting = Endpoint::CheckOut;
            }
            Endpoint::CheckOut => {
                draft.check_out = Some(date);
                self.close();
            }
        }
        true
    }

    pub fn is_date_disabled(&self, draft: &BookingDraft, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return true;
        }
        match (self.selecting, draft.check_in) {
            (Endpoint::CheckOut, Some(check_in)) => date <= check_in,
            _ => false,
        }
    }

    pub fn is_date_in_range(draft: &BookingDraft, date: NaiveDate) -> bool {
        match (draft.check_in, draft.check_out) {
            (Some(check_in), Some(check_out)) => check_in < date && date < check_out,
            _ => false,
        }
    }

    /// Cells for the visible month: `None` for the leading blanks before the
    /// first weekday (Sunday = 0), then one cell per day.
    pub fn month_grid(&self) -> Vec<Option<NaiveDate>> {
        let Some(first) = self.visible_month.first_day() else {
            return Vec::new();
        };
        let leading = first.weekday().num_days_from_sunday() as usize;
        let days = self.visible_month.days_in_month();

        let mut cells = vec![None; leading];
        cells.extend((0..days).map(|offset| first.checked_add_days(chrono::Days::new(offset as u64))));
        cells
    }
}
