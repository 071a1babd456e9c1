use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::quote::PricingQuote;

const SECONDS_PER_DAY: i64 = 86_400;

pub struct PricingService;

impl PricingService {
    /// Build a quote for the stay, or `None` while the dates are incomplete or
    /// not in increasing order.
    pub fn compute_quote(
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        rooms: u32,
        nightly_rate: f64,
        tax_rate: f64,
    ) -> Option<PricingQuote> {
        let (check_in, check_out) = (check_in?, check_out?);
        let nights = Self::nights_between(Self::midnight(check_in), Self::midnight(check_out));
        if nights == 0 {
            return None;
        }

        // Only the reported figures are rounded; each is derived from exact amounts.
        let rooms = rooms.max(1);
        let base_price = nightly_rate * rooms as f64;
        let subtotal = base_price * nights as f64;
        let taxes = subtotal * tax_rate;
        let total = subtotal + taxes;

        Some(PricingQuote {
            nights,
            rooms,
            nightly_rate,
            tax_rate,
            base_price: round_cents(base_price),
            subtotal: round_cents(subtotal),
            taxes: round_cents(taxes),
            total: round_cents(total),
        })
    }

    /// Nights covered by `[start, end)`; a partial day counts as a whole night.
    pub fn nights_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
        let seconds = end.signed_duration_since(start).num_seconds();
        if seconds <= 0 {
            return 0;
        }
        let nights = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        u32::try_from(nights).unwrap_or(u32::MAX)
    }

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc()
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
