use serde::{Deserialize, Serialize};

/// Price breakdown derived from a booking draft. Never stored on its own.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PricingQuote {
    pub nights: u32,
    pub rooms: u32,
    pub nightly_rate: f64,
    pub tax_rate: f64,
    pub base_price: f64,
    pub subtotal: f64,
    pub taxes: f64,
    pub total: f64,
}
