use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RoomRecord {
    pub id: String,
    pub name: String,
    pub price_per_night: f64,
    pub max_guests: u32,
    #[serde(default)]
    pub size_sqm: Option<u32>,
    #[serde(default)]
    pub bed: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl RoomRecord {
    /// Whether `guests` fit across `rooms` units of this room type.
    pub fn fits(&self, guests: u32, rooms: u32) -> bool {
        guests <= self.max_guests.saturating_mul(rooms)
    }
}
