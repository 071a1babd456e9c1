use std::collections::HashSet;

use crate::models::room::RoomRecord;

const ROOMS_JSON: &str = include_str!("../../data/rooms.json");

#[derive(Debug)]
pub enum CatalogError {
    Parse(String),
    DuplicateRoom(String),
    InvalidRoom(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(err) => write!(f, "Failed to parse room catalog: {}", err),
            CatalogError::DuplicateRoom(id) => write!(f, "Room id {} appears more than once", id),
            CatalogError::InvalidRoom(id) => write!(f, "Room {} has an invalid rate or capacity", id),
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<RoomRecord>,
}

impl RoomCatalog {
    /// The catalog shipped with the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(ROOMS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let rooms: Vec<RoomRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_rooms(rooms)
    }

    pub fn from_rooms(rooms: Vec<RoomRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for room in &rooms {
            if !seen.insert(room.id.as_str()) {
                return Err(CatalogError::DuplicateRoom(room.id.clone()));
            }
            if room.price_per_night <= 0.0 || room.max_guests == 0 {
                return Err(CatalogError::InvalidRoom(room.id.clone()));
            }
        }
        Ok(Self { rooms })
    }

    pub fn rooms(&self) -> &[RoomRecord] {
        &self.rooms
    }

    pub fn get(&self, id: &str) -> Option<&RoomRecord> {
        self.rooms.iter().find(|room| room.id == id)
    }
}
