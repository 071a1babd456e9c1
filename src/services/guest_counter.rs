use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingDraft, GuestField};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CounterLimits {
    pub min: u32,
    pub max: u32,
}

/// Bounds for the adults/children/rooms steppers. Lower bounds are fixed,
/// the caps are policy.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GuestCounters {
    pub adults: CounterLimits,
    pub children: CounterLimits,
    pub rooms: CounterLimits,
}

impl Default for GuestCounters {
    fn default() -> Self {
        Self::with_caps(10, 6, 5)
    }
}

impl GuestCounters {
    pub fn with_caps(max_adults: u32, max_children: u32, max_rooms: u32) -> Self {
        Self {
            adults: CounterLimits { min: 1, max: max_adults.max(1) },
            children: CounterLimits { min: 0, max: max_children },
            rooms: CounterLimits { min: 1, max: max_rooms.max(1) },
        }
    }

    pub fn limits(&self, field: GuestField) -> CounterLimits {
        match field {
            GuestField::Adults => self.adults,
            GuestField::Children => self.children,
            GuestField::Rooms => self.rooms,
        }
    }

    /// Moves `field` by `delta` and returns the resulting value. A change that
    /// would leave the field's limits is ignored.
    pub fn change_count(&self, draft: &mut BookingDraft, field: GuestField, delta: i32) -> u32 {
        let limits = self.limits(field);
        let slot = match field {
            GuestField::Adults => &mut draft.adults,
            GuestField::Children => &mut draft.children,
            GuestField::Rooms => &mut draft.rooms,
        };

        let candidate = i64::from(*slot) + i64::from(delta);
        if candidate >= i64::from(limits.min) && candidate <= i64::from(limits.max) {
            *slot = candidate as u32;
        }
        *slot
    }

    pub fn can_increment(&self, draft: &BookingDraft, field: GuestField) -> bool {
        Self::value(draft, field) < self.limits(field).max
    }

    pub fn can_decrement(&self, draft: &BookingDraft, field: GuestField) -> bool {
        Self::value(draft, field) > self.limits(field).min
    }

    fn value(draft: &BookingDraft, field: GuestField) -> u32 {
        match field {
            GuestField::Adults => draft.adults,
            GuestField::Children => draft.children,
            GuestField::Rooms => draft.rooms,
        }
    }
}
