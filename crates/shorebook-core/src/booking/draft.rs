//! The mutable booking draft and its validation rules.

use chrono::NaiveDate;
use thiserror::Error;

/// Upper bound for the guests field, matching the guest picker range.
pub const MAX_GUESTS: u32 = 20;

/// Upper bound for the rooms field, matching the room picker range.
pub const MAX_ROOMS: u32 = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a room type")]
    MissingRoom,

    #[error("Please select a check-in date")]
    MissingCheckIn,

    #[error("Please select a check-out date")]
    MissingCheckOut,

    #[error("Check-out must be after check-in")]
    CheckOutNotAfterCheckIn,

    #[error("Please enter the number of guests")]
    MissingGuests,

    #[error("Please enter the number of rooms")]
    MissingRooms,
}

/// A bounded positive-integer form field edited as a string.
///
/// Mirrors the digit-filter behavior of the number inputs: non-digit input
/// is ignored outright (the prior value stays), an empty string clears the
/// field, and values above the bound are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberField {
    value: Option<u32>,
    max: u32,
}

impl NumberField {
    pub fn new(max: u32) -> Self {
        Self { value: None, max }
    }

    /// Apply raw text input. Returns true if the field changed.
    pub fn apply(&mut self, input: &str) -> bool {
        if input.is_empty() {
            let changed = self.value.is_some();
            self.value = None;
            return changed;
        }
        if !input.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        match input.parse::<u32>() {
            Ok(n) if n <= self.max => {
                let changed = self.value != Some(n);
                self.value = Some(n);
                changed
            }
            _ => false,
        }
    }

    /// Set from a picker selection. Out-of-range values are ignored.
    pub fn set(&mut self, n: u32) {
        if n >= 1 && n <= self.max {
            self.value = Some(n);
        }
    }

    pub fn get(&self) -> Option<u32> {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Display text for the input box ("" when unset).
    pub fn text(&self) -> String {
        self.value.map(|n| n.to_string()).unwrap_or_default()
    }
}

/// Mutable booking intent under construction. Owned exclusively by the form
/// controller; discarded on reset after a successful submission.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: NumberField,
    pub rooms: NumberField,
    pub selected_room: Option<String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self {
            check_in: None,
            check_out: None,
            guests: NumberField::new(MAX_GUESTS),
            rooms: NumberField::new(MAX_ROOMS),
            selected_room: None,
        }
    }

    /// Nights between check-in and check-out. `None` until both dates are
    /// set; never zero or negative for a draft that passes validation.
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_days()),
            _ => None,
        }
    }

    /// Nights used for pricing: 1 until a valid date range is entered.
    pub fn billable_nights(&self) -> u64 {
        self.nights().filter(|&n| n > 0).unwrap_or(1) as u64
    }

    /// Check every required field. Date ordering is re-validated here even
    /// though the pickers constrain entry, because a later check-in change
    /// can invalidate a previously valid check-out.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.selected_room.is_none() {
            return Err(ValidationError::MissingRoom);
        }
        let check_in = self.check_in.ok_or(ValidationError::MissingCheckIn)?;
        let check_out = self.check_out.ok_or(ValidationError::MissingCheckOut)?;
        if check_out <= check_in {
            return Err(ValidationError::CheckOutNotAfterCheckIn);
        }
        match self.guests.get() {
            Some(n) if n > 0 => {}
            _ => return Err(ValidationError::MissingGuests),
        }
        match self.rooms.get() {
            Some(n) if n > 0 => {}
            _ => return Err(ValidationError::MissingRooms),
        }
        Ok(())
    }
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}
