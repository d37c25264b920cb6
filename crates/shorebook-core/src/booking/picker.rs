//! Picker identity for the booking form.
//!
//! At most one picker may be open at a time. The form stores
//! `Option<Picker>`, so "only one open" holds by construction rather than
//! by convention across five booleans.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    CheckIn,
    CheckOut,
    Guests,
    Rooms,
    RoomType,
}

impl Picker {
    pub fn title(&self) -> &'static str {
        match self {
            Picker::CheckIn => "Select check-in date",
            Picker::CheckOut => "Select check-out date",
            Picker::Guests => "Select number of guests",
            Picker::Rooms => "Select number of rooms",
            Picker::RoomType => "Select a room",
        }
    }
}
