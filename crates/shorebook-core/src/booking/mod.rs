//! Booking form state: the draft, pickers, submission seam, and the
//! controller that ties them together.

pub mod backend;
pub mod draft;
pub mod form;
pub mod picker;

pub use backend::{
    BookingIntent, Confirmation, SimulatedBackend, SubmissionBackend, SubmissionError,
    SIMULATED_LATENCY,
};
pub use draft::{BookingDraft, NumberField, ValidationError, MAX_GUESTS, MAX_ROOMS};
pub use form::{BookingForm, SubmissionState};
pub use picker::Picker;
