//! Core library for shorebook: room catalog, booking form controller,
//! submission backend seam, notifications, and configuration.
//!
//! Everything here is headless. The TUI crate owns the terminal and
//! translates key events into calls on [`booking::BookingForm`]; tests
//! drive the same API directly with a recording notifier.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod format;
pub mod notify;

pub use booking::{BookingForm, BookingIntent, SimulatedBackend, SubmissionBackend};
pub use catalog::{AccommodationClass, RoomCatalog, RoomOption};
pub use config::Config;
pub use notify::{Notifier, ToastKind, ToastQueue};
