//! Application state for the shorebook TUI.
//!
//! The `App` struct owns the booking form, the room catalog, the toast
//! queue, and the channel that background submission tasks report back on.

use std::time::Duration;

use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use tokio::sync::mpsc;
use tracing::{info, warn};

use shorebook_core::booking::{Confirmation, Picker, SubmissionError};
use shorebook_core::{
    BookingForm, Config, RoomCatalog, SimulatedBackend, SubmissionBackend, ToastKind, ToastQueue,
};

/// Buffer size for the submission outcome channel. One submission is in
/// flight at a time, so a small buffer is plenty.
const CHANNEL_BUFFER_SIZE: usize = 4;

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Keyboard focus within the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CheckIn,
    CheckOut,
    Guests,
    Rooms,
    RoomType,
    BookButton,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::CheckIn => "Check-In Date",
            FormField::CheckOut => "Check-Out Date",
            FormField::Guests => "Number of Guests",
            FormField::Rooms => "Number of Rooms",
            FormField::RoomType => "Room Type",
            FormField::BookButton => "Book Now",
        }
    }

    /// Next field (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            FormField::CheckIn => FormField::CheckOut,
            FormField::CheckOut => FormField::Guests,
            FormField::Guests => FormField::Rooms,
            FormField::Rooms => FormField::RoomType,
            FormField::RoomType => FormField::BookButton,
            FormField::BookButton => FormField::CheckIn,
        }
    }

    /// Previous field (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            FormField::CheckIn => FormField::BookButton,
            FormField::CheckOut => FormField::CheckIn,
            FormField::Guests => FormField::CheckOut,
            FormField::Rooms => FormField::Guests,
            FormField::RoomType => FormField::Rooms,
            FormField::BookButton => FormField::RoomType,
        }
    }

    /// The picker this field opens, if any.
    pub fn picker(&self) -> Option<Picker> {
        match self {
            FormField::CheckIn => Some(Picker::CheckIn),
            FormField::CheckOut => Some(Picker::CheckOut),
            FormField::Guests => Some(Picker::Guests),
            FormField::Rooms => Some(Picker::Rooms),
            FormField::RoomType => Some(Picker::RoomType),
            FormField::BookButton => None,
        }
    }
}

/// Result of a background submission task.
pub struct SubmissionOutcome {
    pub epoch: u64,
    pub result: Result<Confirmation, SubmissionError>,
}

/// Main application state container
pub struct App {
    pub config: Config,
    pub catalog: RoomCatalog,
    pub form: BookingForm,
    pub toasts: ToastQueue,

    pub state: AppState,
    pub focus: FormField,

    // Picker cursors
    pub picker_date: NaiveDate,
    pub picker_number: u32,
    pub picker_room: usize,

    backend: SimulatedBackend,
    submit_rx: mpsc::Receiver<SubmissionOutcome>,
    submit_tx: mpsc::Sender<SubmissionOutcome>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let catalog = match &config.catalog_path {
            Some(path) => RoomCatalog::load(path)?,
            None => RoomCatalog::embedded(),
        };
        info!(rooms = catalog.room_count(), "Catalog ready");

        let toasts = match config.toast_duration_ms {
            Some(ms) => ToastQueue::new(Duration::from_millis(ms)),
            None => ToastQueue::default(),
        };

        let backend = match config.booking_latency_ms {
            Some(ms) => SimulatedBackend::new(Duration::from_millis(ms)),
            None => SimulatedBackend::default(),
        };

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            catalog,
            form: BookingForm::new(),
            toasts,
            state: AppState::Normal,
            focus: FormField::CheckIn,
            picker_date: today(),
            picker_number: 1,
            picker_room: 0,
            backend,
            submit_rx: rx,
            submit_tx: tx,
        })
    }

    // =========================================================================
    // Pickers
    // =========================================================================

    /// Open the picker for the focused field and position its cursor on the
    /// current value (or the nearest valid one).
    pub fn open_focused_picker(&mut self) {
        let Some(picker) = self.focus.picker() else {
            return;
        };
        match picker {
            Picker::CheckIn => {
                self.picker_date = self.form.draft().check_in.unwrap_or_else(today);
            }
            Picker::CheckOut => {
                let min = self.min_check_out();
                self.picker_date = self.form.draft().check_out.unwrap_or(min).max(min);
            }
            Picker::Guests => {
                self.picker_number = self.form.draft().guests.get().unwrap_or(1);
            }
            Picker::Rooms => {
                self.picker_number = self.form.draft().rooms.get().unwrap_or(1);
            }
            Picker::RoomType => {
                let selected = self.form.draft().selected_room.as_deref();
                self.picker_room = self
                    .catalog
                    .rooms()
                    .position(|r| Some(r.name.as_str()) == selected)
                    .unwrap_or(0);
            }
        }
        self.form.open_picker(picker);
    }

    /// Earliest selectable check-in date.
    pub fn min_check_in(&self) -> NaiveDate {
        today()
    }

    /// Earliest selectable check-out date: the day after check-in, never
    /// before tomorrow.
    pub fn min_check_out(&self) -> NaiveDate {
        let tomorrow = today() + Days::new(1);
        match self.form.draft().check_in {
            Some(check_in) => (check_in + Days::new(1)).max(tomorrow),
            None => tomorrow,
        }
    }

    /// Commit the open picker's cursor into the form.
    pub fn commit_picker(&mut self) {
        match self.form.open_picker_kind() {
            Some(Picker::CheckIn) => self.form.set_check_in(self.picker_date, today()),
            Some(Picker::CheckOut) => self.form.set_check_out(self.picker_date, today()),
            Some(Picker::Guests) => self.form.pick_guests(self.picker_number),
            Some(Picker::Rooms) => self.form.pick_rooms(self.picker_number),
            Some(Picker::RoomType) => {
                let name = self
                    .catalog
                    .rooms()
                    .nth(self.picker_room)
                    .map(|r| r.name.clone());
                if let Some(name) = name {
                    self.form.select_room(&name, &self.catalog);
                }
            }
            None => {}
        }
    }

    /// Upper bound for the open number picker (guests or rooms).
    pub fn picker_number_max(&self) -> u32 {
        match self.form.open_picker_kind() {
            Some(Picker::Guests) => self.form.draft().guests.max(),
            Some(Picker::Rooms) => self.form.draft().rooms.max(),
            _ => 1,
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate and kick off a booking. The simulated backend runs on a
    /// background task and reports back through the outcome channel.
    pub fn begin_submit(&mut self) {
        let Some(intent) = self.form.submit(&self.catalog, &mut self.toasts) else {
            return;
        };

        let epoch = self.form.epoch();
        let backend = self.backend.clone();
        let tx = self.submit_tx.clone();

        tokio::spawn(async move {
            let result = backend.submit(intent).await;
            if tx.send(SubmissionOutcome { epoch, result }).await.is_err() {
                warn!("Submission outcome channel closed");
            }
        });
    }

    /// Cancel an in-flight booking, if any. Returns true when one was
    /// cancelled.
    pub fn cancel_submission(&mut self) -> bool {
        if self.form.is_processing() {
            self.form.cancel();
            self.toasts.push("Booking cancelled", ToastKind::Info);
            true
        } else {
            false
        }
    }

    /// Drain completed background tasks and expire old toasts. Called once
    /// per event-loop iteration.
    pub fn check_background_tasks(&mut self) {
        while let Ok(outcome) = self.submit_rx.try_recv() {
            self.form
                .resolve(outcome.epoch, outcome.result, &mut self.toasts);
        }
        self.toasts.prune();
    }
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
