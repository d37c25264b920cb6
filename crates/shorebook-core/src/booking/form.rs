//! The booking form controller.
//!
//! Owns the draft, the open picker, and the submission lifecycle. All
//! user-facing failures are reported through the injected [`Notifier`];
//! nothing here panics or propagates to the caller.
//!
//! Submission is split in two so the controller stays free of task
//! spawning: [`BookingForm::submit`] validates, moves to `Processing` and
//! hands back a [`BookingIntent`] for the caller to run against a
//! [`SubmissionBackend`](super::SubmissionBackend); the caller then feeds
//! the outcome to [`BookingForm::resolve`]. Each submission carries an
//! epoch, and a resolution with a stale epoch is dropped, so cancelling is
//! just bumping the epoch.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::catalog::RoomCatalog;
use crate::notify::{Notifier, ToastKind};

use super::backend::{BookingIntent, Confirmation, SubmissionError};
use super::draft::BookingDraft;
use super::picker::Picker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

pub struct BookingForm {
    draft: BookingDraft,
    open_picker: Option<Picker>,
    submission: SubmissionState,
    /// Incremented on every submit and cancel. Resolutions carrying an
    /// older epoch belong to a cancelled submission and are discarded.
    epoch: u64,
}

impl BookingForm {
    pub fn new() -> Self {
        Self {
            draft: BookingDraft::new(),
            open_picker: None,
            submission: SubmissionState::Idle,
            epoch: 0,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_processing(&self) -> bool {
        self.submission == SubmissionState::Processing
    }

    pub fn open_picker_kind(&self) -> Option<Picker> {
        self.open_picker
    }

    // =========================================================================
    // Field edits
    // =========================================================================

    /// Apply raw text to the guests field. Non-digit input is ignored.
    pub fn set_guests(&mut self, input: &str) {
        self.clear_outcome();
        self.draft.guests.apply(input);
    }

    /// Apply raw text to the rooms field. Non-digit input is ignored.
    pub fn set_rooms(&mut self, input: &str) {
        self.clear_outcome();
        self.draft.rooms.apply(input);
    }

    /// Picker selection for the guests field.
    pub fn pick_guests(&mut self, n: u32) {
        self.clear_outcome();
        self.draft.guests.set(n);
        self.close_pickers();
    }

    /// Picker selection for the rooms field.
    pub fn pick_rooms(&mut self, n: u32) {
        self.clear_outcome();
        self.draft.rooms.set(n);
        self.close_pickers();
    }

    /// Set the check-in date. Dates before `today` are rejected, matching
    /// the picker's minimum. A check-out left behind the new check-in stays
    /// in place and is caught again at submit.
    pub fn set_check_in(&mut self, date: NaiveDate, today: NaiveDate) {
        self.clear_outcome();
        if date < today {
            debug!(%date, %today, "Rejected past check-in date");
            return;
        }
        self.draft.check_in = Some(date);
        self.close_pickers();
    }

    /// Set the check-out date. Must land strictly after the current
    /// check-in when one is set.
    pub fn set_check_out(&mut self, date: NaiveDate, today: NaiveDate) {
        self.clear_outcome();
        if date < today {
            debug!(%date, %today, "Rejected past check-out date");
            return;
        }
        if let Some(check_in) = self.draft.check_in {
            if date <= check_in {
                debug!(%date, check_in = %check_in, "Rejected check-out at or before check-in");
                return;
            }
        }
        self.draft.check_out = Some(date);
        self.close_pickers();
    }

    /// Select a room by name. Unknown names are ignored with a warning; the
    /// picker only offers catalog rooms, so this indicates a caller bug.
    pub fn select_room(&mut self, name: &str, catalog: &RoomCatalog) {
        self.clear_outcome();
        if !catalog.contains(name) {
            warn!(room = name, "Ignoring selection of unknown room");
            return;
        }
        self.draft.selected_room = Some(name.to_string());
        self.close_pickers();
    }

    // =========================================================================
    // Pickers
    // =========================================================================

    /// Open a picker, closing any other. Only one may be open at a time.
    pub fn open_picker(&mut self, picker: Picker) {
        self.clear_outcome();
        self.open_picker = Some(picker);
    }

    /// Close whatever picker is open (Escape, outside dismissal, or a
    /// completed selection).
    pub fn close_pickers(&mut self) {
        self.open_picker = None;
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Total price of the current draft, recomputed on every call. `None`
    /// until a room is selected; rooms and nights each default to 1 so the
    /// live summary always shows at least one night of the selected room.
    pub fn total_price(&self, catalog: &RoomCatalog) -> Option<u64> {
        let room = catalog.find(self.draft.selected_room.as_deref()?)?;
        let rooms = u64::from(self.draft.rooms.get().unwrap_or(1).max(1));
        Some(room.nightly_price * rooms * self.draft.billable_nights())
    }

    // =========================================================================
    // Submission lifecycle
    // =========================================================================

    /// Validate and begin a submission.
    ///
    /// Returns the intent to run against a backend, or `None` if the form
    /// is invalid (error toast emitted, no state change) or a submission is
    /// already in flight (complete no-op).
    pub fn submit(
        &mut self,
        catalog: &RoomCatalog,
        notifier: &mut impl Notifier,
    ) -> Option<BookingIntent> {
        if self.is_processing() {
            debug!("Ignoring submit while a booking is already processing");
            return None;
        }
        self.clear_outcome();

        if let Err(e) = self.draft.validate() {
            notifier.notify(&e.to_string(), ToastKind::Error);
            return None;
        }

        // validate() guarantees every field below is present.
        let draft = &self.draft;
        let room_name = draft.selected_room.clone()?;
        let intent = BookingIntent {
            check_in: draft.check_in?,
            check_out: draft.check_out?,
            guests: draft.guests.get()?,
            rooms: draft.rooms.get()?,
            total_price: self.total_price(catalog)?,
            room_name,
        };

        self.submission = SubmissionState::Processing;
        self.epoch += 1;
        info!(room = %intent.room_name, total = intent.total_price, "Booking submitted");
        Some(intent)
    }

    /// The epoch of the submission currently in flight. Pass it back to
    /// [`resolve`](Self::resolve) with the backend's result.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Complete a submission with the backend's result.
    ///
    /// A result from a superseded epoch (the submission was cancelled) is
    /// dropped without touching any state. Success resets the draft for the
    /// next guest; failure keeps it so the guest can retry without
    /// re-entering everything.
    pub fn resolve(
        &mut self,
        epoch: u64,
        result: Result<Confirmation, SubmissionError>,
        notifier: &mut impl Notifier,
    ) {
        if epoch != self.epoch || !self.is_processing() {
            debug!(epoch, current = self.epoch, "Dropping stale submission result");
            return;
        }

        match result {
            Ok(confirmation) => {
                info!(room = %confirmation.room_name, "Booking confirmed");
                notifier.notify(
                    &format!(
                        "Booking confirmed for {}! Check your email for details.",
                        confirmation.room_name
                    ),
                    ToastKind::Success,
                );
                self.draft = BookingDraft::new();
                self.close_pickers();
                self.submission = SubmissionState::Succeeded;
            }
            Err(e) => {
                warn!(error = %e, "Booking failed");
                notifier.notify(&e.to_string(), ToastKind::Error);
                self.submission = SubmissionState::Failed;
            }
        }
    }

    /// Cancel an in-flight submission (form dismissed, app quitting). The
    /// pending result, if it ever arrives, will carry a stale epoch and be
    /// ignored. No-op when nothing is processing.
    pub fn cancel(&mut self) {
        if self.is_processing() {
            info!("Cancelling in-flight booking submission");
            self.epoch += 1;
            self.submission = SubmissionState::Idle;
        }
    }

    /// Terminal states return to Idle on the next interaction.
    fn clear_outcome(&mut self) {
        if matches!(
            self.submission,
            SubmissionState::Succeeded | SubmissionState::Failed
        ) {
            self.submission = SubmissionState::Idle;
        }
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test notifier that records every notification.
    #[derive(Default)]
    struct Recorder {
        messages: Vec<(String, ToastKind)>,
    }

    impl Notifier for Recorder {
        fn notify(&mut self, message: &str, kind: ToastKind) {
            self.messages.push((message.to_string(), kind));
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 9, 1)
    }

    fn filled_form(catalog: &RoomCatalog) -> BookingForm {
        let mut form = BookingForm::new();
        form.select_room("Ocean Suite", catalog);
        form.set_check_in(today(), today());
        form.set_check_out(date(2026, 9, 4), today());
        form.set_guests("2");
        form.set_rooms("1");
        form
    }

    #[test]
    fn only_one_picker_open_at_a_time() {
        let mut form = BookingForm::new();
        for picker in [
            Picker::CheckIn,
            Picker::CheckOut,
            Picker::Guests,
            Picker::Rooms,
            Picker::RoomType,
        ] {
            form.open_picker(picker);
            assert_eq!(form.open_picker_kind(), Some(picker));
        }
        form.close_pickers();
        assert_eq!(form.open_picker_kind(), None);
    }

    #[test]
    fn selecting_a_room_sets_it_and_closes_the_picker() {
        let catalog = RoomCatalog::embedded();
        let mut form = BookingForm::new();
        form.open_picker(Picker::RoomType);
        form.select_room("Ocean Suite", &catalog);
        assert_eq!(form.draft().selected_room.as_deref(), Some("Ocean Suite"));
        assert_eq!(form.open_picker_kind(), None);
    }

    #[test]
    fn unknown_room_is_ignored() {
        let catalog = RoomCatalog::embedded();
        let mut form = BookingForm::new();
        form.select_room("Broom Closet", &catalog);
        assert_eq!(form.draft().selected_room, None);
    }

    #[test]
    fn past_check_in_rejected() {
        let mut form = BookingForm::new();
        form.set_check_in(date(2026, 8, 31), today());
        assert_eq!(form.draft().check_in, None);
    }

    #[test]
    fn check_out_must_follow_check_in() {
        let mut form = BookingForm::new();
        form.set_check_in(date(2026, 9, 3), today());
        form.set_check_out(date(2026, 9, 3), today());
        assert_eq!(form.draft().check_out, None);
        form.set_check_out(date(2026, 9, 5), today());
        assert_eq!(form.draft().check_out, Some(date(2026, 9, 5)));
    }

    #[test]
    fn later_check_in_change_caught_at_submit() {
        let catalog = RoomCatalog::embedded();
        let mut form = filled_form(&catalog);
        // Move check-in past the previously valid check-out
        form.set_check_in(date(2026, 9, 10), today());
        let mut recorder = Recorder::default();
        assert!(form.submit(&catalog, &mut recorder).is_none());
        assert_eq!(form.submission(), SubmissionState::Idle);
        assert_eq!(
            recorder.messages,
            vec![(
                "Check-out must be after check-in".to_string(),
                ToastKind::Error
            )]
        );
    }

    #[test]
    fn total_price_multiplies_rate_rooms_and_nights() {
        let catalog = RoomCatalog::embedded();
        let mut form = BookingForm::new();
        assert_eq!(form.total_price(&catalog), None);

        // nightly 200 * 2 rooms * 3 nights
        form.select_room("Ocean Suite", &catalog);
        form.set_check_in(today(), today());
        form.set_check_out(date(2026, 9, 4), today());
        form.set_rooms("2");
        assert_eq!(form.total_price(&catalog), Some(1200));

        // Without dates the summary prices a single night
        let mut bare = BookingForm::new();
        bare.select_room("Ocean Suite", &catalog);
        assert_eq!(bare.total_price(&catalog), Some(200));
    }

    #[test]
    fn invalid_submit_notifies_and_stays_idle() {
        let catalog = RoomCatalog::embedded();
        let mut form = BookingForm::new();
        let mut recorder = Recorder::default();

        assert!(form.submit(&catalog, &mut recorder).is_none());
        assert_eq!(form.submission(), SubmissionState::Idle);
        assert_eq!(recorder.messages.len(), 1);
        assert_eq!(recorder.messages[0].1, ToastKind::Error);
    }

    #[test]
    fn submit_while_processing_is_a_no_op() {
        let catalog = RoomCatalog::embedded();
        let mut form = filled_form(&catalog);
        let mut recorder = Recorder::default();

        let intent = form.submit(&catalog, &mut recorder).expect("valid draft");
        assert_eq!(form.submission(), SubmissionState::Processing);
        let epoch = form.epoch();

        // Rapid repeated clicks
        assert!(form.submit(&catalog, &mut recorder).is_none());
        assert!(form.submit(&catalog, &mut recorder).is_none());
        assert_eq!(form.epoch(), epoch);
        assert!(recorder.messages.is_empty());
        assert_eq!(intent.total_price, 600);
    }

    #[test]
    fn successful_resolution_resets_the_draft() {
        let catalog = RoomCatalog::embedded();
        let mut form = filled_form(&catalog);
        let mut recorder = Recorder::default();

        let intent = form.submit(&catalog, &mut recorder).expect("valid draft");
        assert_eq!(intent.room_name, "Ocean Suite");
        assert_eq!(intent.total_price, 600); // 200 * 1 room * 3 nights

        form.resolve(
            form.epoch(),
            Ok(Confirmation {
                room_name: intent.room_name.clone(),
            }),
            &mut recorder,
        );

        assert_eq!(form.submission(), SubmissionState::Succeeded);
        assert_eq!(form.draft().selected_room, None);
        assert_eq!(form.draft().check_in, None);
        assert_eq!(form.draft().guests.get(), None);

        let (message, kind) = &recorder.messages[0];
        assert!(message.contains("Ocean Suite"));
        assert_eq!(*kind, ToastKind::Success);

        // Next interaction returns to Idle
        form.set_guests("1");
        assert_eq!(form.submission(), SubmissionState::Idle);
    }

    #[test]
    fn failed_resolution_preserves_the_draft() {
        let catalog = RoomCatalog::embedded();
        let mut form = filled_form(&catalog);
        let mut recorder = Recorder::default();

        form.submit(&catalog, &mut recorder).expect("valid draft");
        form.resolve(
            form.epoch(),
            Err(SubmissionError::PaymentDeclined("card expired".to_string())),
            &mut recorder,
        );

        assert_eq!(form.submission(), SubmissionState::Failed);
        assert_eq!(form.draft().selected_room.as_deref(), Some("Ocean Suite"));
        assert_eq!(recorder.messages[0].1, ToastKind::Error);

        // Explicit retry works without re-entering data
        form.set_guests("2");
        let retry = form.submit(&catalog, &mut recorder);
        assert!(retry.is_some());
    }

    #[test]
    fn stale_epoch_resolution_is_dropped() {
        let catalog = RoomCatalog::embedded();
        let mut form = filled_form(&catalog);
        let mut recorder = Recorder::default();

        form.submit(&catalog, &mut recorder).expect("valid draft");
        let stale_epoch = form.epoch();
        form.cancel();
        assert_eq!(form.submission(), SubmissionState::Idle);

        form.resolve(
            stale_epoch,
            Ok(Confirmation {
                room_name: "Ocean Suite".to_string(),
            }),
            &mut recorder,
        );

        // The cancelled submission changed nothing
        assert_eq!(form.submission(), SubmissionState::Idle);
        assert_eq!(form.draft().selected_room.as_deref(), Some("Ocean Suite"));
        assert!(recorder.messages.is_empty());
    }
}
