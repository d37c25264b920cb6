//! End-to-end booking flow against the simulated backend, wired the same
//! way the TUI wires it: submit, run the backend on a task, deliver the
//! outcome over a channel, resolve.

use tokio::sync::mpsc;

use shorebook_core::booking::{
    BookingForm, Confirmation, SubmissionBackend, SubmissionError, SubmissionState,
};
use shorebook_core::notify::{Notifier, ToastKind};
use shorebook_core::{RoomCatalog, SimulatedBackend};

#[derive(Default)]
struct Recorder {
    messages: Vec<(String, ToastKind)>,
}

impl Notifier for Recorder {
    fn notify(&mut self, message: &str, kind: ToastKind) {
        self.messages.push((message.to_string(), kind));
    }
}

struct Outcome {
    epoch: u64,
    result: Result<Confirmation, SubmissionError>,
}

fn today() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

#[tokio::test(start_paused = true)]
async fn ocean_suite_booking_end_to_end() {
    let catalog = RoomCatalog::embedded();
    let backend = SimulatedBackend::default();
    let mut form = BookingForm::new();
    let mut toasts = Recorder::default();
    let (tx, mut rx) = mpsc::channel::<Outcome>(4);

    // Fill the draft: Ocean Suite ($200/night), 3 nights, 2 guests, 1 room
    form.select_room("Ocean Suite", &catalog);
    form.set_check_in(today(), today());
    form.set_check_out(today() + chrono::Days::new(3), today());
    form.set_guests("2");
    form.set_rooms("1");

    let intent = form.submit(&catalog, &mut toasts).expect("draft is valid");
    assert_eq!(intent.total_price, 600);
    assert_eq!(form.submission(), SubmissionState::Processing);

    let epoch = form.epoch();
    let backend = backend.clone();
    tokio::spawn(async move {
        let result = backend.submit(intent).await;
        let _ = tx.send(Outcome { epoch, result }).await;
    });

    // Paused time skips the 2-second simulated latency
    let outcome = rx.recv().await.expect("backend task reports back");
    form.resolve(outcome.epoch, outcome.result, &mut toasts);

    assert_eq!(form.submission(), SubmissionState::Succeeded);
    assert_eq!(form.draft().selected_room, None);
    assert_eq!(form.draft().check_in, None);

    let (message, kind) = &toasts.messages[0];
    assert!(message.contains("Ocean Suite"));
    assert_eq!(*kind, ToastKind::Success);
}

#[tokio::test(start_paused = true)]
async fn cancelled_submission_never_lands() {
    let catalog = RoomCatalog::embedded();
    let backend = SimulatedBackend::default();
    let mut form = BookingForm::new();
    let mut toasts = Recorder::default();
    let (tx, mut rx) = mpsc::channel::<Outcome>(4);

    form.select_room("Twin Room", &catalog);
    form.set_check_in(today(), today());
    form.set_check_out(today() + chrono::Days::new(1), today());
    form.set_guests("1");
    form.set_rooms("1");

    let intent = form.submit(&catalog, &mut toasts).expect("draft is valid");
    let epoch = form.epoch();
    tokio::spawn(async move {
        let result = backend.submit(intent).await;
        let _ = tx.send(Outcome { epoch, result }).await;
    });

    // Dismiss the form while the backend is still sleeping
    form.cancel();
    assert_eq!(form.submission(), SubmissionState::Idle);

    let outcome = rx.recv().await.expect("backend task reports back");
    form.resolve(outcome.epoch, outcome.result, &mut toasts);

    // The late completion was dropped: no toast, draft untouched
    assert!(toasts.messages.is_empty());
    assert_eq!(form.draft().selected_room.as_deref(), Some("Twin Room"));
}
