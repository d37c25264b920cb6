//! The submission seam between the form controller and whatever actually
//! takes the booking.
//!
//! Production today is [`SimulatedBackend`]: a fixed-latency stub that
//! always confirms, standing in for a real reservations service. The
//! controller only sees the trait, so swapping in a real client touches
//! nothing else.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

/// Latency of the simulated reservation call.
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(2);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Payment was declined: {0}")]
    PaymentDeclined(String),

    #[error("Could not reach the booking service: {0}")]
    Unavailable(String),
}

/// A validated booking ready to hand to a backend. Snapshot of the draft at
/// submit time; the draft itself stays with the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingIntent {
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub rooms: u32,
    /// Total in whole dollars, computed against the catalog at submit time.
    pub total_price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub room_name: String,
}

pub trait SubmissionBackend: Clone + Send + Sync + 'static {
    fn submit(
        &self,
        intent: BookingIntent,
    ) -> impl Future<Output = Result<Confirmation, SubmissionError>> + Send;
}

/// Fixed-delay always-succeeds stub. Nothing is persisted anywhere.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
}

impl SimulatedBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, intent: BookingIntent) -> Result<Confirmation, SubmissionError> {
        tokio::time::sleep(self.latency).await;
        Ok(Confirmation {
            room_name: intent.room_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent() -> BookingIntent {
        BookingIntent {
            room_name: "Twin Room".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            guests: 2,
            rooms: 1,
            total_price: 95,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_backend_confirms_after_latency() {
        let backend = SimulatedBackend::default();
        let started = tokio::time::Instant::now();
        let confirmation = backend.submit(intent()).await.unwrap();
        assert_eq!(confirmation.room_name, "Twin Room");
        assert!(started.elapsed() >= SIMULATED_LATENCY);
    }
}
