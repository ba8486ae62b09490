//! Delivery of contact messages

use std::future::Future;

use super::{ContactMessage, SendError};

/// External collaborator that delivers a validated message.
pub trait ContactTransport {
    fn send(&self, message: &ContactMessage) -> impl Future<Output = Result<(), SendError>>;
}

/// Waits `delay_ms` and reports success. The sleep is supplied by the caller
/// so the same transport runs on browser timers and in native tests.
pub struct SimulatedTransport<S> {
    delay_ms: u32,
    sleep: S,
}

impl<S, F> SimulatedTransport<S>
where
    S: Fn(u32) -> F,
    F: Future<Output = ()>,
{
    pub fn new(delay_ms: u32, sleep: S) -> Self {
        Self { delay_ms, sleep }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl<S, F> ContactTransport for SimulatedTransport<S>
where
    S: Fn(u32) -> F,
    F: Future<Output = ()>,
{
    async fn send(&self, message: &ContactMessage) -> Result<(), SendError> {
        tracing::info!(
            subject = %message.subject,
            delay_ms = self.delay_ms,
            "simulating contact submission"
        );
        (self.sleep)(self.delay_ms).await;
        Ok(())
    }
}
