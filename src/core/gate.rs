use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Held for the duration of one outbound call; the slot is returned when dropped.
pub type GatePermit = OwnedSemaphorePermit;

/// Process-wide bound on simultaneous outbound calls.
///
/// Waiters are served in arrival order. Slots are handed out as RAII permits, so
/// every exit path (success, error, timeout, cancellation) returns exactly one.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }

    pub async fn acquire(&self) -> Result<GatePermit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| AppError::InternalError {
                message: "concurrency gate closed".to_string(),
            })
    }
}
