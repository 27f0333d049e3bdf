use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

/// Lookup slot for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Pending,
    Settled,
}

#[derive(Debug, thiserror::Error)]
#[error("a barcode lookup is already in flight")]
pub struct ScanInFlight;

/// One in-flight barcode lookup per user.
///
/// `Pending` rejects new scans. A settled lookup leaves the slot `Settled`;
/// a failed or abandoned one returns it to `Idle` so the user can retry.
#[derive(Debug, Default)]
pub struct ScanGuard {
    slots: DashMap<Uuid, ScanState>,
}

impl ScanGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, user_id: Uuid) -> ScanState {
        self.slots
            .get(&user_id)
            .map(|s| *s)
            .unwrap_or(ScanState::Idle)
    }

    pub fn begin(self: &Arc<Self>, user_id: Uuid) -> Result<ScanTicket, ScanInFlight> {
        let mut slot = self.slots.entry(user_id).or_insert(ScanState::Idle);
        if *slot == ScanState::Pending {
            return Err(ScanInFlight);
        }
        *slot = ScanState::Pending;
        drop(slot);

        Ok(ScanTicket {
            guard: Arc::clone(self),
            user_id,
            finished: false,
        })
    }

    /// Drops `Settled` slots. They gate nothing, so this only bounds the map.
    pub fn sweep_settled(&self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, state| *state != ScanState::Settled);
        before - self.slots.len()
    }

    pub fn tracked(&self) -> usize {
        self.slots.len()
    }

    fn finish(&self, user_id: Uuid, outcome: ScanState) {
        match outcome {
            ScanState::Idle => {
                self.slots.remove(&user_id);
            }
            other => {
                self.slots.insert(user_id, other);
            }
        }
    }
}

/// Held for the duration of a lookup. Dropping it unsettled resets the slot.
#[derive(Debug)]
pub struct ScanTicket {
    guard: Arc<ScanGuard>,
    user_id: Uuid,
    finished: bool,
}

impl ScanTicket {
    pub fn settle(mut self) {
        self.guard.finish(self.user_id, ScanState::Settled);
        self.finished = true;
    }

    pub fn reset(mut self) {
        self.guard.finish(self.user_id, ScanState::Idle);
        self.finished = true;
    }
}

impl Drop for ScanTicket {
    fn drop(&mut self) {
        if !self.finished {
            self.guard.finish(self.user_id, ScanState::Idle);
        }
    }
}
