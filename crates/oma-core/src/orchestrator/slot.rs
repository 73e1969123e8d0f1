//! Token-guarded holder of the last committed result.
//!
//! Every submission takes a token from [`ResultSlot::begin`]; only a result
//! carrying the most recently issued token may be committed. Older
//! submissions that finish late are dropped, and failed ones never touch the
//! committed value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifies one submission. Tokens increase monotonically per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

struct SlotState<T> {
    latest: u64,
    committed: Option<(SubmissionToken, Arc<T>)>,
}

pub struct ResultSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(SlotState {
                latest: 0,
                committed: None,
            }),
        }
    }
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue the token for a new submission; all earlier tokens become stale.
    pub fn begin(&self) -> SubmissionToken {
        let mut state = self.lock();
        state.latest += 1;
        SubmissionToken(state.latest)
    }

    #[cfg(test)]
    fn is_latest(&self, token: SubmissionToken) -> bool {
        self.lock().latest == token.0
    }

    /// Commit `value` if `token` is still the latest one issued.
    ///
    /// Returns the committed value, or `None` when the token is stale (the
    /// value is dropped and the previous result stays in place).
    pub fn commit(&self, token: SubmissionToken, value: T) -> Option<Arc<T>> {
        let mut state = self.lock();
        if state.latest != token.0 {
            return None;
        }
        let value = Arc::new(value);
        state.committed = Some((token, Arc::clone(&value)));
        Some(value)
    }

    /// The last committed value.
    pub fn current(&self) -> Option<Arc<T>> {
        self.lock().committed.as_ref().map(|(_, v)| Arc::clone(v))
    }

    #[cfg(test)]
    fn committed_token(&self) -> Option<SubmissionToken> {
        self.lock().committed.as_ref().map(|(t, _)| *t)
    }
}
