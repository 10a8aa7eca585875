//! Non-durable storage backend.

use super::PhoneBookStateStorage;
use crate::error::StorageResult;
use crate::models::PhoneBookState;
use std::sync::{Mutex, PoisonError};

/// Keeps the committed state in memory.
///
/// Used by tests and anywhere durability is not wanted. Load and save both
/// exchange deep copies, so the committed snapshot never aliases a service's
/// live state. Wrap in an `Arc` to back several service instances with the
/// same store.
pub struct InMemoryPhoneBookStateStorage {
    state: Mutex<PhoneBookState>,
}

impl InMemoryPhoneBookStateStorage {
    pub fn new() -> Self {
        Self::with_initial_state(PhoneBookState::new())
    }

    pub fn with_initial_state(state: PhoneBookState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl Default for InMemoryPhoneBookStateStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneBookStateStorage for InMemoryPhoneBookStateStorage {
    fn load(&self) -> StorageResult<PhoneBookState> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state.clone())
    }

    fn save(&self, state: &PhoneBookState) -> StorageResult<()> {
        let mut committed = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *committed = state.clone();
        Ok(())
    }
}
