use std::collections::HashMap;

use keylocker_types::{Identifier, KeyToken};
use tracing::debug;

/// Mapping from identifiers to ordered key sequences.
///
/// The registry starts out uninitialized and accepts reads and writes only
/// after [`KeyRegistry::initialize`] has run. Writing to an identifier
/// replaces any sequence stored before; reads hand out owned copies and
/// report the empty sequence for identifiers never written.
#[derive(Debug)]
pub struct KeyRegistry {
    state: State,
    entries: HashMap<Identifier, Vec<KeyToken>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry has not been initialized")]
    NotInitialized,

    #[error("registry has already been initialized")]
    AlreadyInitialized,

    #[error("key sequence must not be empty")]
    EmptyKeys,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            entries: HashMap::new(),
        }
    }

    /// Transition from `Uninitialized` to `Ready`.
    ///
    /// Valid exactly once per registry; `Ready` is terminal.
    pub fn initialize(&mut self) -> Result<(), RegistryError> {
        if self.state == State::Ready {
            return Err(RegistryError::AlreadyInitialized);
        }
        self.state = State::Ready;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    /// Associate `id` with `keys`, replacing any prior association.
    ///
    /// The write is all-or-nothing: on error nothing is stored.
    pub fn set_keys(&mut self, id: Identifier, keys: Vec<KeyToken>) -> Result<(), RegistryError> {
        self.ensure_ready()?;
        if keys.is_empty() {
            return Err(RegistryError::EmptyKeys);
        }
        debug!(%id, keys = keys.len(), "storing key sequence");
        self.entries.insert(id, keys);
        Ok(())
    }

    /// The key sequence stored under `id`, or the empty sequence if none
    /// was ever set. Returns an owned copy.
    pub fn get_keys(&self, id: &Identifier) -> Result<Vec<KeyToken>, RegistryError> {
        self.ensure_ready()?;
        Ok(self.entries.get(id).cloned().unwrap_or_default())
    }

    fn ensure_ready(&self) -> Result<(), RegistryError> {
        if self.state == State::Uninitialized {
            return Err(RegistryError::NotInitialized);
        }
        Ok(())
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
