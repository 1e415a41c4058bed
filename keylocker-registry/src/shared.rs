use std::sync::Arc;

use keylocker_types::{Identifier, KeyToken};
use parking_lot::RwLock;

use crate::{KeyRegistry, RegistryError};

/// Cheaply clonable handle to a [`KeyRegistry`].
///
/// Concurrent callers are serialized by the lock; a write observed through
/// one handle is visible to every subsequent read through any handle.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry(Arc<RwLock<KeyRegistry>>);

impl SharedRegistry {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(KeyRegistry::new())))
    }

    pub fn initialize(&self) -> Result<(), RegistryError> {
        self.0.write().initialize()
    }

    pub fn is_ready(&self) -> bool {
        self.0.read().is_ready()
    }

    pub fn set_keys(&self, id: Identifier, keys: Vec<KeyToken>) -> Result<(), RegistryError> {
        self.0.write().set_keys(id, keys)
    }

    pub fn get_keys(&self, id: &Identifier) -> Result<Vec<KeyToken>, RegistryError> {
        self.0.read().get_keys(id)
    }
}
