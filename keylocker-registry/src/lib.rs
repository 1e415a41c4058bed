mod registry;
mod shared;

pub use registry::{KeyRegistry, RegistryError};
pub use shared::SharedRegistry;
