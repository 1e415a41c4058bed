pub mod api;
pub mod config;

pub use api::ApiServer;
pub use config::{ApiConfig, ConfigError, NodeConfig};
