pub mod config;
pub mod types;

pub use config::{AffinityConfig, ConfigError, PLUGIN_NAME};
pub use types::*;
