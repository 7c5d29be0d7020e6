pub mod config;

pub use config::{Config, ConfigError, StoreConfig, TablesConfig, UiConfig};
