//! Layered configuration for the `run` command.
//!
//! Values are resolved in order of precedence: explicit command-line flags, `-S key=value`
//! overrides, the TOML configuration file, and finally the built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
