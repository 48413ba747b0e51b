//! Configuration module for treenav
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TREENAV_*)
//! 3. Explicit `--config` file, else project config (./.treenav.toml)
//! 4. User config (~/.config/treenav/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env, load, load_with_warnings, with_env_overrides, ConfigWarning, LoadedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{Config, DisplayConfig, LoaderConfig, LogConfig, LogLevel};
