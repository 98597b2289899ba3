//! Configuration module for vizexec.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, ExecutionSettings, PollSettings, ServerSettings, Settings, SettingsError,
};
