//! Command implementations

pub mod create_configs;
pub mod interactive;
pub mod usage;
