//! System startup, configuration, and shutdown logic.

pub mod config;
pub mod roster_system;
pub mod tracing;

pub use config::*;
pub use roster_system::*;
pub use self::tracing::*;
