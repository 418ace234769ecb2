pub mod config;
pub mod cookie;
pub mod dgp;
pub mod error;
pub mod event;
pub mod messages;
pub mod process;
pub mod shortcut;

// Re-export common error type
pub use error::{LaunchError, Result};
