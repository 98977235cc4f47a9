//! Writer implementations

pub mod console;

pub use console::ConsoleWriter;

// Re-export the trait alongside its implementations
pub use crate::core::LogWriter;
