//! Terminal helpers for the entity admin console
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Tables sized to the terminal
//! - Spinners for in-flight requests
//! - Yes/no confirmation

#![warn(missing_docs)]

pub mod output;
pub mod progress;
pub mod prompt;
pub mod table;
