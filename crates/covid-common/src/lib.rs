//! # COVID Common
//!
//! Shared types, utilities, and common functionality for the COVID statistics bot.
//!
//! This crate provides the daily record model, the workspace error type,
//! logging initialization, and the number formatting used by summaries and
//! charts alike.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{CovidError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
