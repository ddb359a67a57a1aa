//! # COVID Bot
//!
//! Command line bot that answers one COVID statistics command per run:
//! the reply is printed and, with `--post`, sent to a Telegram chat.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod cli;
pub mod error;
pub mod telegram;

pub use bot::*;
pub use cli::*;
pub use error::*;
pub use telegram::*;
