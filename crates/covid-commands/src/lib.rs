//! # COVID Commands
//!
//! The bot's commands: case and vaccination summaries rendered as HTML
//! tables, dual-axis charts, and entity listings.
//!
//! A [`Command`] runs against a [`CommandContext`] holding the data
//! sources and the chart manager, and answers with a [`Reply`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cases;
pub mod context;
pub mod framework;
pub mod global_vaccines;
pub mod listings;
pub mod summary;
pub mod table;
pub mod vaccines;

pub use cases::{case_reply, case_summary, CASE_GATES, NO_VALID_DATA};
pub use context::{CommandContext, Reply};
pub use framework::{user_message, Command};
pub use global_vaccines::{global_vaccination_summary, GLOBAL_VACCINE_METRICS};
pub use listings::listing;
pub use summary::{escape_html, Summary, SummaryRow};
pub use table::{Align, TextTable};
pub use vaccines::{dose_counts, vaccination_summary, DoseCounts, VACCINE_GATES};
