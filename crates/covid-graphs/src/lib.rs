//! # COVID Graphs
//!
//! Dual-axis PNG line charts of COVID rolling averages rendered with
//! plotters.
//!
//! [`CaseChart`] and [`VaccinationChart`] turn a daily series into chart
//! lines; [`ChartManager`] writes them to fixed file names in the output
//! directory through a [`ChartRenderer`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cases;
pub mod manager;
pub mod renderer;
pub mod traits;
pub mod types;
pub mod vaccinations;

pub use cases::*;
pub use manager::*;
pub use renderer::*;
pub use traits::*;
pub use types::*;
pub use vaccinations::*;
