//! # COVID Series
//!
//! Turns daily cumulative readings into day-over-day deltas and fixed-width
//! rolling averages, and finds the most recent day worth reporting.
//!
//! Both operations are synchronous single passes over an ordered
//! [`Series`](covid_common::Series); every call owns its own window state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod selector;

pub use aggregator::*;
pub use selector::*;
