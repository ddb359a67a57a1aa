//! # COVID Sources
//!
//! Adapters that fetch daily COVID histories and normalize them to
//! [`Series`](covid_common::Series):
//!
//! - [`tracker`]: the covid19tracker.ca JSON API for Canada and its
//!   provinces, with a built-in population table in [`regions`];
//! - [`owid`]: the Our World in Data CSV for every country.
//!
//! Both implement [`SeriesSource`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod owid;
pub mod regions;
pub mod source;
pub mod tracker;

pub use owid::{canonical_country, OwidConfig, OwidDataset, OwidRow, OwidSource};
pub use regions::{canada_population, find_province, region_names, Province, Region, PROVINCES};
pub use source::SeriesSource;
pub use tracker::{TrackerClient, TrackerConfig, TrackerReport, TrackerResponse};
