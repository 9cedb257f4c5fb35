//! Bike-share station map server.
//!
//! Fetches the GBFS station information and status feeds, joins them into
//! a list of usable stations, and serves them as a map whose markers show
//! either available bikes or available docks.

pub mod config;
pub mod domain;
pub mod gbfs;
pub mod reconcile;
pub mod web;
