//! Bus timetable builder.
//!
//! Turns an origin-destination table of observed bus legs into ordered
//! per-trip itineraries, grouped by route section, day type and line
//! variant, and publishes them as a JSON document.

pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod output;
pub mod table;
