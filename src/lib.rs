//! Filterable insights dashboard.
//!
//! [`data`] holds the pure core (options, filtering, aggregation) and the
//! loading edge; [`state`] ties them together for the egui front end in
//! [`app`] and [`ui`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
