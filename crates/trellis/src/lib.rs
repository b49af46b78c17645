//! Trellis - graph algorithms and priority event dispatch.
//!
//! This crate provides the `trellis` command-line front end and the pieces
//! behind it: YAML configuration, a resilient JSON Lines edge-list loader,
//! query reports and their text/JSON rendering. The algorithms themselves
//! live in [`trellis_graph`] and [`trellis_events`].

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod loader;
pub mod output;
pub mod report;
