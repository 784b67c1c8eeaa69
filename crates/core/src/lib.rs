//! verita-core
//!
//! Core library for summarizing Verita verification runs.
//!
//! A Verita run leaves one JSON result file per project (or per crate root of
//! a multi-root project) in an output directory. This crate loads those files
//! into normalized records, aggregates them per directory, compares two runs,
//! and renders aligned plain-text reports.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends; the `verita-summary` CLI only parses
//! arguments and prints what this crate renders.

pub mod compare;
pub mod config;
pub mod format;
pub mod loader;
pub mod model;
pub mod report;
pub mod resolver;
pub mod run;
pub mod survival;
