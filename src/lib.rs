//! Disaster Impact
//!
//! Normalizes semi-structured disaster damage tables, derives per-event
//! severity totals and ranks the most severe events.
//!
//! This crate provides the core implementation for the
//! `disaster-impact` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! disaster-impact analyze --input Dano.csv --summary
//! ```
//!
//! Library users can run the whole pipeline with
//! [`pipeline::analyze_file`].

pub mod aggregator;
pub mod commands;
pub mod comments;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod utils;
