//! Reflint core library.
//!
//! This crate exposes programmatic APIs for running integrity rules over a
//! scanner-produced reference graph and for verifying automated repairs.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Finding, edge, severity, and verification data models.
//! - `input`: Scan-bundle contracts supplied by the external scanner.
//! - `confidence`: Base weights and penalty scoring for references.
//! - `classify`: Reference-type classification of raw occurrences.
//! - `graph`: Directed reference graph and cycle detection.
//! - `schema`: Built-in object schemas for well-known filenames.
//! - `rules`: The six detection rules and the rule runner.
//! - `verify`: Pre/post repair verification.
//! - `output`: Human/JSON printers for findings and verify results.
//! - `utils`: Supporting path and diagnostic helpers.
pub mod classify;
pub mod cli;
pub mod confidence;
pub mod config;
pub mod graph;
pub mod input;
pub mod models;
pub mod output;
pub mod rules;
pub mod schema;
pub mod utils;
pub mod verify;
