//! Core types and logic for uiprobe.
//!
//! This crate turns a raw accessibility dump into a flat, analyzable
//! model of what is on screen, for consumption by AI-driven device
//! automation. It is pure computation: no I/O, no async, no shared
//! mutable state. Adapters that own device communication live outside
//! this crate and exchange [`protocol`] types with it.
//!
//! # Modules
//!
//! - [`element`]: the flat element model with absolute screen bounds
//! - [`parser`]: markup and line-oriented hierarchy dump parsing
//! - [`query`]: predicate filters over element sequences
//! - [`matcher`]: fuzzy natural-language element matching
//! - [`semantics`]: screen-level classification (title, dialogs, navigation, groups)
//! - [`format`]: compact text rendering for agents
//! - [`diff`]: fingerprint-based change detection between captures
//! - [`suggest`]: plausible next-action suggestions
//! - [`session`]: generation-validated snapshot cache
//! - [`protocol`]: the uniform command protocol for automation routers
//! - [`error`]: API error types with actionable suggestions for AI consumers
//!
//! # Degradation over failure
//!
//! Real accessibility trees are frequently incomplete (mid-animation
//! captures, permission-limited nodes). Parsing and analysis therefore
//! never throw on bad input: malformed nodes are skipped, empty input
//! produces empty sequences, and "nothing found" is an ordinary value
//! (`None`, an empty list, a sentinel string), never an error.

pub mod diff;
pub mod element;
pub mod error;
pub mod format;
pub mod matcher;
pub mod parser;
pub mod protocol;
pub mod query;
pub mod semantics;
pub mod session;
pub mod suggest;
