//! Micro-benchmarks comparing message formatting strategies.
//!
//! A fixed catalog of test patterns is rendered by several formatting
//! strategies (positional, printf-style, named parameters, tag-delimited
//! attributes and deferred logging). Every strategy consumes its own
//! spelling of a pattern, derived from one canonical form.

pub mod args;
pub mod config;
pub mod error;
pub mod harness;
pub mod logger;
pub mod pattern;
pub mod strategy;

pub use args::{ArgKind, ArgValue, ArgumentSource};
pub use error::{AppError, AppResult};
pub use pattern::{Catalog, PatternId, TestPattern, Variant};
pub use strategy::{FormatError, FormatStrategy, Strategy};
