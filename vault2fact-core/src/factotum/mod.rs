//! Factotum control-language generation.
//!
//! This module holds the per-record transformation: host extraction from a
//! stored URI, value encoding for the control grammar, and composition of
//! the `key proto=pass ... !password=...` line. Every function here is pure
//! and total over its input.

pub mod compose;
pub mod host;
pub mod quote;

pub use compose::{compose, compose_line, ComposeOptions, PROTO};
pub use host::extract_host;
pub use quote::{encode, is_safe, quote, unquote, DELIMITER};
