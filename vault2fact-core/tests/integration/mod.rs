//! Integration tests for the export-to-control-file pipeline
//!
//! These tests verify that real-world Bitwarden exports come out as the
//! expected factotum control lines on every sink.

pub mod pipeline_tests;
