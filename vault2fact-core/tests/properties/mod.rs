//! Property-based tests for vault2fact core library

mod convert_tests;
