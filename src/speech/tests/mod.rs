//! Unit tests for the speech module.
//!
//! Tests cover envelope (de)serialisation, response construction with SSML
//! auto-detection, and the SSML helpers.

mod envelope_tests;
