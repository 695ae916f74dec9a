//! Integration tests for Leadline
//!
//! Every test talks to a local wiremock server; nothing reaches the network.

mod crawl_tests;
mod pitch_tests;
mod places_tests;
