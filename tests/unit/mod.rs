//! Unit Tests Module
//!
//! Component tests that run against the in-memory network client.
