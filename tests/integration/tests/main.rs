//! End-to-end tests
//!
//! Configuration files are loaded from disk, turned into requests, rendered
//! and read back.

mod common;
mod default_request;
mod properties;
