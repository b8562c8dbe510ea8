//! End-to-end tests for `sim-vehicle`.
//!
//! All tests live in the `integration` target:
//!
//! ```text
//! cargo test -p sim-vehicle-tests
//! ```
