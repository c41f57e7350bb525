//! Headless testing helpers: a recording mock driver and tree snapshots.
//!
//! Use [`MockDriver`] to back test classes without a windowing system, and
//! [`tree_to_string`] to capture an object tree as text for assertions.

pub mod mock;
pub mod snapshot;

pub use mock::{register_mock_classes, DriverCall, MockDriver};
pub use snapshot::tree_to_string;
