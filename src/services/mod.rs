//! Business logic services.
//!
//! Services orchestrate the matcher, the policy, and the record store, and
//! provide the high-level operations the feed and the CLI call into.

mod tracker;

pub use tracker::TrackerService;
