//! telemetry/mod.rs
//! Per-call result snapshots: sizes, ratio, throughput and elapsed time.
//!
//! Snapshots are built after a call finishes, from the files it read and
//! wrote, so codecs stay free of bookkeeping.

pub mod snapshot;

pub use snapshot::*;
