//! Deterministic in-memory source adapters.
//!
//! These stand in for network providers: fully offline, seeded by symbol
//! so output is stable across runs, and able to reproduce every upstream
//! table shape the normalizer must handle.

mod sample;

pub use sample::{SampleHistorySource, SampleNewsSource, TableShape};
