//! Allocation accounting.
//!
//! Holders never allocate; [`CountingAlloc`] is how that is demonstrated. Install
//! it as the global allocator in a test binary and wrap the code under test in
//! [`measure`].

pub mod counting;

pub use counting::{measure, stats, AllocStats, CountingAlloc};
