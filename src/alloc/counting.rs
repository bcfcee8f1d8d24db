//! Allocation-counting global allocator.
//!
//! `CountingAlloc` forwards every request to [`System`] and counts it in
//! thread-local counters, so a test can assert that a block of code performs no
//! heap allocation on the current thread:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: inlay::alloc::CountingAlloc = inlay::alloc::CountingAlloc;
//!
//! let (held, stats) = inlay::alloc::measure(|| inlay::Inlay::<u64, 8, 8>::new(1));
//! assert_eq!(stats.allocations, 0);
//! ```
//!
//! Counters are per thread, so allocations made concurrently by other test
//! threads do not leak into a measurement. They only move while `CountingAlloc`
//! is installed as the global allocator.

use core::alloc::{GlobalAlloc, Layout};
use core::cell::Cell;
use std::alloc::System;

/// Global allocator that counts requests per thread and delegates to [`System`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingAlloc;

/// Allocation counters for one thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Calls to `alloc`, `alloc_zeroed` and `realloc`.
    pub allocations: usize,
    /// Calls to `dealloc`.
    pub deallocations: usize,
    /// Bytes requested by the counted allocations.
    pub bytes: usize,
}

impl AllocStats {
    /// Counter growth from `earlier` to `self`.
    pub fn since(&self, earlier: &AllocStats) -> AllocStats {
        AllocStats {
            allocations: self.allocations.wrapping_sub(earlier.allocations),
            deallocations: self.deallocations.wrapping_sub(earlier.deallocations),
            bytes: self.bytes.wrapping_sub(earlier.bytes),
        }
    }
}

// Const-initialised `Cell`s need no lazy registration or destructor, so touching
// them from inside the allocator cannot recurse into it.
thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static DEALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static BYTES: Cell<usize> = const { Cell::new(0) };
}

#[inline]
fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>, by: usize) {
    // During thread teardown the slot may be gone; such requests go uncounted.
    let _ = counter.try_with(|c| c.set(c.get().wrapping_add(by)));
}

#[inline]
fn record_alloc(layout: Layout) {
    bump(&ALLOCATIONS, 1);
    bump(&BYTES, layout.size());
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record_alloc(layout);
        // SAFETY: forwarded verbatim; the caller upholds `GlobalAlloc::alloc`'s contract.
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record_alloc(layout);
        // SAFETY: as for `alloc`.
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        bump(&DEALLOCATIONS, 1);
        // SAFETY: `ptr` came from `System` through this allocator with `layout`.
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        bump(&ALLOCATIONS, 1);
        bump(&BYTES, new_size);
        // SAFETY: `ptr` came from `System` through this allocator with `layout`.
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// Current counters for the calling thread.
pub fn stats() -> AllocStats {
    AllocStats {
        allocations: ALLOCATIONS.with(Cell::get),
        deallocations: DEALLOCATIONS.with(Cell::get),
        bytes: BYTES.with(Cell::get),
    }
}

/// Runs `f` and returns its result with the allocations it made on this thread.
pub fn measure<R, F>(f: F) -> (R, AllocStats)
where
    F: FnOnce() -> R,
{
    let before = stats();
    let result = f();
    let after = stats();
    (result, after.since(&before))
}
