//! # `inlay` - Allocation-Free Opaque Holders
//!
//! Embeds a value of a concealed type inside fixed-size, fixed-alignment storage
//! that is declared up front and lives inside the holder itself. The holder gives
//! pointer-like access to the value without a heap allocation and without an
//! indirection, which makes it a drop-in replacement for `Box<Impl>` when a
//! public type wants to keep its implementation type out of its signature.
//!
//! ## Safety Guarantees
//!
//! ### Layout
//! - **Build-time validation**: a declaration that cannot host the held type does
//!   not compile. The compiler error names the failed rule together with the
//!   declared and actual size or alignment, so a deliberately wrong declaration
//!   can be used to discover the right one.
//! - **Two policies**: loose declarations must be large enough and suitably
//!   aligned; strict declarations must match exactly.
//!
//! ### Lifetime
//! - **Exactly one value**: between construction and destruction the storage
//!   holds exactly one live value, constructed once and dropped once.
//! - **Transparent failures**: errors and panics from the value's own
//!   constructors, assignments and destructor pass through untouched.
//! - **Audited unsafe**: all reinterpretation of raw bytes happens in
//!   `storage::raw`, behind documented safety contracts.
//!
//! ### Concurrency
//! - **Agnostic**: no locks, no atomics. A holder is `Send`/`Sync` exactly when the
//!   held type is.
//!
//! ## Architecture
//!
//! 1. **Storage** (`storage`): alignment markers and the raw byte buffer.
//! 2. **Layout** (`layout`): the rule set, evaluated at build time and mirrored
//!    at run time for diagnostics.
//! 3. **Holder** ([`Inlay`], [`StrictInlay`]): construction, access, assignment,
//!    destruction, and trait forwarding.
//! 4. **Macros** ([`opaque!`], [`assert_layout!`]): declare opaque public types and
//!    standalone layout assertions.
//! 5. **Allocation accounting** (`alloc`): a counting global allocator for proving
//!    code paths allocation-free.
//!
//! ## Example
//!
//! ```rust
//! use inlay::StrictInlay;
//!
//! struct Pair {
//!     left: u64,
//!     right: u64,
//! }
//!
//! let held: StrictInlay<Pair, 16, 8> = StrictInlay::new(Pair { left: 1, right: 2 });
//! assert_eq!(held.left, 1);
//! assert_eq!(held.right, 2);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
mod holder;
pub mod layout;
mod macros;
pub mod storage;
mod trace;

pub use holder::{Inlay, StrictInlay};
pub use layout::{LayoutError, LayoutPolicy, LayoutReport, LayoutSpec};

// Compile-time assertions for the zero-overhead layout claims.
const _: () = {
    use core::mem;

    // Storage is exactly the declaration, rounded up to its alignment.
    assert!(mem::size_of::<Inlay<u8, 16, 8>>() == 16);
    assert!(mem::align_of::<Inlay<u8, 16, 8>>() == 8);
    assert!(mem::size_of::<Inlay<u8, 20, 16>>() == 32);

    // A strict holder is the same size and alignment as what it holds.
    assert!(mem::size_of::<StrictInlay<u64, 8, 8>>() == mem::size_of::<u64>());
    assert!(mem::size_of::<StrictInlay<[u32; 3], 12, 4>>() == mem::size_of::<[u32; 3]>());

    // Zero-sized declarations stay zero-sized.
    assert!(mem::size_of::<StrictInlay<(), 0, 1>>() == 0);
};
