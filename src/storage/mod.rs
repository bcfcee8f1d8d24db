//! Raw embedded storage.
//!
//! - `align` turns a declared alignment into a marker type.
//! - `raw` is the byte buffer plus the only unsafe slot operations in the crate.

pub mod align;
pub(crate) mod raw;

pub use align::{Align, Alignment};
