//! Lifecycle tracing.
//!
//! With the `tracing` feature, holder construction and destruction emit `trace`
//! level events under the `inlay` target. Without it these calls compile away.

use crate::layout::LayoutSpec;

/// Holder lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    Construct,
    Drop,
}

impl Lifecycle {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    const fn as_str(self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::Drop => "drop",
        }
    }
}

#[inline(always)]
pub(crate) fn lifecycle<T>(event: Lifecycle, declared: LayoutSpec) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "inlay",
        event = event.as_str(),
        held = core::any::type_name::<T>(),
        size = declared.size,
        align = declared.align,
        "holder lifecycle"
    );

    #[cfg(not(feature = "tracing"))]
    let _ = (event, declared);
}
