/// Declares a public type backed by an embedded, concealed implementation value.
///
/// The generated tuple struct wraps an [`Inlay`](crate::Inlay) of the
/// implementation type and gets private helpers `from_impl`, `inner`,
/// `inner_mut` and `into_impl` for the module that defines it. The implementation
/// type can stay private; only its declared size and alignment leak into the
/// public type.
///
/// Append `strict` to require an exact layout match.
///
/// # Example
///
/// ```rust
/// mod widget {
///     struct WidgetImpl {
///         id: u64,
///         clicks: u64,
///     }
///
///     inlay::opaque! {
///         /// A clickable widget.
///         pub struct Widget(WidgetImpl; size = 16, align = 8, strict);
///     }
///
///     impl Widget {
///         pub fn new(id: u64) -> Self {
///             Self::from_impl(WidgetImpl { id, clicks: 0 })
///         }
///
///         pub fn click(&mut self) -> u64 {
///             self.inner_mut().clicks += 1;
///             self.inner().clicks
///         }
///
///         pub fn id(&self) -> u64 {
///             self.inner().id
///         }
///     }
/// }
///
/// let mut w = widget::Widget::new(7);
/// assert_eq!(w.click(), 1);
/// assert_eq!(w.click(), 2);
/// assert_eq!(w.id(), 7);
/// assert_eq!(std::mem::size_of::<widget::Widget>(), 16);
/// ```
#[macro_export]
macro_rules! opaque {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($inner:ty; size = $size:expr, align = $align:expr $(, $strict:ident)?);
    ) => {
        $(#[$meta])*
        $vis struct $name($crate::Inlay<$inner, { $size }, { $align }, { $crate::__strict_flag!($($strict)?) }>);

        #[allow(dead_code)]
        impl $name {
            fn from_impl(value: $inner) -> Self {
                Self($crate::Inlay::new(value))
            }

            fn inner(&self) -> &$inner {
                self.0.get()
            }

            fn inner_mut(&mut self) -> &mut $inner {
                self.0.get_mut()
            }

            fn into_impl(self) -> $inner {
                self.0.into_inner()
            }
        }
    };
}

/// Checks at compile time that `T` fits a `size`/`align` declaration.
///
/// Expands to a `const _` item, so it can sit next to the type definition and
/// fail the build without any value being constructed.
///
/// ```rust
/// inlay::assert_layout!(u64, size = 8, align = 8, strict);
/// inlay::assert_layout!([u8; 3], size = 16, align = 4);
/// ```
///
/// ```compile_fail
/// inlay::assert_layout!([u8; 12], size = 8, align = 8);
/// ```
///
/// ```compile_fail
/// inlay::assert_layout!(u32, size = 4, align = 3);
/// ```
#[macro_export]
macro_rules! assert_layout {
    ($t:ty, size = $size:expr, align = $align:expr $(, $strict:ident)?) => {
        const _: () = {
            let _ = <$crate::storage::Align<{ $align }> as $crate::storage::Alignment>::BYTES;
            $crate::layout::LayoutCheck::<$t, { $size }, { $align }, { $crate::__strict_flag!($($strict)?) }>::VALID
        };
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __strict_flag {
    () => {
        false
    };
    (strict) => {
        true
    };
}
