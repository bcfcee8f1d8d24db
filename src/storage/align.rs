//! Alignment markers.
//!
//! Stable Rust cannot write `#[repr(align(N))]` with a const generic `N`, so each
//! supported alignment gets a zero-sized marker type and `Align<N>` selects it
//! through the [`Alignment`] trait. A declared alignment with no marker (zero, a
//! non-power-of-two, or anything above 4096) has no `Alignment` impl and is
//! rejected by the compiler.

/// Type-level carrier for a declared byte alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Align<const N: usize>;

/// Maps a declared alignment to a zero-sized marker with that alignment.
///
/// Sealed; implemented for `Align<1>` through `Align<4096>` (powers of two).
pub trait Alignment: sealed::Sealed {
    /// Zero-sized type whose alignment equals the declared alignment.
    type Marker: Copy + Send + Sync + Unpin + 'static;

    /// The declared alignment in bytes.
    const BYTES: usize;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! alignment_markers {
    ($($name:ident = $n:literal),* $(,)?) => {
        $(
            #[doc = concat!("Zero-sized marker aligned to ", stringify!($n), " bytes.")]
            #[repr(align($n))]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl sealed::Sealed for Align<$n> {}

            impl Alignment for Align<$n> {
                type Marker = $name;
                const BYTES: usize = $n;
            }
        )*
    };
}

alignment_markers! {
    A1 = 1,
    A2 = 2,
    A4 = 4,
    A8 = 8,
    A16 = 16,
    A32 = 32,
    A64 = 64,
    A128 = 128,
    A256 = 256,
    A512 = 512,
    A1024 = 1024,
    A2048 = 2048,
    A4096 = 4096,
}
