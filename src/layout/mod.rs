//! Size and alignment validation for embedded storage.
//!
//! A holder declares `SIZE` and `ALIGN` up front; the held type's real layout is
//! only known where the type itself is visible. The rules below decide whether the
//! declaration can host the type:
//!
//! | policy | size rule | alignment rule |
//! |---|---|---|
//! | [`LayoutPolicy::Loose`] | `SIZE >= size_of::<T>()` | `ALIGN % align_of::<T>() == 0` |
//! | [`LayoutPolicy::Strict`] | `SIZE == size_of::<T>()` | `ALIGN == align_of::<T>()` |
//!
//! `ALIGN` must also be a power of two. Rules are checked in that order and the
//! first failure wins.
//!
//! The same rule set runs in two places:
//! - at build time, through [`LayoutCheck::VALID`], which every holder constructor
//!   and destructor references. A bad declaration does not compile, and the error
//!   text carries the declared and actual values so the declaration can be fixed
//!   without knowing the type's layout ahead of time;
//! - at run time, through [`LayoutReport::check`], for diagnostics and tooling.
//!
//! ```compile_fail
//! use inlay::Inlay;
//!
//! // `u64` needs 8 bytes; 4 are declared.
//! let held: Inlay<u64, 4, 8> = Inlay::new(7);
//! ```
//!
//! ```compile_fail
//! use inlay::StrictInlay;
//!
//! // Large enough, but strict declarations must match exactly.
//! let held: StrictInlay<u32, 8, 4> = StrictInlay::new(7);
//! ```
//!
//! ```
//! use inlay::Inlay;
//!
//! // The loose policy accepts the same declaration.
//! let held: Inlay<u32, 8, 4> = Inlay::new(7);
//! assert_eq!(*held, 7);
//! ```
//!
//! ```compile_fail
//! use inlay::Inlay;
//!
//! // Under-aligned for `u64`.
//! let held: Inlay<u64, 8, 2> = Inlay::new(7);
//! ```

mod message;

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use message::Message;

/// Size and alignment of a type or of a declaration, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutSpec {
    /// Size in bytes.
    pub size: usize,
    /// Alignment in bytes.
    pub align: usize,
}

impl LayoutSpec {
    /// Creates a layout from raw values.
    pub const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// The actual layout of `T`.
    pub const fn of<T>() -> Self {
        Self {
            size: mem::size_of::<T>(),
            align: mem::align_of::<T>(),
        }
    }
}

impl fmt::Display for LayoutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size {} align {}", self.size, self.align)
    }
}

/// Which rule set a declaration is held to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutPolicy {
    /// Large enough and suitably aligned.
    #[default]
    Loose,
    /// Exactly the held type's size and alignment.
    Strict,
}

impl LayoutPolicy {
    /// Maps a holder's `STRICT` flag to a policy.
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Loose
        }
    }

    /// Returns `true` for [`LayoutPolicy::Strict`].
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// A declaration that cannot host the held type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// `SIZE < size_of::<T>()`.
    SizeTooSmall {
        /// Declared size.
        declared: usize,
        /// `size_of::<T>()`.
        actual: usize,
    },
    /// Strict policy and `SIZE != size_of::<T>()`.
    SizeMismatch {
        /// Declared size.
        declared: usize,
        /// `size_of::<T>()`.
        actual: usize,
    },
    /// `ALIGN` is not a power of two.
    UnsupportedAlign {
        /// Declared alignment.
        declared: usize,
    },
    /// `ALIGN % align_of::<T>() != 0`.
    AlignNotMultiple {
        /// Declared alignment.
        declared: usize,
        /// `align_of::<T>()`.
        actual: usize,
    },
    /// Strict policy and `ALIGN != align_of::<T>()`.
    AlignMismatch {
        /// Declared alignment.
        declared: usize,
        /// `align_of::<T>()`.
        actual: usize,
    },
}

impl LayoutError {
    const fn message(&self) -> Message {
        let (rule, declared, actual) = match *self {
            Self::SizeTooSmall { declared, actual } => {
                ("invalid SIZE: SIZE >= size_of::<T>() failed", declared, actual)
            }
            Self::SizeMismatch { declared, actual } => {
                ("invalid SIZE: SIZE == size_of::<T>() failed", declared, actual)
            }
            Self::UnsupportedAlign { declared } => {
                return Message::new()
                    .str("invalid ALIGN: ALIGN must be a power of two (declared ")
                    .usize(declared)
                    .str(")");
            }
            Self::AlignNotMultiple { declared, actual } => {
                ("invalid ALIGN: ALIGN % align_of::<T>() == 0 failed", declared, actual)
            }
            Self::AlignMismatch { declared, actual } => {
                ("invalid ALIGN: ALIGN == align_of::<T>() failed", declared, actual)
            }
        };
        Message::new()
            .str(rule)
            .str(" (declared ")
            .usize(declared)
            .str(", actual ")
            .usize(actual)
            .str(")")
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().as_str())
    }
}

impl std::error::Error for LayoutError {}

/// A declaration paired with the held type's actual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutReport {
    /// What the holder declares.
    pub declared: LayoutSpec,
    /// What the held type needs.
    pub actual: LayoutSpec,
    /// Rule set applied.
    pub policy: LayoutPolicy,
}

impl LayoutReport {
    /// Creates a report.
    pub const fn new(declared: LayoutSpec, actual: LayoutSpec, policy: LayoutPolicy) -> Self {
        Self {
            declared,
            actual,
            policy,
        }
    }

    /// Report for holding `T` in a `size`/`align` declaration.
    pub const fn for_type<T>(size: usize, align: usize, policy: LayoutPolicy) -> Self {
        Self::new(LayoutSpec::new(size, align), LayoutSpec::of::<T>(), policy)
    }

    /// Applies the rules, returning the first violation.
    pub const fn evaluate(&self) -> Option<LayoutError> {
        let strict = self.policy.is_strict();
        let declared = self.declared;
        let actual = self.actual;

        if declared.size < actual.size {
            return Some(LayoutError::SizeTooSmall {
                declared: declared.size,
                actual: actual.size,
            });
        }
        if strict && declared.size != actual.size {
            return Some(LayoutError::SizeMismatch {
                declared: declared.size,
                actual: actual.size,
            });
        }
        if !declared.align.is_power_of_two() {
            return Some(LayoutError::UnsupportedAlign {
                declared: declared.align,
            });
        }
        if declared.align % actual.align != 0 {
            return Some(LayoutError::AlignNotMultiple {
                declared: declared.align,
                actual: actual.align,
            });
        }
        if strict && declared.align != actual.align {
            return Some(LayoutError::AlignMismatch {
                declared: declared.align,
                actual: actual.align,
            });
        }
        None
    }

    /// Returns `true` if the declaration can host the type.
    pub const fn is_valid(&self) -> bool {
        self.evaluate().is_none()
    }

    /// Runtime form of the build-time check.
    pub fn check(&self) -> Result<(), LayoutError> {
        match self.evaluate() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The tightest declaration that passes under either policy.
    pub const fn suggested(&self) -> LayoutSpec {
        self.actual
    }

    /// Panics with the violation text if the declaration is invalid.
    ///
    /// Used from const evaluation, where the panic becomes a compile error.
    pub(crate) const fn enforce(&self) {
        if let Some(err) = self.evaluate() {
            let msg = err.message();
            panic!("{}", msg.as_str());
        }
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declared {}, actual {}", self.declared, self.actual)?;
        if self.policy.is_strict() {
            f.write_str(" (strict)")?;
        }
        Ok(())
    }
}

/// Build-time layout check for holding `T` in a `SIZE`/`ALIGN` declaration.
///
/// Naming [`LayoutCheck::VALID`] from code that gets compiled forces the check;
/// a failure aborts the build with the rule, declared, and actual values in the
/// error, e.g. `invalid SIZE: SIZE >= size_of::<T>() failed (declared 4, actual 8)`.
///
/// The constant is evaluated when a generic holder is monomorphised, which only
/// happens during code generation. `cargo build` and `cargo test` report a bad
/// declaration; `cargo check` does not. Use [`assert_layout!`](crate::assert_layout)
/// next to the declaration when the failure must also surface under `cargo check`.
#[doc(hidden)]
pub struct LayoutCheck<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool>(
    PhantomData<fn() -> T>,
);

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> LayoutCheck<T, SIZE, ALIGN, STRICT> {
    /// The report this check evaluates.
    pub const REPORT: LayoutReport =
        LayoutReport::for_type::<T>(SIZE, ALIGN, LayoutPolicy::from_strict(STRICT));

    /// Evaluates to `()` or fails the build.
    pub const VALID: () = Self::REPORT.enforce();
}
