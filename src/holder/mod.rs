//! A value embedded in caller-declared, fixed-size storage.
//!
//! An `Inlay<T, SIZE, ALIGN>` holds exactly one `T` inside `SIZE` bytes aligned to
//! `ALIGN`, stored as part of the holder itself. There is no heap allocation and no
//! pointer to chase: the holder *is* the storage.
//!
//! This lets a public type carry an implementation value whose definition stays
//! private to one module, while its own size is fixed by the declaration rather
//! than by the implementation type. If the declaration is wrong the build fails
//! and the error reports the right numbers (see [`crate::layout`]).
//!
//! ## Lifecycle
//! - constructed by [`Inlay::new`] and friends, which write the value into storage;
//! - copied with [`Clone`], assigned through [`Clone::clone_from`], [`Inlay::assign`]
//!   and [`Inlay::move_assign_from`], all of which go through `T`'s own operations on
//!   the live value;
//! - dropped in place when the holder drops.
//!
//! Moving an `Inlay` moves its bytes like any other Rust value; nothing ever points
//! into the storage from outside, so relocation is always sound.

mod ops;

use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::Range;
use core::panic::RefUnwindSafe;

use crate::layout::{LayoutCheck, LayoutReport, LayoutSpec};
use crate::storage::raw::RawStorage;
use crate::storage::{Align, Alignment};
use crate::trace::{self, Lifecycle};

/// A `T` stored inline in `SIZE` bytes aligned to `ALIGN`.
///
/// With `STRICT = true` the declaration must match `T` exactly; otherwise it must
/// be large enough and suitably aligned. See [`crate::layout`] for the rules.
///
/// ```
/// use inlay::Inlay;
///
/// let mut held: Inlay<String, 24, 8> = Inlay::new(String::from("hello"));
/// held.push_str(", world");
/// assert_eq!(held.as_str(), "hello, world");
/// ```
pub struct Inlay<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool = false>
where
    Align<ALIGN>: Alignment,
{
    storage: RawStorage<SIZE, <Align<ALIGN> as Alignment>::Marker>,
    _held: PhantomData<T>,
}

/// An [`Inlay`] whose declaration must match the held type exactly.
pub type StrictInlay<T, const SIZE: usize, const ALIGN: usize> = Inlay<T, SIZE, ALIGN, true>;

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    /// Declared storage size in bytes.
    pub const DECLARED_SIZE: usize = SIZE;

    /// Declared storage alignment in bytes.
    pub const DECLARED_ALIGN: usize = ALIGN;

    /// Whether the declaration must match `T` exactly.
    pub const IS_STRICT: bool = STRICT;

    /// Embeds `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        let () = LayoutCheck::<T, SIZE, ALIGN, STRICT>::VALID;

        let mut storage = RawStorage::uninit();
        // SAFETY: the layout check above proves `T` fits; the storage is fresh.
        unsafe { storage.write(value) };

        trace::lifecycle::<T>(Lifecycle::Construct, Self::declared());
        Self {
            storage,
            _held: PhantomData,
        }
    }

    /// Embeds the value produced by `init`.
    ///
    /// A panic in `init` propagates; no holder is created.
    #[inline]
    pub fn new_with<F>(init: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::new(init())
    }

    /// Embeds the value produced by a fallible `init`.
    ///
    /// `init`'s error is returned unchanged.
    ///
    /// ```
    /// use inlay::Inlay;
    ///
    /// let parsed: Result<Inlay<u16, 2, 2>, _> = Inlay::try_new_with(|| "70000".parse::<u16>());
    /// assert!(parsed.is_err());
    /// ```
    #[inline]
    pub fn try_new_with<E, F>(init: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        init().map(Self::new)
    }

    /// Initialises the value directly through a pointer into fresh storage.
    ///
    /// Useful when `T` is large or must be built field by field.
    ///
    /// # Safety
    /// `init` must leave a fully initialised `T` behind the pointer. If `init`
    /// panics, whatever it wrote is leaked, not dropped.
    ///
    /// ```
    /// use inlay::Inlay;
    ///
    /// let held: Inlay<[u32; 4], 16, 4> = unsafe {
    ///     Inlay::from_raw_init(|slot: *mut [u32; 4]| {
    ///         for i in 0..4 {
    ///             slot.cast::<u32>().add(i).write(i as u32 * 10);
    ///         }
    ///     })
    /// };
    /// assert_eq!(*held, [0, 10, 20, 30]);
    /// ```
    pub unsafe fn from_raw_init<F>(init: F) -> Self
    where
        F: FnOnce(*mut T),
    {
        let () = LayoutCheck::<T, SIZE, ALIGN, STRICT>::VALID;

        let mut storage = RawStorage::uninit();
        init(storage.as_mut_ptr::<T>());

        trace::lifecycle::<T>(Lifecycle::Construct, Self::declared());
        Self {
            storage,
            _held: PhantomData,
        }
    }

    /// Builds a new holder by moving `other`'s value out, leaving `T::default()`
    /// behind. `other` stays usable and droppable.
    #[inline]
    pub fn take_from(other: &mut Self) -> Self
    where
        T: Default,
    {
        Self::new(mem::take(other.get_mut()))
    }

    /// Shared access to the held value.
    #[inline(always)]
    pub fn get(&self) -> &T {
        // SAFETY: a constructed holder always holds a live `T`.
        unsafe { self.storage.assume_init_ref::<T>() }
    }

    /// Exclusive access to the held value.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: a constructed holder always holds a live `T`; `&mut self` is exclusive.
        unsafe { self.storage.assume_init_mut::<T>() }
    }

    /// Pointer to the held value. It lies inside [`Inlay::storage_span`].
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr::<T>()
    }

    /// Mutable pointer to the held value.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr::<T>()
    }

    /// Address range of the embedded storage.
    #[inline]
    pub fn storage_span(&self) -> Range<usize> {
        self.storage.span()
    }

    /// Returns `true` if `addr` lies within the embedded storage.
    #[inline]
    pub fn contains_addr(&self, addr: usize) -> bool {
        self.storage_span().contains(&addr)
    }

    /// Moves the value out, consuming the holder.
    #[inline]
    pub fn into_inner(self) -> T {
        let this = ManuallyDrop::new(self);
        // SAFETY: the value is live, and `ManuallyDrop` keeps the holder's `Drop`
        // from touching it again.
        unsafe { this.storage.read::<T>() }
    }

    /// Replaces the held value, returning the old one.
    #[inline]
    pub fn replace(&mut self, value: T) -> T {
        mem::replace(self.get_mut(), value)
    }

    /// Assigns `other`'s value into the live value (move assignment).
    ///
    /// The previous value is dropped by the assignment; the storage itself is
    /// never torn down.
    #[inline]
    pub fn assign(&mut self, other: Self) {
        *self.get_mut() = other.into_inner();
    }

    /// Move-assigns from `other`, leaving `T::default()` in it.
    #[inline]
    pub fn move_assign_from(&mut self, other: &mut Self)
    where
        T: Default,
    {
        *self.get_mut() = mem::take(other.get_mut());
    }

    /// Copy-assigns from `other` through `T::clone_from`.
    #[inline]
    pub fn assign_clone(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.get_mut().clone_from(other.get());
    }

    /// The declared layout.
    #[inline]
    pub const fn declared() -> LayoutSpec {
        LayoutSpec::new(SIZE, ALIGN)
    }

    /// Declared versus actual layout of this holder type.
    #[inline]
    pub const fn layout() -> LayoutReport {
        LayoutCheck::<T, SIZE, ALIGN, STRICT>::REPORT
    }
}

// SAFETY: the storage's `UnsafeCell` is only reached through `T`'s own API, so
// sharing the holder is exactly as safe as sharing `T`. `Send` already follows
// `T` through `PhantomData<T>`.
unsafe impl<T: Sync, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Sync for Inlay<T, SIZE, ALIGN, STRICT> where
    Align<ALIGN>: Alignment
{
}

impl<T: RefUnwindSafe, const SIZE: usize, const ALIGN: usize, const STRICT: bool> RefUnwindSafe
    for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Drop for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn drop(&mut self) {
        let () = LayoutCheck::<T, SIZE, ALIGN, STRICT>::VALID;

        trace::lifecycle::<T>(Lifecycle::Drop, Self::declared());
        // SAFETY: the value is live and this is the only place it is dropped.
        unsafe { self.storage.drop_in_place::<T>() }
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Clone for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.get().clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_clone(source);
    }
}
