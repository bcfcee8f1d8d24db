//! Embedded byte storage and the unsafe slot operations performed on it.
//!
//! `RawStorage<SIZE, A>` is `SIZE` uninitialised bytes aligned like the marker `A`.
//! It knows nothing about what lives inside; the holder layer tracks that. Every
//! operation that reinterprets the bytes as a `T` is funnelled through the small
//! set of `unsafe fn`s below so the safety conditions can be audited in one place.
//!
//! ## Caller contract
//! For every `T` passed to these functions:
//! - `size_of::<T>() <= SIZE` and `align_of::<A>() % align_of::<T>() == 0`
//!   (enforced at build time by `layout::LayoutCheck` before any call), and
//! - the slot holds a live `T` exactly between a `write` and the matching
//!   `read` / `drop_in_place`.
//!
//! The bytes sit in an `UnsafeCell`, so a `&T` handed out from `&RawStorage` may
//! still be mutated through `T`'s own interior mutability (`Cell`, atomics, locks).

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::ops::Range;
use core::ptr;

/// `SIZE` bytes of storage aligned to `align_of::<A>()`.
///
/// The zero-length `[A; 0]` field contributes alignment but no size.
/// `UnsafeCell` is `!Sync`, so the owner decides when sharing is sound.
#[repr(C)]
pub(crate) struct RawStorage<const SIZE: usize, A> {
    _align: [A; 0],
    bytes: UnsafeCell<[MaybeUninit<u8>; SIZE]>,
}

impl<const SIZE: usize, A> RawStorage<SIZE, A> {
    /// Uninitialised storage.
    #[inline(always)]
    pub(crate) const fn uninit() -> Self {
        Self {
            _align: [],
            bytes: UnsafeCell::new([MaybeUninit::uninit(); SIZE]),
        }
    }

    /// Pointer to the start of the storage, typed as `T`.
    #[inline(always)]
    pub(crate) const fn as_ptr<T>(&self) -> *const T {
        self.bytes.get().cast::<T>().cast_const()
    }

    /// Mutable pointer to the start of the storage, typed as `T`.
    #[inline(always)]
    pub(crate) fn as_mut_ptr<T>(&mut self) -> *mut T {
        self.bytes.get_mut().as_mut_ptr().cast::<T>()
    }

    /// Mutable pointer derived from a shared borrow.
    ///
    /// Writes through it are allowed only where `T` itself permits shared
    /// mutation.
    #[inline(always)]
    pub(crate) const fn as_shared_mut_ptr<T>(&self) -> *mut T {
        self.bytes.get().cast::<T>()
    }

    /// Address range `[start, start + SIZE)` covered by the storage.
    #[inline]
    pub(crate) fn span(&self) -> Range<usize> {
        let start = self.bytes.get() as usize;
        start..start + SIZE
    }

    /// Moves `value` into the slot.
    ///
    /// # Safety
    /// - `T` must fit the storage (see the module contract).
    /// - The slot must not hold a live `T`; an existing value would be leaked.
    #[inline(always)]
    pub(crate) unsafe fn write<T>(&mut self, value: T) {
        // SAFETY: caller guarantees size and alignment fit; the pointer is derived
        // from a live, exclusively borrowed buffer.
        unsafe { ptr::write(self.as_mut_ptr::<T>(), value) }
    }

    /// Interprets the slot as `&T`.
    ///
    /// # Safety
    /// - The slot must hold a live `T`.
    #[inline(always)]
    pub(crate) unsafe fn assume_init_ref<T>(&self) -> &T {
        // SAFETY: caller asserts the slot is initialised; alignment is checked at build time.
        // The pointer comes from `UnsafeCell::get`, so `T`'s interior mutability stays valid.
        unsafe { &*self.as_shared_mut_ptr::<T>() }
    }

    /// Interprets the slot as `&mut T`.
    ///
    /// # Safety
    /// - The slot must hold a live `T`.
    #[inline(always)]
    pub(crate) unsafe fn assume_init_mut<T>(&mut self) -> &mut T {
        // SAFETY: caller asserts the slot is initialised; `&mut self` makes it exclusive.
        unsafe { &mut *self.as_mut_ptr::<T>() }
    }

    /// Bitwise-moves the live value out of the slot.
    ///
    /// # Safety
    /// - The slot must hold a live `T`.
    /// - Afterwards the slot is logically empty; the caller must not drop it again.
    #[inline(always)]
    pub(crate) unsafe fn read<T>(&self) -> T {
        // SAFETY: caller asserts initialisation and takes over ownership.
        unsafe { ptr::read(self.as_ptr::<T>()) }
    }

    /// Drops the live value in place.
    ///
    /// # Safety
    /// - The slot must hold a live `T`.
    /// - Must not be called twice for the same value.
    #[inline(always)]
    pub(crate) unsafe fn drop_in_place<T>(&mut self) {
        // SAFETY: caller asserts initialisation and drop uniqueness.
        unsafe { ptr::drop_in_place(self.as_mut_ptr::<T>()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::align::{A16, A8};
    use core::mem;

    #[test]
    fn storage_layout_follows_marker() {
        assert_eq!(mem::size_of::<RawStorage<16, A8>>(), 16);
        assert_eq!(mem::align_of::<RawStorage<16, A8>>(), 8);
        // Size rounds up to the alignment.
        assert_eq!(mem::size_of::<RawStorage<20, A16>>(), 32);
        assert_eq!(mem::size_of::<RawStorage<0, A8>>(), 0);
    }

    #[test]
    fn write_read_round_trip() {
        let mut storage = RawStorage::<8, A8>::uninit();
        unsafe {
            storage.write(0xDEAD_BEEF_u64);
            assert_eq!(*storage.assume_init_ref::<u64>(), 0xDEAD_BEEF);
            *storage.assume_init_mut::<u64>() += 1;
            assert_eq!(storage.read::<u64>(), 0xDEAD_BEF0);
        }
    }

    #[test]
    fn span_covers_declared_bytes() {
        let storage = RawStorage::<24, A8>::uninit();
        let span = storage.span();
        assert_eq!(span.end - span.start, 24);
        assert_eq!(span.start % 8, 0);
        assert_eq!(span.start, storage.as_ptr::<u8>() as usize);
    }

    #[test]
    fn shared_reference_permits_interior_mutation() {
        use core::cell::Cell;
        use core::sync::atomic::{AtomicUsize, Ordering};

        let mut cell = RawStorage::<4, A8>::uninit();
        let mut atomic = RawStorage::<8, A8>::uninit();
        unsafe {
            cell.write(Cell::new(1_u32));
            atomic.write(AtomicUsize::new(0));

            let shared = &cell;
            shared.assume_init_ref::<Cell<u32>>().set(2);
            assert_eq!(shared.assume_init_ref::<Cell<u32>>().get(), 2);

            let shared = &atomic;
            shared.assume_init_ref::<AtomicUsize>().fetch_add(3, Ordering::Relaxed);
            assert_eq!(shared.assume_init_ref::<AtomicUsize>().load(Ordering::Relaxed), 3);
        }
    }

    #[test]
    fn drop_in_place_runs_destructor() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut storage = RawStorage::<{ mem::size_of::<Rc<()>>() }, A8>::uninit();
        unsafe {
            storage.write(Rc::clone(&shared));
            assert_eq!(Rc::strong_count(&shared), 2);
            storage.drop_in_place::<Rc<()>>();
        }
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
