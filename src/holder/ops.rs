//! Trait forwarding for `Inlay`.
//!
//! The holder behaves like the value it holds: it dereferences to it, compares,
//! hashes and formats as it does, and serialises as it does.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Inlay;
use crate::storage::{Align, Alignment};

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Deref for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> DerefMut for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> AsRef<T> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> AsMut<T> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Borrow<T> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn borrow(&self) -> &T {
        self.get()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> BorrowMut<T> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn borrow_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> From<T> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Default for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> fmt::Debug for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Inlay").field(self.get()).finish()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> fmt::Display for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> PartialEq for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Eq for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Eq,
{
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> PartialOrd for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.get().partial_cmp(other.get())
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Ord for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(other.get())
    }
}

impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Hash for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

// Serialised form is exactly the held value's.
impl<T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Serialize for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, T, const SIZE: usize, const ALIGN: usize, const STRICT: bool> Deserialize<'de> for Inlay<T, SIZE, ALIGN, STRICT>
where
    Align<ALIGN>: Alignment,
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
