//! StaticVec: fixed-capacity vector with a single up-front allocation
//!
//! StaticVec allocates exactly `capacity` uninitialized slots when it is
//! created and never reallocates. Elements are written in place at the end of
//! the live prefix, and only the live prefix `[0, len)` is ever dropped. This
//! gives the densest possible layout for records that are never relocated:
//! sequential addresses, one allocation, no per-element indirection.
//!
//! The type is move-only. It has no `Clone` impl because its identity is the
//! allocation it owns; moving it transfers that allocation, and
//! [`std::mem::take`] transfers it while leaving an empty husk behind.

use crate::error::{BenchError, Result};
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Fixed-capacity vector that constructs elements in place
///
/// # Examples
///
/// ```rust
/// use layout_bench::StaticVec;
///
/// let mut vec = StaticVec::with_capacity(2).unwrap();
/// vec.push(42);
/// vec.push(84);
/// assert_eq!(vec.len(), 2);
/// assert_eq!(vec[1], 84);
/// assert!(vec.try_push(7).is_err());
/// ```
pub struct StaticVec<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> StaticVec<T> {
    /// Create an empty StaticVec that owns no allocation
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Create a StaticVec with room for exactly `cap` elements
    ///
    /// Fails with [`BenchError::OutOfMemory`] when the allocator cannot
    /// satisfy the request. Zero capacity and zero-sized `T` never allocate.
    pub fn with_capacity(cap: usize) -> Result<Self> {
        let layout = Layout::array::<T>(cap)
            .map_err(|_| BenchError::out_of_memory(cap.saturating_mul(mem::size_of::<T>())))?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw = unsafe { alloc::alloc(layout) } as *mut T;
            NonNull::new(raw).ok_or_else(|| BenchError::out_of_memory(layout.size()))?
        };

        Ok(Self {
            ptr,
            len: 0,
            cap,
            _marker: PhantomData,
        })
    }

    /// Get the number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the vector holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the fixed capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Check if every slot is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Get a pointer to the first slot
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Get a mutable pointer to the first slot
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Get the live elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Get the live elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Write `value` into the next free slot
    ///
    /// # Safety
    ///
    /// The caller must ensure that `self.len() < self.capacity()`
    #[inline]
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.len), value);
        }
        self.len += 1;
    }

    /// Write `value` into the next free slot, handing it back when full
    #[inline]
    pub fn try_push(&mut self, value: T) -> std::result::Result<(), T> {
        if self.len < self.cap {
            unsafe { self.push_unchecked(value) };
            Ok(())
        } else {
            Err(value)
        }
    }

    /// Write `value` into the next free slot
    ///
    /// # Panics
    ///
    /// Panics if the vector is full. StaticVec never grows.
    #[inline]
    pub fn push(&mut self, value: T) {
        assert!(
            self.len < self.cap,
            "StaticVec is full (capacity {})",
            self.cap
        );
        unsafe { self.push_unchecked(value) };
    }

    /// Get a reference to the element at `index`, if live
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Get a mutable reference to the element at `index`, if live
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Get a reference to the element at the specified index without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Get a mutable reference to the element at the specified index without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Iterate over the live elements in slot order
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the live elements in slot order
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drop every live element, keeping the allocation
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
        // A panicking destructor must not lead to a second drop from Drop.
        self.len = 0;
        unsafe {
            ptr::drop_in_place(live);
        }
    }
}

impl<T> Drop for StaticVec<T> {
    fn drop(&mut self) {
        self.clear();
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            if layout.size() != 0 {
                unsafe {
                    alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
                }
            }
        }
    }
}

impl<T> Default for StaticVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for StaticVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for StaticVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for StaticVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for StaticVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a StaticVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut StaticVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for StaticVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

// Safety: StaticVec<T> uniquely owns its elements, like Box<[T]>
unsafe impl<T: Send> Send for StaticVec<T> {}

// Safety: shared access only hands out &T
unsafe impl<T: Sync> Sync for StaticVec<T> {}
