use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::RawStorage;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, TryReserveError};
use crate::util::result::ResultExtension;

const MIN_NON_ZERO_CAP: usize = 1;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, built on top of a [`RawStorage<T>`].
///
/// The Vector keeps track of how many of the storage's slots hold live values (its length), all
/// remaining slots up to the capacity are uninitialized. When an insertion finds no spare
/// capacity, the Vector reallocates with double the capacity (or 1, when starting from 0).
///
/// Any operation that reallocates or shifts elements (`reserve`, growing `resize`, `push`,
/// `emplace`, `insert`, `remove`, `erase`) invalidates all outstanding pointers into the Vector.
/// The borrow checker prevents this for references, but raw pointers obtained through
/// [`as_ptr`](Vector::as_ptr) are the caller's responsibility.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)`*, `O(n)` |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `resize` | `O(n)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `swap` | `O(1)` |
/// | `take` | `O(1)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, the operation will take
/// `O(n)`.
///
/// \** If the Vector already has the requested capacity, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: RawStorage<T>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            buf: RawStorage::new(),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector {
            buf: RawStorage::allocate(cap),
            len: 0,
        }
    }

    /// The fallible counterpart to [`Vector::with_cap`].
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the capacity overflows or the allocation fails.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, TryReserveError> {
        Ok(Vector {
            buf: RawStorage::try_allocate(cap)?,
            len: 0,
        })
    }

    /// Creates a Vector containing exactly `count` values produced by `f`, with a capacity of
    /// exactly `count`.
    ///
    /// If `f` panics, all values produced so far are dropped and the storage is released before
    /// the panic continues.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut next = 0;
    /// let vec = Vector::repeat_with(3, || { next += 2; next });
    /// assert_eq!(&*vec, &[2, 4, 6]);
    /// ```
    pub fn repeat_with<F: FnMut() -> T>(count: usize, mut f: F) -> Vector<T> {
        let mut vec = Vector::with_cap(count);

        for _ in 0..count {
            // SAFETY: vec has been created with the right capacity.
            unsafe { vec.push_unchecked(f()); }
        }

        vec
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let vec: Vector<u8> = (1_u8..=3).collect();
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// assert!(vec.is_empty());
    /// vec.push(1);
    /// assert!(!vec.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to be
    /// exactly the value provided to any of the various capacity manipulation functions, or the
    /// result of doubling when the Vector grows by itself.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub const fn cap(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a pointer to the first element, or a null pointer if the Vector has capacity 0.
    /// The pointer is invalidated by any operation that reallocates or shifts elements.
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// The fallible counterpart to [`Vector::push`]. On failure, the value is dropped and the
    /// Vector is left untouched.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if growing the capacity overflows or the allocation fails.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        if self.len == self.cap() {
            let new_cap = self.grown_cap()?;
            let new_buf = RawStorage::try_allocate(new_cap)?;
            // SAFETY: The new storage has room for len + 1 values and len is a valid position.
            unsafe { self.emplace_into(new_buf, self.len, || value); }
        } else {
            // SAFETY: There is spare capacity for the new value.
            unsafe { self.push_unchecked(value); }
        }
        Ok(())
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap)
    /// to do so. Using this method on a Vector without enough capacity is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec = Vector::with_cap(3);
    /// for i in 1_u8..=3 {
    ///     // SAFETY: We know that vec has enough capacity to store all three values.
    ///     unsafe { vec.push_unchecked(i); }
    /// }
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// ```
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the storage.
        unsafe { self.buf.slot_mut(self.len).write(value); }
        self.len += 1;
    }

    /// Constructs a new value at the end of the Vector with `f`, returning a mutable reference to
    /// it. When there is no spare capacity, the value is written straight into the newly grown
    /// storage before the existing elements are relocated, so it is only ever constructed once.
    ///
    /// If `f` panics, the Vector is left unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<String> = Vector::new();
    /// vec.emplace_back(|| "hello".to_owned()).push_str(" world");
    /// assert_eq!(vec[0], "hello world");
    /// ```
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if self.len == self.cap() {
            self.realloc_emplace(self.len, f);
        } else {
            // SAFETY: There is spare capacity for the new value.
            unsafe { self.push_unchecked(f()); }
        }

        // SAFETY: The last slot was just initialized, so len > 0.
        unsafe { self.buf.slot_mut(self.len - 1).assume_init_mut() }
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0. Popping an empty Vector does nothing.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..5).collect();
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// assert_eq!(vec.len(), 0);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented and is within the capacity of the Vector, and
            // all values < the old len are initialized. The slot is now outside of len, so the
            // value is moved out and won't be dropped again.
            let value = unsafe { self.buf.slot_ptr(self.len).read() };
            Some(value)
        }
    }

    /// Constructs a new value with `f` at the given index, shifting all following values one slot
    /// to the right. Returns the index of the new value.
    ///
    /// With spare capacity, the value is constructed first and then moved into the gap left by
    /// shifting. Without spare capacity, the storage grows and the new value is written into the
    /// new storage first, with the values before and after it relocated around it.
    ///
    /// If `f` panics, the Vector is left unchanged.
    ///
    /// # Panics
    /// Panics if `index > len` or if the memory layout of the Vector would have a size that
    /// exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// assert_eq!(vec.emplace(1, || 100), 1);
    /// assert_eq!(vec.emplace(4, || 200), 4);
    /// assert_eq!(&*vec, &[0, 100, 1, 2, 200]);
    /// ```
    pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> usize {
        self.check_position(index);

        if self.len == self.cap() {
            self.realloc_emplace(index, f);
        } else if index == self.len {
            // SAFETY: There is spare capacity for the new value.
            unsafe { self.push_unchecked(f()); }
        } else {
            let value = f();

            // SAFETY: index < len < cap, so shifting [index, len) right by one stays within the
            // storage. The gap at index is then initialized before len is updated.
            unsafe {
                let gap = self.buf.slot_ptr(index);
                ptr::copy(gap, gap.add(1), self.len - index);
                gap.write(value);
            }
            self.len += 1;
        }

        index
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    /// Returns the index of the inserted value.
    ///
    /// # Panics
    /// Panics if `index > len` or if the memory layout of the Vector would have a size that
    /// exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(3, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 300, 1, 2]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.emplace(index, || value)
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the slot holds a live value. After reading it, the following
        // values are shifted left over it and len is reduced, so the duplicate in the last slot
        // falls outside of len.
        unsafe {
            let hole = self.buf.slot_ptr(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drops the element at the provided index, moving all following values to fill in the gap.
    /// Returns the index of the element that followed the erased one, which is `len` if the last
    /// element was erased.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = ['a', 'b', 'c'].into_iter().collect();
    /// assert_eq!(vec.erase(1), 1);
    /// assert_eq!(&*vec, &['a', 'c']);
    /// assert_eq!(vec.erase(1), vec.len());
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Ensures that the Vector has a capacity of at least `cap`. If the capacity is already large
    /// enough this does nothing, otherwise the storage is reallocated with exactly `cap` slots.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(4);
    /// vec.reserve(2);
    /// assert_eq!(vec.cap(), 4);
    /// vec.reserve(10);
    /// assert_eq!(vec.cap(), 10);
    /// ```
    pub fn reserve(&mut self, cap: usize) {
        if let Err(err) = self.try_reserve(cap) {
            err.escalate()
        }
    }

    /// The fallible counterpart to [`Vector::reserve`]. On failure, the Vector is left untouched.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the capacity overflows or the allocation fails.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), TryReserveError> {
        if cap <= self.cap() {
            return Ok(());
        }

        let new_buf = RawStorage::try_allocate(cap)?;
        // SAFETY: The new storage has room for more than len values.
        unsafe { self.relocate(new_buf); }
        Ok(())
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(10);
    /// vec.push(1);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.cap(), 1);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.cap() > self.len {
            let new_buf = RawStorage::allocate(self.len);
            // SAFETY: The new storage has room for exactly len values.
            unsafe { self.relocate(new_buf); }
        }
    }

    /// Resizes the Vector to `new_len`, filling any new slots with values produced by `f`.
    ///
    /// - Resizing to 0 drops every element and releases the storage, like [`Vector::reset`].
    /// - Shrinking drops the tail elements and keeps the capacity.
    /// - Growing reserves exactly `new_len` slots (if needed) before constructing the new tail.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        match new_len {
            0 => self.reset(),
            n if n < self.len => self.truncate(n),
            n => {
                self.reserve(n);
                while self.len < n {
                    // SAFETY: The capacity has just been adjusted to hold n values.
                    unsafe { self.push_unchecked(f()); }
                }
            },
        }
    }

    /// Shortens the Vector to `len` elements, dropping the rest. Does nothing if `len` is greater
    /// than or equal to the current length. The capacity is unaffected.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail_len = self.len - len;
        // Update len first so that a panicking drop can't cause a double drop.
        self.len = len;

        // SAFETY: The values in [len, len + tail_len) were live and are now outside of len, so
        // they are dropped exactly once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot_ptr(len),
                tail_len,
            ));
        }
    }

    /// Drops all elements in the Vector, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops all elements in the Vector and releases the storage, leaving an empty Vector with
    /// capacity 0.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..10).collect();
    /// vec.reset();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub fn reset(&mut self) {
        self.clear();
        self.buf.deallocate();
    }

    /// Moves all elements and the storage out of self into the returned Vector, leaving self
    /// empty with length and capacity 0. Nothing is allocated or copied.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// let moved = vec.take();
    /// assert_eq!(&*moved, &[0, 1, 2]);
    /// assert_eq!(vec.len(), 0);
    /// ```
    pub fn take(&mut self) -> Vector<T> {
        mem::take(self)
    }

    /// Replaces the contents of self with those of `source`, dropping the elements self held
    /// previously. `source` is left empty. Nothing is allocated.
    pub fn move_from(&mut self, source: &mut Vector<T>) {
        *self = source.take();
    }

    /// Exchanges the storage and elements of self and `other` without allocating.
    pub fn swap(&mut self, other: &mut Vector<T>) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Reallocates with a grown capacity, constructing the new value directly at `index` in the
    /// new storage.
    ///
    /// # Panics
    /// Panics if the grown capacity overflows.
    pub(crate) fn realloc_emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) {
        let new_cap = self.grown_cap().throw();
        let new_buf = RawStorage::allocate(new_cap);
        // SAFETY: The grown capacity is always greater than len and index <= len is upheld by
        // all callers.
        unsafe { self.emplace_into(new_buf, index, f); }
    }

    /// Writes the value produced by `f` into slot `index` of `new_buf`, then relocates all values
    /// before and after it and takes ownership of `new_buf`. If `f` panics, `new_buf` is released
    /// and self is untouched.
    ///
    /// # Safety
    /// `new_buf` must have a capacity greater than len, and `index` must be <= len.
    pub(crate) unsafe fn emplace_into<F: FnOnce() -> T>(
        &mut self,
        mut new_buf: RawStorage<T>,
        index: usize,
        f: F,
    ) {
        // SAFETY: index <= len < new_buf's capacity.
        unsafe { new_buf.slot_mut(index).write(f()); }

        // SAFETY: Both ranges are in bounds of their storage and the two blocks don't overlap.
        // Moving a value in Rust can't fail, so the relocation always completes.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.slot_ptr(0), new_buf.slot_ptr(0), index);
            ptr::copy_nonoverlapping(
                self.buf.slot_ptr(index),
                new_buf.slot_ptr(index + 1),
                self.len - index,
            );
        }

        // The old values have been moved out, so the old block is released without dropping
        // anything.
        self.buf.swap(&mut new_buf);
        self.len += 1;
    }

    /// Relocates all values into `new_buf` and takes ownership of it, releasing the old block.
    ///
    /// # Safety
    /// `new_buf` must have a capacity of at least len.
    pub(crate) unsafe fn relocate(&mut self, mut new_buf: RawStorage<T>) {
        // SAFETY: Both blocks have room for len values and don't overlap.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.slot_ptr(0), new_buf.slot_ptr(0), self.len);
        }
        self.buf.swap(&mut new_buf);
    }

    /// Returns the capacity the Vector should grow to when an insertion finds no spare capacity.
    pub(crate) fn grown_cap(&self) -> Result<usize, CapacityOverflow> {
        self.cap()
            .checked_mul(GROWTH_FACTOR)
            .map(|cap| cmp::max(cap, MIN_NON_ZERO_CAP))
            .ok_or(CapacityOverflow)
    }

    /// Checks that the provided index refers to a live element.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }

    /// Checks that the provided index is a valid insertion position, which includes `len`.
    ///
    /// # Panics
    /// Panics if the provided index is greater than len.
    pub(crate) fn check_position(&self, index: usize) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }
}

impl<T: Default> Vector<T> {
    /// Creates a new Vector with `count` default values of `T` and a capacity of exactly `count`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let vec: Vector<u32> = Vector::repeat_default(4);
    /// assert_eq!(&*vec, &[0, 0, 0, 0]);
    /// assert_eq!(vec.cap(), 4);
    /// ```
    pub fn repeat_default(count: usize) -> Vector<T> {
        Self::repeat_with(count, T::default)
    }

    /// Resizes the Vector to `new_len`, filling any new slots with the default value of `T`. See
    /// [`Vector::resize_with`].
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (1..=3).collect();
    /// vec.resize(5);
    /// assert_eq!(&*vec, &[1, 2, 3, 0, 0]);
    /// vec.resize(1);
    /// assert_eq!(&*vec, &[1]);
    /// assert_eq!(vec.cap(), 5);
    /// vec.resize(0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop. Nothing reads them
        // afterwards.
        unsafe { ptr::drop_in_place(self.deref_mut() as *mut [T]); }

        // Implicitly drop self.buf, which only releases the memory.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull and properly aligned (dangling for an empty Vector) and the range is entirely
        // contained within the storage. The total size is < isize::MAX as the result of being a
        // valid allocation.
        unsafe {
            slice::from_raw_parts(
                // Reinterpret *mut MaybeUninit<T> as *const T for all values < len.
                self.buf.ptr.as_ptr().cast_const().cast(),
                self.len,
            )
        }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, and the mutable borrow of self prevents any other access for the
        // lifetime of the slice.
        unsafe {
            slice::from_raw_parts_mut(
                // Reinterpret *mut MaybeUninit<T> as *mut T for all values < len.
                self.buf.ptr.as_ptr().cast(),
                self.len,
            )
        }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Creates a copy with a capacity equal to the length of self, rather than its capacity.
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap(self.len);

        for value in self.iter() {
            // SAFETY: vec has been created with room for every value in self.
            unsafe { vec.push_unchecked(value.clone()); }
        }

        vec
    }

    /// Overwrites self with a copy of `source`, reusing the existing storage where possible.
    ///
    /// If `source` doesn't fit in the current capacity, a full copy is made first and swapped in,
    /// so self is untouched if cloning panics. Otherwise, the shared prefix is cloned into place
    /// and the remaining values are either dropped or cloned into the free slots.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.cap() {
            let mut copy = source.clone();
            self.swap(&mut copy);
        } else if source.len < self.len {
            for (dst, src) in self.iter_mut().zip(source.iter()) {
                dst.clone_from(src);
            }
            self.truncate(source.len);
        } else {
            let (prefix, tail) = source.split_at(self.len);
            for (dst, src) in self.iter_mut().zip(prefix) {
                dst.clone_from(src);
            }
            for value in tail {
                // SAFETY: source.len <= cap, so there is room for every value in the tail.
                unsafe { self.push_unchecked(value.clone()); }
            }
        }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
