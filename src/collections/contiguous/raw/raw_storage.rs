use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

use crate::util::error::{AllocFailure, CapacityOverflow, TryReserveError};

/// A block of uninitialized memory with room for exactly `capacity` values of `T`.
///
/// RawStorage never constructs or drops a `T`. It has no way of knowing which slots hold live
/// values, so whoever places values inside is also responsible for dropping them before the
/// storage is deallocated. Dropping a RawStorage only releases the memory.
///
/// RawStorage doesn't implement [`Clone`], because two owners would both try to deallocate the
/// same block. Use [`RawStorage::take`] or [`RawStorage::swap`] to move a block between owners,
/// or [`RawStorage::allocate_like`] to get a second, empty block of the same capacity.
///
/// A capacity of zero never allocates, and neither does any capacity for a zero-sized `T`.
pub struct RawStorage<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawStorage<T> {
    /// Creates an empty RawStorage with capacity 0. Nothing is allocated.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::RawStorage;
    /// let raw: RawStorage<u8> = RawStorage::new();
    /// assert_eq!(raw.capacity(), 0);
    /// assert!(raw.as_ptr().is_null());
    /// ```
    pub const fn new() -> RawStorage<T> {
        RawStorage {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a block with room for exactly `cap` values of `T`, all of them uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`]. If the allocator itself
    /// fails, [`alloc::handle_alloc_error`] is called instead.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::RawStorage;
    /// let raw: RawStorage<u32> = RawStorage::allocate(4);
    /// assert_eq!(raw.capacity(), 4);
    /// assert!(!raw.as_ptr().is_null());
    /// ```
    pub fn allocate(cap: usize) -> RawStorage<T> {
        match Self::try_allocate(cap) {
            Ok(raw) => raw,
            Err(err) => err.escalate(),
        }
    }

    /// The fallible counterpart to [`RawStorage::allocate`].
    ///
    /// # Errors
    /// Returns [`TryReserveError::CapacityOverflow`] if the memory layout size would exceed
    /// [`isize::MAX`], or [`TryReserveError::AllocFailure`] if the allocator returns null.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::RawStorage;
    /// assert!(RawStorage::<u64>::try_allocate(usize::MAX).is_err());
    /// assert!(RawStorage::<u64>::try_allocate(8).is_ok());
    /// ```
    pub fn try_allocate(cap: usize) -> Result<RawStorage<T>, TryReserveError> {
        let layout = Self::make_layout(cap)?;
        let ptr = Self::make_ptr(layout)?;

        Ok(RawStorage {
            ptr,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Allocates a new block with the same capacity as self. None of the values held in self are
    /// copied, the new block is entirely uninitialized.
    ///
    /// # Panics
    /// Panics under the same conditions as [`RawStorage::allocate`].
    pub fn allocate_like(&self) -> RawStorage<T> {
        Self::allocate(self.cap)
    }

    /// Releases the block, leaving self empty with capacity 0. Calling this on an empty
    /// RawStorage does nothing.
    ///
    /// Any values still placed inside are leaked rather than dropped.
    pub fn deallocate(&mut self) {
        let size = size_of::<T>() * self.cap;

        if size != 0 {
            // SAFETY: This exact size and alignment was accepted by Layout::array when the block
            // was allocated, so it is a valid layout.
            let layout = unsafe { Layout::from_size_align_unchecked(size, align_of::<T>()) };

            // SAFETY: ptr was allocated in the global allocator with this layout. Zero-sized
            // layouts are never allocated and are guarded against above.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }

        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Returns the number of `T`-sized slots in the block, constructed or not.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns true if the block has capacity 0.
    pub const fn is_empty(&self) -> bool {
        self.cap == 0
    }

    /// Returns a pointer to the start of the block, or a null pointer if the capacity is 0.
    pub fn as_ptr(&self) -> *const T {
        if self.cap == 0 {
            ptr::null()
        } else {
            self.ptr.as_ptr().cast_const().cast()
        }
    }

    /// Returns a mutable pointer to the start of the block, or a null pointer if the capacity is
    /// 0.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.cap == 0 {
            ptr::null_mut()
        } else {
            self.ptr.as_ptr().cast()
        }
    }

    /// Returns a reference to the memory of the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than the capacity. This is only checked in debug builds. Reading the
    /// value is only valid if the caller knows the slot holds a live `T`.
    pub unsafe fn slot(&self, index: usize) -> &MaybeUninit<T> {
        debug_assert!(index < self.cap, "slot {index} out of bounds for capacity {}", self.cap);
        // SAFETY: The caller guarantees that index is in bounds of the allocation.
        unsafe { self.ptr.add(index).as_ref() }
    }

    /// Returns a mutable reference to the memory of the slot at `index`, suitable for writing a
    /// new value into.
    ///
    /// # Safety
    /// `index` must be less than the capacity. This is only checked in debug builds.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        debug_assert!(index < self.cap, "slot {index} out of bounds for capacity {}", self.cap);
        // SAFETY: The caller guarantees that index is in bounds of the allocation and the
        // mutable borrow of self prevents aliasing.
        unsafe { self.ptr.add(index).as_mut() }
    }

    /// Returns a raw pointer `offset` slots past the start of the block. An offset equal to the
    /// capacity is allowed and points one past the end.
    ///
    /// # Safety
    /// `offset` must be less than or equal to the capacity. This is only checked in debug builds.
    pub unsafe fn slot_ptr(&self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.cap, "offset {offset} out of bounds for capacity {}", self.cap);
        // SAFETY: The caller guarantees the offset stays within (or one past) the allocation,
        // which can't exceed isize::MAX bytes.
        unsafe { self.ptr.add(offset).as_ptr().cast() }
    }

    /// Exchanges the blocks owned by self and `other` without allocating.
    pub const fn swap(&mut self, other: &mut RawStorage<T>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }

    /// Moves the block out of self and into the returned RawStorage, leaving self empty.
    ///
    /// # Examples
    /// ```
    /// # use contiguous_lib::collections::contiguous::RawStorage;
    /// let mut raw: RawStorage<u8> = RawStorage::allocate(3);
    /// let moved = raw.take();
    /// assert_eq!(moved.capacity(), 3);
    /// assert_eq!(raw.capacity(), 0);
    /// ```
    pub fn take(&mut self) -> RawStorage<T> {
        let mut taken = RawStorage::new();
        self.swap(&mut taken);
        taken
    }

    /// A helper function to create a [`Layout`] for `cap` values of type `T`.
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    /// A helper function to allocate a block for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<MaybeUninit<T>>, AllocFailure> {
        if layout.size() == 0 {
            Ok(NonNull::dangling())
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).ok_or(AllocFailure { layout })
        }
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        self.deallocate();
    }
}

impl<T> Debug for RawStorage<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.as_ptr())
            .field("cap", &self.cap)
            .finish()
    }
}

// SAFETY: RawStorage uniquely owns its block, so sending it is as safe as sending the T values the
// owner places inside.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: RawStorage only hands out mutable access through &mut self, so no interior mutability
// occurs.
unsafe impl<T: Sync> Sync for RawStorage<T> {}
