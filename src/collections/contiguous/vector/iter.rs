use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use super::Vector;
use crate::collections::contiguous::RawStorage;

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        // The Vector's storage is taken, so there is nothing left for its Drop to release.
        let mut vec = ManuallyDrop::new(self);
        IntoIter {
            buf: vec.buf.take(),
            start: 0,
            end: vec.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over a [`Vector`]. See [`Vector::into_iter`].
///
/// The values in `[start, end)` of the storage are the ones that haven't been yielded yet.
pub struct IntoIter<T> {
    pub(crate) buf: RawStorage<T>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the remaining values as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: All values in [start, end) are initialized and within the storage.
        unsafe {
            slice::from_raw_parts(self.buf.slot_ptr(self.start).cast_const(), self.end - self.start)
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: The values in [start, end) haven't been yielded and are still live. Nothing
        // reads them after this.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot_ptr(self.start),
                self.end - self.start,
            ));
        }

        // Implicitly drop self.buf, releasing the memory.
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start < end, so the slot holds a live value. Incrementing start afterwards
            // means the value is effectively moved out of the storage.
            let value = unsafe { self.buf.slot_ptr(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: The newly decremented end is >= start and so holds a live value, which is
            // now outside of the remaining range.
            let value = unsafe { self.buf.slot_ptr(self.end).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

// Borrowed iteration uses the iter and iter_mut definitions provided by Deref<Target=[T]>.
