use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was outside of the valid range for the collection it was used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The index that was used.
    pub index: usize,
    /// The length of the collection at the time.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// The requested capacity can't be represented, either because computing it overflowed or because
/// the resulting allocation would exceed [`isize::MAX`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The global allocator couldn't satisfy a request for `layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailure {
    /// The layout of the allocation that failed.
    pub layout: Layout,
}

impl Display for AllocFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to allocate {} bytes with alignment {}!",
            self.layout.size(),
            self.layout.align(),
        )
    }
}

impl Error for AllocFailure {}

/// The reasons that a fallible allocation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum TryReserveError {
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`AllocFailure`].
    AllocFailure(AllocFailure),
}

impl TryReserveError {
    /// Escalates the error in the way the infallible methods do: a capacity overflow panics, while
    /// allocation failure is handed to [`handle_alloc_error`](std::alloc::handle_alloc_error).
    ///
    /// # Panics
    /// Panics if self is a [`CapacityOverflow`].
    pub(crate) fn escalate(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow(overflow) => panic!("{}", overflow),
            TryReserveError::AllocFailure(AllocFailure { layout }) => {
                std::alloc::handle_alloc_error(layout)
            },
        }
    }
}
