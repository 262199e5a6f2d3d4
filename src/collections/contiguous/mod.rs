//! Contiguous collection types. Namely [`Vector`], a growable collection, and [`RawStorage`], the
//! uninitialized block of memory it is built on.
#![warn(missing_docs)]

pub mod raw;
pub mod vector;

#[doc(inline)]
pub use raw::{RawStorage, TryReserveError};
#[doc(inline)]
pub use vector::Vector;
