//! A module containing [`RawStorage`], the uninitialized block of memory that backs a
//! [`Vector`](super::Vector).
//!
//! [`RawStorage`] is also re-exported under the parent module.

mod raw_storage;

pub use raw_storage::*;
#[doc(inline)]
pub use crate::util::error::{AllocFailure, CapacityOverflow, TryReserveError};
