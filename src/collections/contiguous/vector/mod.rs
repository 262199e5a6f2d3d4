//! A module containing [`Vector`] and associtated types.
//!
//! Currently, the only other included type is [`IntoIter`] for owned iteration over a Vector.
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are used for
//! borrowed iteration.
//!
//! [`Vector`] is also re-exported under the parent module.

mod iter;
mod tests;
mod vector;

pub use iter::*;
pub use vector::*;
#[doc(inline)]
pub use crate::util::error::IndexOutOfBounds;
