//! This crate is a from-scratch take on the growable contiguous container: a [`Vector`] built on
//! top of a hand-managed block of uninitialized memory, [`RawStorage`].
//!
//! # Purpose
//! The interesting part of a vector isn't the API, it's the memory management underneath it:
//! keeping the allocated capacity separate from the number of live elements, growing the storage
//! geometrically, and constructing values in place anywhere in the buffer (including the middle)
//! without ever dropping or duplicating a value by accident.
//!
//! # Method
//! [`RawStorage`] owns the memory and nothing else. It never constructs or drops a value, because
//! it has no idea which of its slots are live. [`Vector`] owns one RawStorage plus a length and is
//! the only thing that constructs, relocates or drops elements.
//!
//! Relocating an element in Rust is a bitwise move that can't fail, so unlike a language with
//! throwing move constructors, growing the storage never has to choose between moving and copying
//! its elements. The only operations that can fail partway through are the ones that run user
//! code (`Default`, `Clone` or an emplace closure), and those are written so that a panic drops
//! whatever was constructed and releases whatever was allocated.
//!
//! # Error Handling
//! Like [`Vec`], the infallible methods panic on capacity overflow and defer to
//! [`handle_alloc_error`](std::alloc::handle_alloc_error) when the allocator fails. Every
//! allocating method also has a `try_` counterpart that returns a
//! [`TryReserveError`](collections::contiguous::raw::TryReserveError) instead.
//!
//! Safe indexing always panics when out of bounds. The unchecked slot accessors on
//! [`RawStorage`] only check their bounds with debug assertions.
//!
//! # Dependencies
//! This crate uses `std` for the global allocator and doesn't use [`Vec`] for anything other than
//! tests. It depends on some derive macros for its error types because they remove the need for
//! some very repetitive programming.
//!
//! [`Vector`]: collections::contiguous::Vector
//! [`RawStorage`]: collections::contiguous::RawStorage

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
