#![doc = crate::doc_macro::svgbob_doc!(
//! # `seqbuf`
//! Growable sequence buffers whose metadata lives in the same allocation as the
//! elements.
//!
//! 1. [Summary](#summary)
//! 1. [Memory layout](#memory-layout)
//! 1. [Examples](#examples)
//! 1. [Two layers](#two-layers)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! A `Vec<T>` is three words: pointer, length and capacity. A [`SeqBuf<T>`] is one
//! word. Its length, capacity and element layout are stored in a small header at
//! the start of the heap block, immediately before the first element, so the
//! handle you hold points straight at element 0 and can be handed to code that
//! expects a plain pointer to an array.
//!
//! # Memory layout
//!
//! ```svgbob
//!   "SeqBuf<u32>"
//!   +-----+
//!   | ptr |
//!   +-----+
//!      |
//!      '-------------------------------.
//!                                      v
//! +-----+-----+------+------------+-----+-----+-----+- - - - - - - +
//! | "3" | "4" | "4"  | "8"        | "7" | "8" | "9" | "spare"      |
//! +-----+-----+------+------------+-----+-----+-----+- - - - - - - +
//!  len   cap   size   align        "elements"
//! ```
//!
//! # Examples
//!
//! ```
//! use seqbuf::prelude::*;
//!
//! let mut s: SeqBuf<u32> = SeqBuf::new();
//! s.extend([7, 8, 9]);
//! s.insert(0, 6);
//! assert_eq!(&s[..], &[6, 7, 8, 9]);
//!
//! // The handle is the address of the first element.
//! assert_eq!(s.as_raw().as_ptr() as *const u32, s.as_ptr());
//! assert_eq!(unsafe { *s.as_ptr() }, 6);
//! ```
//!
//! # Two layers
//!
//! * [`raw`] is the type-erased layer. A buffer is a [`RawHandle`](raw::RawHandle)
//!   and a fixed element size in bytes. Every operation is an `unsafe` function,
//!   and any operation that may reallocate returns the handle to use from then on.
//! * [`SeqBuf<T, G>`] wraps a handle with ownership. It checks positions, updates
//!   its handle after every reallocation, and frees the block on drop. The type
//!   parameter `G` is the [growth policy](growth).
//!
//! # Feature flags
//!
//! This crate has no *required* dependencies. The following feature flags exist,
//! which can turn on some dependencies.
//!
//! * `macro`. Enables [`#[derive(Zeroable)]`][macro@crate::Zeroable]. Adds a dependency on `seqbuf_macro`, `syn` and `quote`.
//! * `bumpalo`. Enables [`SeqBuf::copy_into_bump`], which copies the elements into a `bumpalo::Bump` arena. Adds a dependency on `bumpalo`.
//! * `log`. Emits a `log::trace!` record on every reallocation. Adds a dependency on `log`.
//! * `doc`. Renders the diagrams in this documentation as SVG. Adds a dependency on `svgbobdoc`.
)]
#![no_std]
extern crate alloc;

#[cfg(any(doc, test))]
extern crate std;

#[cfg(feature = "log")]
macro_rules! realloc_trace {
    ($($arg:tt)*) => (
        log::trace!($($arg)*)
    );
}

#[cfg(not(feature = "log"))]
macro_rules! realloc_trace {
    ($($arg:tt)*) => {};
}

mod doc_macro;
pub mod error;
pub mod growth;
pub mod header;
pub mod prelude;
pub mod raw;
pub mod seq_buf;

pub use crate::seq_buf::SeqBuf;
pub use error::TryReserveError;
pub use growth::{Doubling, Exact, Growth, OneAndHalf};
#[cfg(feature = "macro")]
pub use seqbuf_macro::Zeroable;

/// Element types for which the all-zero bit pattern is a valid value.
///
/// Required by [`SeqBuf::resize_zeroed`]. Enable the `macro` feature to derive it
/// for your own structs.
///
/// # Examples
///
/// ```
/// use seqbuf::{SeqBuf, Zeroable};
///
/// #[derive(Clone, Copy)]
/// #[repr(C)]
/// struct Rgb(u8, u8, u8);
///
/// // Safety: every field is an integer.
/// unsafe impl Zeroable for Rgb {}
///
/// let mut s: SeqBuf<Rgb> = SeqBuf::new();
/// s.resize_zeroed(4);
/// assert!(s.iter().all(|c| (c.0, c.1, c.2) == (0, 0, 0)));
/// ```
///
/// References are not zeroable:
///
/// ```compile_fail
/// use seqbuf::SeqBuf;
/// let mut s: SeqBuf<&'static u8> = SeqBuf::new();
/// s.resize_zeroed(1);
/// ```
///
/// # Safety
///
/// A value of `Self` whose bytes are all zero must be valid, including any padding.
pub unsafe trait Zeroable: Copy {}

macro_rules! impl_zeroable {
    ($($t:ty),* $(,)?) => {
        $(
            unsafe impl Zeroable for $t {}
        )*
    };
}

impl_zeroable!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_zeroable!(f32, f64, bool, char, ());

unsafe impl<T> Zeroable for *const T {}
unsafe impl<T> Zeroable for *mut T {}
unsafe impl<T: ?Sized> Zeroable for core::marker::PhantomData<T> {}
unsafe impl<T: Zeroable, const N: usize> Zeroable for [T; N] {}
unsafe impl<A: Zeroable> Zeroable for (A,) {}
unsafe impl<A: Zeroable, B: Zeroable> Zeroable for (A, B) {}
unsafe impl<A: Zeroable, B: Zeroable, C: Zeroable> Zeroable for (A, B, C) {}
unsafe impl<A: Zeroable, B: Zeroable, C: Zeroable, D: Zeroable> Zeroable for (A, B, C, D) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroable<T: Zeroable>() {}

    #[test]
    fn primitives_and_compounds_are_zeroable() {
        zeroable::<u64>();
        zeroable::<char>();
        zeroable::<*mut [u8; 4]>();
        zeroable::<[f32; 3]>();
        zeroable::<(u8, bool, [i16; 2], ())>();
        zeroable::<core::marker::PhantomData<&'static str>>();
    }

    #[test]
    fn zeroed_tuples_read_back_as_zero() {
        let mut s: SeqBuf<(u16, char)> = SeqBuf::new();
        s.push((5, 'z'));
        s.resize_zeroed(3);
        assert_eq!(&s[..], &[(5, 'z'), (0, '\0'), (0, '\0')]);
    }
}
