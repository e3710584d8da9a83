//! The typed buffer, [`SeqBuf<T, G>`].
//!
//! A `SeqBuf<T>` is a single pointer wide. It owns a [`raw`](crate::raw) block laid
//! out for `T`, and keeps that block's handle up to date across reallocations, so
//! safe code never sees a dangling handle.
//!
//! # Examples
//!
//! ```
//! use seqbuf::prelude::*;
//!
//! let mut a: SeqBuf<u32> = (0..5).collect();
//! let b = seqbuf![5u32, 6, 7, 8, 9];
//! a.insert_range(0, &b, b.len());
//! assert_eq!(&a[..], &[5, 6, 7, 8, 9, 0, 1, 2, 3, 4]);
//! a.remove_range(5..10);
//! assert_eq!(&a[..], &[5, 6, 7, 8, 9]);
//! assert_eq!(core::mem::size_of::<SeqBuf<u32>>(), core::mem::size_of::<usize>());
//! ```
//!
//! Moving a buffer into an operation consumes it, so the borrow checker rules out
//! any use of a stale handle:
//!
//! ```compile_fail
//! use seqbuf::SeqBuf;
//!
//! let s: SeqBuf<u8> = SeqBuf::new();
//! let raw = s.into_raw();
//! s.len(); // `s` was moved
//! # let _ = raw;
//! ```

use crate::error::{fail, out_of_bounds, TryReserveError};
use crate::growth::{Growth, OneAndHalf};
use crate::raw::{self, RawHandle};
use crate::Zeroable;

use core::marker::PhantomData;
use core::ops::{Bound, RangeBounds};
use core::{fmt, mem, slice};

/// A growable sequence of `T` stored in a single allocation together with its
/// length, capacity and element layout.
///
/// `T: Copy` because elements are duplicated and relocated as plain bytes. `G`
/// picks how the buffer grows when an insertion does not fit; see
/// [`growth`](crate::growth).
///
/// # Examples
///
/// ```
/// use seqbuf::SeqBuf;
///
/// let mut s = SeqBuf::new();
/// s.push(1u16);
/// s.push(3);
/// s.insert(1, 2);
/// assert_eq!(&s[..], &[1, 2, 3]);
/// assert_eq!(s.remove(0), 1);
/// assert_eq!(s.len(), 2);
/// ```
pub struct SeqBuf<T: Copy, G: Growth = OneAndHalf> {
    raw: RawHandle,
    _marker: PhantomData<(T, fn() -> G)>,
}

// Safety: a SeqBuf exclusively owns its block, like a Vec<T> does.
unsafe impl<T: Copy + Send, G: Growth> Send for SeqBuf<T, G> {}
// Safety: shared access only reads the block.
unsafe impl<T: Copy + Sync, G: Growth> Sync for SeqBuf<T, G> {}

impl<T: Copy> SeqBuf<T> {
    /// Creates an empty buffer. The header is allocated immediately; elements are
    /// not.
    ///
    /// Aborts if the header cannot be allocated.
    #[inline]
    pub fn new() -> Self {
        Self::with_growth()
    }

    /// Fallible [`SeqBuf::new`].
    #[inline]
    pub fn try_new() -> Result<Self, TryReserveError> {
        Self::try_with_growth()
    }

    /// Creates an empty buffer with room for exactly `capacity` elements.
    ///
    /// ```
    /// use seqbuf::SeqBuf;
    /// let s: SeqBuf<u64> = SeqBuf::with_capacity(10);
    /// assert_eq!((s.len(), s.capacity()), (0, 10));
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut s = Self::try_new()?;
        s.try_reserve(capacity)?;
        Ok(s)
    }
}

impl<T: Copy, G: Growth> SeqBuf<T, G> {
    /// Creates an empty buffer that grows with policy `G`.
    ///
    /// ```
    /// use seqbuf::{Exact, SeqBuf};
    /// let mut s: SeqBuf<u8, Exact> = SeqBuf::with_growth();
    /// s.extend_from_slice(b"abc");
    /// s.push(b'd');
    /// assert_eq!(s.capacity(), 4);
    /// ```
    pub fn with_growth() -> Self {
        Self::try_with_growth().unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::with_growth`].
    pub fn try_with_growth() -> Result<Self, TryReserveError> {
        let raw = raw::try_create_aligned(mem::size_of::<T>(), mem::align_of::<T>())?;
        Ok(SeqBuf {
            raw,
            _marker: PhantomData,
        })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        unsafe { raw::size(self.raw) }
    }

    /// Whether there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the buffer can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        unsafe { raw::capacity(self.raw) }
    }

    /// Size in bytes of one element, as recorded in the header.
    #[inline]
    pub fn element_size(&self) -> usize {
        unsafe { raw::element_size(self.raw) }
    }

    /// Pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr() as *const T
    }

    /// Mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_ptr() as *mut T
    }

    /// One past the last element. Stale after any mutation.
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let s = seqbuf![b'o', b'k', 0u8];
    /// let last = unsafe { *s.end_ptr().sub(1) };
    /// assert_eq!(last, 0);
    /// ```
    #[inline]
    pub fn end_ptr(&self) -> *const T {
        unsafe { raw::end_pointer(self.raw) as *const T }
    }

    /// Ensures the capacity is at least `min_capacity`, growing to exactly that if
    /// needed. Unlike `Vec::reserve`, the argument is a total, not an addition.
    pub fn reserve(&mut self, min_capacity: usize) {
        self.try_reserve(min_capacity).unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::reserve`]. On error the buffer is unchanged.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), TryReserveError> {
        self.raw = unsafe { raw::try_reserve(self.raw, min_capacity)? };
        Ok(())
    }

    /// Makes room for `additional` insertions, consulting the growth policy.
    fn grow_for(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let len = self.len();
        let capacity = self.capacity();
        let required = len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        if required > capacity {
            let target = core::cmp::max(G::grow(len, capacity, required), required);
            self.try_reserve(target)?;
        }
        Ok(())
    }

    /// Gives back spare capacity, leaving `capacity() == len()`.
    pub fn shrink_to_fit(&mut self) {
        self.raw = unsafe { raw::shrink(self.raw) };
    }

    /// Sets the length to `new_len`, filling new slots with `value`.
    ///
    /// Growing reserves exactly `new_len`; shrinking keeps the capacity.
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let mut s = seqbuf![1i8, 2];
    /// s.resize(4, -1);
    /// assert_eq!(&s[..], &[1, 2, -1, -1]);
    /// s.resize(1, 0);
    /// assert_eq!(&s[..], &[1]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        let len = self.len();
        if new_len > len {
            self.reserve(new_len);
            unsafe {
                let p = self.as_mut_ptr();
                for i in len..new_len {
                    p.add(i).write(value);
                }
            }
        }
        unsafe { raw::set_len(self.raw, new_len) };
    }

    /// Removes all elements. The capacity is kept.
    pub fn clear(&mut self) {
        unsafe { raw::set_len(self.raw, 0) };
    }

    /// Appends `value`.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.try_push(value).unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::push`]. On error the buffer is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        self.grow_for(1)?;
        self.raw = unsafe { raw::try_push(self.raw, &value as *const T as *const u8)? };
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let value = *self.last()?;
        unsafe { raw::set_len(self.raw, self.len() - 1) };
        Some(value)
    }

    /// Inserts `value` before index `pos`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) {
        self.try_insert(pos, value).unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::insert`]. On error the buffer is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn try_insert(&mut self, pos: usize, value: T) -> Result<(), TryReserveError> {
        if pos > self.len() {
            out_of_bounds()
        }
        self.grow_for(1)?;
        self.raw = unsafe { raw::try_insert(self.raw, &value as *const T as *const u8, pos)? };
        Ok(())
    }

    /// Inserts a copy of `elems` before index `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let mut s = seqbuf![1, 5];
    /// s.insert_slice(1, &[2, 3, 4]);
    /// assert_eq!(&s[..], &[1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_slice(&mut self, pos: usize, elems: &[T]) {
        self.try_insert_slice(pos, elems).unwrap_or_else(|e| fail(e))
    }

    /// Fallible [`SeqBuf::insert_slice`]. On error the buffer is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn try_insert_slice(&mut self, pos: usize, elems: &[T]) -> Result<(), TryReserveError> {
        if pos > self.len() {
            out_of_bounds()
        }
        self.grow_for(elems.len())?;
        // Safety: `elems` cannot borrow from `self`, which is mutably borrowed.
        self.raw = unsafe {
            raw::try_insert_bytes(self.raw, elems.as_ptr() as *const u8, elems.len(), pos)?
        };
        Ok(())
    }

    /// Appends a copy of `elems`.
    pub fn extend_from_slice(&mut self, elems: &[T]) {
        self.insert_slice(self.len(), elems)
    }

    /// Inserts the first `n` elements of `src` before index `pos`.
    ///
    /// A buffer cannot be inserted into itself; clone it first:
    ///
    /// ```compile_fail
    /// use seqbuf::seqbuf;
    /// let mut s = seqbuf![1, 2];
    /// s.insert_range(0, &s, 2);
    /// ```
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let mut s = seqbuf![1, 2];
    /// let copy = s.clone();
    /// s.insert_range(1, &copy, 2);
    /// assert_eq!(&s[..], &[1, 1, 2, 2]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()` or `n > src.len()`.
    pub fn insert_range<G2: Growth>(&mut self, pos: usize, src: &SeqBuf<T, G2>, n: usize) {
        if n > src.len() {
            out_of_bounds()
        }
        self.insert_slice(pos, &src[..n])
    }

    /// Removes and returns the element at `pos`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> T {
        if pos >= self.len() {
            out_of_bounds()
        }
        let value = self[pos];
        unsafe { raw::delete_at(self.raw, pos) };
        value
    }

    /// Removes the elements in `range`, shifting the tail down. Never reallocates.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past `len()`.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let len = self.len();
        let begin = match range.start_bound() {
            Bound::Included(&b) => b,
            Bound::Excluded(&b) => b.checked_add(1).unwrap_or_else(|| out_of_bounds()),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1).unwrap_or_else(|| out_of_bounds()),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if begin > end || end > len {
            out_of_bounds()
        }
        unsafe { raw::delete_range(self.raw, begin, end) };
    }

    /// Fallible clone. The copy has no spare capacity.
    pub fn try_clone(&self) -> Result<Self, TryReserveError> {
        let raw = unsafe { raw::try_copy(self.raw)? };
        Ok(SeqBuf {
            raw,
            _marker: PhantomData,
        })
    }

    /// The underlying handle. It stays valid until the next mutation of `self`.
    #[inline]
    pub fn as_raw(&self) -> RawHandle {
        self.raw
    }

    /// Gives up ownership of the block. Release it with [`raw::release`] or turn
    /// it back into a `SeqBuf` with [`SeqBuf::from_raw`].
    ///
    /// ```
    /// use seqbuf::{raw, seqbuf, SeqBuf};
    ///
    /// let s = seqbuf![1u32, 2, 3];
    /// let s: SeqBuf<u32> = unsafe {
    ///     let h = s.into_raw();
    ///     let h = raw::push(h, &4u32 as *const u32 as *const u8);
    ///     SeqBuf::from_raw(h)
    /// };
    /// assert_eq!(&s[..], &[1, 2, 3, 4]);
    /// ```
    pub fn into_raw(self) -> RawHandle {
        let raw = self.raw;
        mem::forget(self);
        raw
    }

    /// Takes ownership of a raw block.
    ///
    /// # Safety
    ///
    /// `raw` must be live, laid out for `T` (its element size and alignment are
    /// those of `T`), and hold only valid `T` values. Nothing else may use it
    /// afterwards.
    pub unsafe fn from_raw(raw: RawHandle) -> Self {
        debug_assert_eq!(raw::element_size(raw), mem::size_of::<T>());
        debug_assert!(raw::element_align(raw) >= mem::align_of::<T>());
        SeqBuf {
            raw,
            _marker: PhantomData,
        }
    }

    /// Copies the elements into a `bumpalo` arena.
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let arena = bumpalo::Bump::new();
    /// let frozen: &mut [u16] = seqbuf![1u16, 2, 3].copy_into_bump(&arena);
    /// assert_eq!(frozen, &[1, 2, 3]);
    /// ```
    #[cfg(feature = "bumpalo")]
    pub fn copy_into_bump<'b>(&self, bump: &'b bumpalo::Bump) -> &'b mut [T] {
        bump.alloc_slice_copy(self)
    }
}

impl<T: Zeroable, G: Growth> SeqBuf<T, G> {
    /// Sets the length to `new_len`, filling new slots with zero bytes.
    ///
    /// ```
    /// use seqbuf::seqbuf;
    /// let mut s = seqbuf![7.5f32];
    /// s.resize_zeroed(3);
    /// assert_eq!(&s[..], &[7.5, 0.0, 0.0]);
    /// ```
    pub fn resize_zeroed(&mut self, new_len: usize) {
        self.raw = unsafe { raw::resize(self.raw, new_len) };
    }
}

impl<T: Copy, G: Growth> Drop for SeqBuf<T, G> {
    fn drop(&mut self) {
        unsafe { raw::release(self.raw) }
    }
}

/// Cloning copies exactly the live elements, with no spare capacity.
///
/// ```
/// use seqbuf::SeqBuf;
/// let mut s: SeqBuf<u8> = SeqBuf::with_capacity(64);
/// s.push(1);
/// let c = s.clone();
/// assert_eq!((c.len(), c.capacity()), (1, 1));
/// ```
impl<T: Copy, G: Growth> Clone for SeqBuf<T, G> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| fail(e))
    }
}

impl<T: Copy, G: Growth> core::ops::Deref for SeqBuf<T, G> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }
}

impl<T: Copy, G: Growth> core::ops::DerefMut for SeqBuf<T, G> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        let len = self.len();
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }
}

impl<T: Copy, G: Growth> AsRef<[T]> for SeqBuf<T, G> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: Copy, G: Growth> AsMut<[T]> for SeqBuf<T, G> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Copy, G: Growth> Default for SeqBuf<T, G> {
    fn default() -> Self {
        Self::with_growth()
    }
}

impl<T: Copy + fmt::Debug, G: Growth> fmt::Debug for SeqBuf<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy + PartialEq, G: Growth, G2: Growth> PartialEq<SeqBuf<T, G2>> for SeqBuf<T, G> {
    fn eq(&self, other: &SeqBuf<T, G2>) -> bool {
        self[..] == other[..]
    }
}

impl<T: Copy + Eq, G: Growth> Eq for SeqBuf<T, G> {}

impl<T: Copy, G: Growth> Extend<T> for SeqBuf<T, G> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.grow_for(iter.size_hint().0).unwrap_or_else(|e| fail(e));
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, G: Growth> Extend<&'a T> for SeqBuf<T, G> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied())
    }
}

impl<T: Copy, G: Growth> FromIterator<T> for SeqBuf<T, G> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut s = SeqBuf::with_growth();
        s.extend(iter);
        s
    }
}

impl<T: Copy, G: Growth> From<&[T]> for SeqBuf<T, G> {
    fn from(elems: &[T]) -> Self {
        let mut s = SeqBuf::with_growth();
        s.reserve(elems.len());
        s.extend_from_slice(elems);
        s
    }
}

impl<T: Copy, G: Growth, const N: usize> From<[T; N]> for SeqBuf<T, G> {
    fn from(elems: [T; N]) -> Self {
        SeqBuf::from(&elems[..])
    }
}

/// Creates a [`SeqBuf`] holding the listed elements, or `n` copies of one value.
///
/// ```
/// use seqbuf::seqbuf;
/// let a = seqbuf![1u8, 2, 3];
/// assert_eq!(&a[..], &[1, 2, 3]);
/// let b = seqbuf![0u32; 4];
/// assert_eq!((b.len(), b.capacity()), (4, 4));
/// ```
#[macro_export]
macro_rules! seqbuf {
    () => (
        $crate::SeqBuf::new()
    );
    ($elem:expr; $n:expr) => ({
        let mut s = $crate::SeqBuf::new();
        s.resize($n, $elem);
        s
    });
    ($($x:expr),+ $(,)?) => ({
        let mut s = $crate::SeqBuf::new();
        $(
            s.push($x);
        )+
        s
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::{Doubling, Exact};
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn push_then_read_back() {
        let mut s = SeqBuf::new();
        for i in 0..100u64 {
            s.push(i * 3);
            assert!(s.capacity() >= s.len());
        }
        assert_eq!(s.len(), 100);
        assert!(s.iter().enumerate().all(|(i, &v)| v == i as u64 * 3));
    }

    #[test]
    fn splice_scenario() {
        let mut a: SeqBuf<i32> = (0..5).collect();
        let b: SeqBuf<i32> = (5..10).collect();
        a.insert_range(0, &b, 5);
        assert_eq!(a.len(), 10);
        assert_eq!(&a[..], &[5, 6, 7, 8, 9, 0, 1, 2, 3, 4]);
        a.remove_range(5..10);
        assert_eq!(&a[..], &[5, 6, 7, 8, 9]);
    }

    #[test]
    fn shrink_to_fit_keeps_contents() {
        let mut s: SeqBuf<u16> = SeqBuf::with_capacity(50);
        s.extend_from_slice(&[4, 5, 6]);
        s.shrink_to_fit();
        assert_eq!(s.capacity(), 3);
        assert_eq!(&s[..], &[4, 5, 6]);
        s.clear();
        s.shrink_to_fit();
        assert_eq!((s.len(), s.capacity()), (0, 0));
    }

    #[test]
    fn clone_is_tight_and_independent() {
        let mut s: SeqBuf<u8> = SeqBuf::with_capacity(16);
        s.extend_from_slice(b"hello");
        let mut c = s.clone();
        assert_eq!(c.capacity(), 5);
        assert_eq!(c, s);
        c[0] = b'j';
        c.push(b'!');
        assert_eq!(&s[..], b"hello");
        assert_eq!(&c[..], b"jello!");
    }

    #[test]
    fn pop_and_remove() {
        let mut s = seqbuf![1, 2, 3, 4];
        assert_eq!(s.pop(), Some(4));
        assert_eq!(s.remove(1), 2);
        assert_eq!(&s[..], &[1, 3]);
        s.remove_range(..);
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn remove_range_bounds() {
        let mut s: SeqBuf<u8> = (0..10).collect();
        s.remove_range(2..=3);
        assert_eq!(&s[..], &[0, 1, 4, 5, 6, 7, 8, 9]);
        s.remove_range(6..);
        assert_eq!(&s[..], &[0, 1, 4, 5, 6, 7]);
        s.remove_range(..2);
        assert_eq!(&s[..], &[4, 5, 6, 7]);
        s.remove_range(2..2);
        assert_eq!(s.len(), 4);
        s.remove_range((Bound::Excluded(0), Bound::Included(1)));
        assert_eq!(&s[..], &[4, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "Out-of-bounds")]
    fn insert_past_end_panics() {
        let mut s = seqbuf![1u8];
        s.insert(2, 0);
    }

    #[test]
    #[should_panic(expected = "Out-of-bounds")]
    fn remove_past_end_panics() {
        let mut s = seqbuf![1u8];
        s.remove(1);
    }

    #[test]
    #[should_panic(expected = "Out-of-bounds")]
    fn inverted_range_panics() {
        let mut s = seqbuf![1u8, 2, 3];
        #[allow(clippy::reversed_empty_ranges)]
        s.remove_range(2..1);
    }

    #[test]
    #[should_panic(expected = "Out-of-bounds")]
    fn insert_range_longer_than_source_panics() {
        let mut s = seqbuf![1u8];
        let src = seqbuf![2u8];
        s.insert_range(0, &src, 2);
    }

    #[test]
    fn growth_policies() {
        let mut d: SeqBuf<u8, Doubling> = SeqBuf::with_growth();
        let mut e: SeqBuf<u8, Exact> = SeqBuf::with_growth();
        let mut dcaps = Vec::new();
        for i in 0..9 {
            d.push(i);
            e.push(i);
            dcaps.push(d.capacity());
            assert_eq!(e.capacity(), e.len());
        }
        assert_eq!(dcaps, [4, 4, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(d, e);
    }

    #[test]
    fn insert_slice_respects_policy_minimum() {
        let mut s: SeqBuf<u32> = SeqBuf::new();
        s.push(0);
        s.insert_slice(0, &[1; 20]);
        assert_eq!(s.len(), 21);
        assert_eq!(s.capacity(), 21);
    }

    #[test]
    fn wide_elements_are_aligned() {
        #[derive(Clone, Copy, PartialEq, Debug)]
        #[repr(align(32))]
        struct Wide(u8);

        let mut s = SeqBuf::new();
        for i in 0..20 {
            s.push(Wide(i));
            assert_eq!(s.as_ptr() as usize % 32, 0);
        }
        assert_eq!(s.element_size(), 32);
        assert_eq!(s[19], Wide(19));
    }

    #[test]
    fn zero_sized_elements() {
        let mut s = SeqBuf::new();
        for _ in 0..10 {
            s.push(());
        }
        assert_eq!(s.len(), 10);
        assert_eq!(s.element_size(), 0);
        s.remove_range(3..7);
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn try_reserve_failure_leaves_buffer_intact() {
        let mut s = seqbuf![1u64, 2];
        assert_eq!(
            s.try_reserve(usize::MAX / 4),
            Err(TryReserveError::CapacityOverflow)
        );
        assert_eq!(&s[..], &[1, 2]);
        assert!(s.try_push(3).is_ok());
        assert_eq!(&s[..], &[1, 2, 3]);
    }

    #[test]
    fn oversized_capacity_is_an_error() {
        assert_eq!(
            SeqBuf::<u64>::try_with_capacity(usize::MAX / 4).err(),
            Some(TryReserveError::CapacityOverflow)
        );
    }

    #[test]
    fn failed_typed_insertions_leave_buffer_intact() {
        let mut s: SeqBuf<()> = SeqBuf::new();
        s.resize_zeroed(usize::MAX);
        let cap = s.capacity();
        assert_eq!(s.try_push(()), Err(TryReserveError::CapacityOverflow));
        assert_eq!(s.try_insert(0, ()), Err(TryReserveError::CapacityOverflow));
        assert_eq!(
            s.try_insert_slice(3, &[(), ()]),
            Err(TryReserveError::CapacityOverflow)
        );
        assert_eq!((s.len(), s.capacity()), (usize::MAX, cap));
        s.remove_range(2..);
        s.try_insert_slice(1, &[(), ()]).unwrap();
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn resize_zeroed_only_zeroes_new_slots() {
        let mut s = seqbuf![9u32, 9, 9, 9];
        s.resize_zeroed(1);
        s.resize_zeroed(3);
        assert_eq!(&s[..], &[9, 0, 0]);
    }

    #[test]
    fn conversions() {
        let a: SeqBuf<char> = SeqBuf::from(['x', 'y']);
        let b: SeqBuf<char> = SeqBuf::from(&['x', 'y'][..]);
        assert_eq!(a, b);
        let mut c: SeqBuf<char> = SeqBuf::default();
        c.extend(['x', 'y'].iter());
        assert_eq!(a, c);
        assert_eq!(alloc::format!("{:?}", c), "['x', 'y']");
    }

    #[test]
    fn raw_round_trip_preserves_contents() {
        let s = seqbuf![1u16, 2];
        let h = s.into_raw();
        unsafe {
            assert_eq!(raw::size(h), 2);
            assert_eq!(raw::element_size(h), 2);
            let s: SeqBuf<u16> = SeqBuf::from_raw(h);
            assert_eq!(&s[..], &[1, 2]);
        }
    }

    #[test]
    fn buffers_can_move_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqBuf<u64>>();
        assert_send_sync::<SeqBuf<u8, Exact>>();
    }

    proptest! {
        #[test]
        fn pushes_are_read_back_in_order(vals in proptest::collection::vec(any::<u32>(), 0..200)) {
            let mut s = SeqBuf::new();
            for &v in &vals {
                s.push(v);
                prop_assert!(s.capacity() >= s.len());
            }
            prop_assert_eq!(s.len(), vals.len());
            prop_assert_eq!(&s[..], &vals[..]);
        }

        #[test]
        fn insert_range_places_source_prefix(
            dst in proptest::collection::vec(any::<i16>(), 0..50),
            src in proptest::collection::vec(any::<i16>(), 0..50),
            pos_seed in any::<usize>(),
            n_seed in any::<usize>(),
        ) {
            let pos = pos_seed % (dst.len() + 1);
            let n = n_seed % (src.len() + 1);
            let mut d: SeqBuf<i16> = SeqBuf::from(&dst[..]);
            let s: SeqBuf<i16> = SeqBuf::from(&src[..]);
            d.insert_range(pos, &s, n);
            prop_assert_eq!(d.len(), dst.len() + n);
            prop_assert_eq!(&d[..pos], &dst[..pos]);
            prop_assert_eq!(&d[pos..pos + n], &src[..n]);
            prop_assert_eq!(&d[pos + n..], &dst[pos..]);
            prop_assert!(d.capacity() >= d.len());
        }

        #[test]
        fn remove_range_shifts_tail(
            vals in proptest::collection::vec(any::<u8>(), 0..80),
            a in any::<usize>(),
            b in any::<usize>(),
        ) {
            let a = a % (vals.len() + 1);
            let b = b % (vals.len() + 1);
            let (begin, end) = if a <= b { (a, b) } else { (b, a) };
            let mut s: SeqBuf<u8> = SeqBuf::from(&vals[..]);
            let cap = s.capacity();
            s.remove_range(begin..end);
            let mut expected = vals.clone();
            expected.drain(begin..end);
            prop_assert_eq!(s.len(), vals.len() - (end - begin));
            prop_assert_eq!(&s[..], &expected[..]);
            prop_assert_eq!(s.capacity(), cap);
        }

        #[test]
        fn insert_then_remove_restores(
            vals in proptest::collection::vec(any::<u64>(), 0..60),
            pos_seed in any::<usize>(),
            v in any::<u64>(),
        ) {
            let pos = pos_seed % (vals.len() + 1);
            let mut s: SeqBuf<u64> = SeqBuf::from(&vals[..]);
            s.insert(pos, v);
            prop_assert_eq!(s[pos], v);
            prop_assert_eq!(s.remove(pos), v);
            prop_assert_eq!(&s[..], &vals[..]);
        }

        #[test]
        fn shrink_and_clone_are_tight(
            vals in proptest::collection::vec(any::<u32>(), 0..60),
            extra in 0usize..64,
        ) {
            let mut s: SeqBuf<u32> = SeqBuf::from(&vals[..]);
            s.reserve(vals.len() + extra);
            let c = s.clone();
            prop_assert_eq!(c.capacity(), c.len());
            prop_assert_eq!(&c, &s);
            s.shrink_to_fit();
            prop_assert_eq!(s.capacity(), s.len());
            prop_assert_eq!(&s[..], &vals[..]);
        }
    }
}
