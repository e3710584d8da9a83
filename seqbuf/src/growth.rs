//! Growth policies: how much capacity a buffer asks for when an insertion does not
//! fit.
//!
//! Only insertions (push, insert, insert of a range) consult the policy. [`reserve`]
//! and resizing always request exactly the capacity asked for.
//!
//! [`reserve`]: crate::SeqBuf::reserve

/// Chooses a new capacity when an insertion needs more room.
///
/// The buffer always allocates at least `required` elements, even if the policy
/// returns less, so a policy cannot cause an out-of-bounds write.
///
/// # Examples
///
/// A policy that grows in fixed steps of 64 elements:
///
/// ```
/// use seqbuf::{Growth, SeqBuf};
///
/// struct Step64;
/// impl Growth for Step64 {
///     fn grow(_len: usize, capacity: usize, required: usize) -> usize {
///         (required.max(capacity) + 63) / 64 * 64
///     }
/// }
///
/// let mut s: SeqBuf<u8, Step64> = SeqBuf::with_growth();
/// s.push(1);
/// assert_eq!(s.capacity(), 64);
/// ```
pub trait Growth {
    /// Returns the capacity to grow to, given the current length and capacity and
    /// the minimum capacity the insertion needs.
    fn grow(len: usize, capacity: usize, required: usize) -> usize;
}

/// Grows to `floor(len * 3 / 2) + 1` elements. The default policy, and the one the
/// [`raw`](crate::raw) layer uses.
///
/// Every growth from an empty buffer yields at least one slot, and the geometric
/// factor keeps the total copying cost of `n` pushes linear in `n`.
///
/// ```
/// use seqbuf::SeqBuf;
///
/// let mut s: SeqBuf<u32> = SeqBuf::new();
/// let mut caps = Vec::new();
/// for i in 0..10 {
///     s.push(i);
///     caps.push(s.capacity());
/// }
/// assert_eq!(caps, [1, 2, 4, 4, 7, 7, 7, 11, 11, 11]);
/// ```
pub struct OneAndHalf;

impl Growth for OneAndHalf {
    #[inline]
    fn grow(len: usize, _capacity: usize, required: usize) -> usize {
        core::cmp::max(amortized(len), required)
    }
}

/// Doubles the capacity, starting from 4 elements.
pub struct Doubling;

impl Growth for Doubling {
    #[inline]
    fn grow(_len: usize, capacity: usize, required: usize) -> usize {
        core::cmp::max(core::cmp::max(capacity.saturating_mul(2), 4), required)
    }
}

/// Grows to exactly the required capacity. Every insertion past the capacity
/// reallocates, so `n` pushes cost `O(n^2)` bytes copied.
pub struct Exact;

impl Growth for Exact {
    #[inline]
    fn grow(_len: usize, _capacity: usize, required: usize) -> usize {
        required
    }
}

/// `floor(len * 3 / 2) + 1`, saturating.
#[inline(always)]
pub(crate) const fn amortized(len: usize) -> usize {
    len.saturating_add(len / 2).saturating_add(1)
}
