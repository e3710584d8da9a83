//! The metadata header stored in front of every buffer, and the arithmetic that
//! places it.
//!
//! Layout is computed in two flavours, following the same split as the rest of the
//! crate: `*_cautious` functions check every step for overflow and return `None`,
//! while `*_fast` functions assume a configuration that has already been validated
//! (because a live block with that configuration exists).

use core::alloc::Layout;

/// Metadata of one buffer, stored immediately before its first element.
///
/// The header always ends exactly at the element pointer, so it lives at the fixed
/// offset `-size_of::<Header>()` from a [`RawHandle`](crate::raw::RawHandle).
///
/// # Examples
///
/// ```
/// use seqbuf::raw;
///
/// let h = raw::create(4);
/// let header = unsafe { raw::header(h) };
/// assert_eq!((header.len, header.cap, header.elem_size), (0, 0, 4));
/// unsafe { raw::release(h) };
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Number of live elements.
    pub len: usize,
    /// Number of elements the block has room for.
    pub cap: usize,
    /// Size in bytes of one element. Fixed at creation.
    pub elem_size: usize,
    /// Alignment in bytes of one element. Fixed at creation.
    pub elem_align: usize,
}

/// Size of [`Header`] in bytes.
pub const HEADER_SIZE: usize = core::mem::size_of::<Header>();

/// Minimum alignment of the element storage, and the element alignment used by
/// [`raw::create`](crate::raw::create).
pub const MIN_ALIGN: usize = 8;

#[inline(always)]
pub(crate) const fn round_up(size: usize, align: usize) -> Option<usize> {
    let size_up = match size.checked_add(align - 1) {
        Some(size_up) => size_up,
        None => return None,
    };
    Some(size_up & (0usize.wrapping_sub(align)))
}

#[inline(always)]
pub(crate) const fn round_up_fast(size: usize, align: usize) -> usize {
    size.wrapping_add(align - 1) & 0usize.wrapping_sub(align)
}

#[inline(always)]
pub(crate) const fn max(x: usize, y: usize) -> usize {
    if x > y { x } else { y }
}

/// Alignment of the whole block for a given element alignment.
#[inline(always)]
pub(crate) const fn block_align(elem_align: usize) -> usize {
    max(elem_align, MIN_ALIGN)
}

/// Distance in bytes from the block start to the first element.
#[inline(always)]
pub(crate) const fn data_offset_cautious(elem_align: usize) -> Option<usize> {
    if !elem_align.is_power_of_two() {
        return None;
    }
    round_up(HEADER_SIZE, block_align(elem_align))
}

#[inline(always)]
pub(crate) const fn data_offset_fast(elem_align: usize) -> usize {
    round_up_fast(HEADER_SIZE, block_align(elem_align))
}

/// Layout of a block holding `cap` elements, or `None` if it would overflow.
#[inline]
pub(crate) const fn block_layout_cautious(
    cap: usize,
    elem_size: usize,
    elem_align: usize,
) -> Option<Layout> {
    let offset = match data_offset_cautious(elem_align) {
        Some(offset) => offset,
        None => return None,
    };
    let array_size = match elem_size.checked_mul(cap) {
        Some(x) => x,
        None => return None,
    };
    let size = match offset.checked_add(array_size) {
        Some(size) => size,
        None => return None,
    };
    match Layout::from_size_align(size, block_align(elem_align)) {
        Ok(l) => Some(l),
        Err(_) => None,
    }
}

impl Header {
    pub(crate) const fn empty(elem_size: usize, elem_align: usize) -> Self {
        Header {
            len: 0,
            cap: 0,
            elem_size,
            elem_align,
        }
    }

    /// Distance in bytes from the block start to the first element.
    #[inline(always)]
    pub fn data_offset(&self) -> usize {
        data_offset_fast(self.elem_align)
    }

    /// Layout of the block this header currently describes.
    ///
    /// # Safety
    ///
    /// The header must describe a block that was actually allocated, so that its
    /// layout is known to be valid.
    #[inline(always)]
    pub(crate) unsafe fn block_layout_unchecked(&self) -> Layout {
        Layout::from_size_align_unchecked(
            self.data_offset() + self.cap * self.elem_size,
            block_align(self.elem_align),
        )
    }

    /// Layout of this header's block resized to `cap` elements.
    #[inline]
    pub(crate) fn block_layout_for(&self, cap: usize) -> Option<Layout> {
        block_layout_cautious(cap, self.elem_size, self.elem_align)
    }

    /// Number of live bytes.
    #[inline(always)]
    pub(crate) fn len_bytes(&self) -> usize {
        self.len * self.elem_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_ends_on_an_aligned_boundary() {
        for shift in 0..8 {
            let align = 1usize << shift;
            let offset = data_offset_cautious(align).unwrap();
            assert!(offset >= HEADER_SIZE);
            assert_eq!(offset % block_align(align), 0);
            assert_eq!((offset - HEADER_SIZE) % core::mem::align_of::<Header>(), 0);
            assert_eq!(offset, data_offset_fast(align));
        }
    }

    #[test]
    fn storage_is_at_least_eight_byte_aligned() {
        assert_eq!(block_align(1), 8);
        assert_eq!(block_align(4), 8);
        assert_eq!(block_align(16), 16);
    }

    #[test]
    fn non_power_of_two_alignment_is_rejected() {
        assert!(data_offset_cautious(3).is_none());
        assert!(data_offset_cautious(0).is_none());
        assert!(block_layout_cautious(1, 1, 12).is_none());
    }

    #[test]
    fn overflowing_layouts_are_rejected() {
        assert!(block_layout_cautious(usize::MAX, 2, 8).is_none());
        assert!(block_layout_cautious(usize::MAX / 2, 1, 8).is_none());
        let l = block_layout_cautious(10, 4, 4).unwrap();
        assert_eq!(l.size(), data_offset_fast(4) + 40);
        assert_eq!(l.align(), 8);
    }

    #[test]
    fn unchecked_layout_matches_cautious_layout() {
        let h = Header {
            len: 3,
            cap: 7,
            elem_size: 12,
            elem_align: 4,
        };
        let l = unsafe { h.block_layout_unchecked() };
        assert_eq!(Some(l), h.block_layout_for(7));
        assert_eq!(h.len_bytes(), 36);
    }
}
