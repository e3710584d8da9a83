#![doc = crate::doc_macro::svgbob_doc!(
//! The type-erased buffer: a bare pointer to the first element, with its metadata
//! stored just in front of it.
//!
//! A [`RawHandle`] is all there is to a buffer. Metadata lives in a [`Header`] at a
//! fixed negative offset from the handle, so no other value needs to be carried
//! around:
//!
//! ```svgbob
//! "block start"                          "RawHandle"
//! |                                      |
//! v                                      v
//! +---------+-----+-----+-----------+------------+-------------+-------------+-----
//! | padding | len | cap | elem_size | elem_align | "element 0" | "element 1" | ...
//! +---------+-----+-----+-----------+------------+-------------+-------------+-----
//!           "<--------------- Header ------------>"
//! ```
//!
//! Every operation is an `unsafe` free function. Operations that may reallocate
//! return the new handle: the handle passed in must be treated as dangling from then
//! on, and so must any pointer derived from it. Elements are moved around as plain
//! bytes; the caller is trusted to store only trivially-copyable data, and to use
//! one element size consistently per buffer.
//!
//! # Examples
//!
//! ```
//! use seqbuf::raw;
//!
//! unsafe {
//!     let mut h = raw::create(core::mem::size_of::<u32>());
//!     for i in 0u32..5 {
//!         h = raw::push(h, &i as *const u32 as *const u8);
//!     }
//!     assert_eq!(raw::size(h), 5);
//!     let elems = core::slice::from_raw_parts(h.as_ptr() as *const u32, raw::size(h));
//!     assert_eq!(elems, &[0, 1, 2, 3, 4]);
//!     raw::release(h);
//! }
//! ```
//!
//! Preconditions on positions and ranges are checked with `debug_assert!` only.
//! For an API that checks them always, and that cannot leave a dangling handle
//! behind, use [`SeqBuf`](crate::SeqBuf).
)]

use crate::error::{fail, TryReserveError};
use crate::growth::{Growth, OneAndHalf};
pub use crate::header::Header;
use crate::header::{block_layout_cautious, data_offset_fast, HEADER_SIZE, MIN_ALIGN};

use core::ptr::{self, NonNull};

/// Pointer to the first element of a buffer.
///
/// Copying a handle does not copy the buffer: both copies name the same allocation,
/// and both become dangling when either is passed to a reallocating operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct RawHandle(NonNull<u8>);

impl RawHandle {
    /// The address of the first element.
    #[inline(always)]
    pub fn as_ptr(self) -> *mut u8 {
        self.0.as_ptr()
    }

    /// Rebuilds a handle from [`RawHandle::as_ptr`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been obtained from a handle whose buffer is still live.
    #[inline(always)]
    pub unsafe fn from_ptr(ptr: *mut u8) -> Self {
        RawHandle(NonNull::new_unchecked(ptr))
    }

    #[inline(always)]
    fn header_ptr(self) -> *mut Header {
        self.0.as_ptr().wrapping_sub(HEADER_SIZE).cast::<Header>()
    }

    #[inline(always)]
    unsafe fn block_start(self) -> *mut u8 {
        self.0.as_ptr().sub((*self.header_ptr()).data_offset())
    }

    #[inline(always)]
    unsafe fn from_block(block: NonNull<u8>, data_offset: usize) -> Self {
        RawHandle(NonNull::new_unchecked(block.as_ptr().add(data_offset)))
    }
}

/// Reads the header of a buffer.
///
/// # Safety
///
/// `h` must be live, and the returned reference must not outlive the next
/// operation on `h`.
#[inline(always)]
pub unsafe fn header<'a>(h: RawHandle) -> &'a Header {
    &*h.header_ptr()
}

#[inline(always)]
unsafe fn header_mut<'a>(h: RawHandle) -> &'a mut Header {
    &mut *h.header_ptr()
}

fn try_alloc_block(
    elem_size: usize,
    elem_align: usize,
    cap: usize,
) -> Result<RawHandle, TryReserveError> {
    assert!(
        elem_align.is_power_of_two(),
        "element alignment must be a power of two"
    );
    let layout = block_layout_cautious(cap, elem_size, elem_align)
        .ok_or(TryReserveError::CapacityOverflow)?;
    // Safety: the layout is never zero-sized, it always holds a header.
    let block = NonNull::new(unsafe { alloc::alloc::alloc(layout) })
        .ok_or_else(|| TryReserveError::alloc_failed(layout))?;
    unsafe {
        let h = RawHandle::from_block(block, data_offset_fast(elem_align));
        h.header_ptr().write(Header {
            cap,
            ..Header::empty(elem_size, elem_align)
        });
        Ok(h)
    }
}

/// Creates an empty buffer (length 0, capacity 0) for elements of `elem_size`
/// bytes, stored at 8-byte alignment.
///
/// Aborts via [`alloc::alloc::handle_alloc_error`] if the header cannot be
/// allocated.
pub fn create(elem_size: usize) -> RawHandle {
    create_aligned(elem_size, MIN_ALIGN)
}

/// Creates an empty buffer for elements of `elem_size` bytes aligned to
/// `elem_align` (a power of two). Storage is always aligned to at least 8 bytes.
///
/// # Panics
///
/// Panics if `elem_align` is not a power of two.
pub fn create_aligned(elem_size: usize, elem_align: usize) -> RawHandle {
    try_create_aligned(elem_size, elem_align).unwrap_or_else(|e| fail(e))
}

/// Fallible [`create_aligned`].
pub fn try_create_aligned(
    elem_size: usize,
    elem_align: usize,
) -> Result<RawHandle, TryReserveError> {
    try_alloc_block(elem_size, elem_align, 0)
}

/// Frees the buffer, header included.
///
/// # Safety
///
/// `h` must be live. It is dangling afterwards.
pub unsafe fn release(h: RawHandle) {
    let layout = header(h).block_layout_unchecked();
    alloc::alloc::dealloc(h.block_start(), layout);
}

/// Returns a new buffer holding a bitwise copy of the live elements of `h`, with
/// no spare capacity.
///
/// # Safety
///
/// `h` must be live.
pub unsafe fn copy(h: RawHandle) -> RawHandle {
    try_copy(h).unwrap_or_else(|e| fail(e))
}

/// Fallible [`copy`].
///
/// # Safety
///
/// `h` must be live.
pub unsafe fn try_copy(h: RawHandle) -> Result<RawHandle, TryReserveError> {
    let hdr = *header(h);
    let new = try_alloc_block(hdr.elem_size, hdr.elem_align, hdr.len)?;
    ptr::copy_nonoverlapping(h.as_ptr(), new.as_ptr(), hdr.len_bytes());
    header_mut(new).len = hdr.len;
    Ok(new)
}

/// Moves the block to one with room for exactly `new_cap` elements.
#[inline(never)]
#[cold]
unsafe fn realloc_to(
    h: RawHandle,
    hdr: Header,
    new_cap: usize,
) -> Result<RawHandle, TryReserveError> {
    let new_layout = hdr
        .block_layout_for(new_cap)
        .ok_or(TryReserveError::CapacityOverflow)?;
    let old_layout = hdr.block_layout_unchecked();
    let block = alloc::alloc::realloc(h.block_start(), old_layout, new_layout.size());
    let block = NonNull::new(block).ok_or_else(|| TryReserveError::alloc_failed(new_layout))?;
    realloc_trace!(
        "seqbuf: reallocated {} -> {} elements of {} bytes",
        hdr.cap,
        new_cap,
        hdr.elem_size
    );
    let h = RawHandle::from_block(block, hdr.data_offset());
    header_mut(h).cap = new_cap;
    Ok(h)
}

/// Makes room for `additional` more elements, growing with the
/// [`OneAndHalf`] policy.
#[inline]
unsafe fn try_grow_for(h: RawHandle, additional: usize) -> Result<RawHandle, TryReserveError> {
    let hdr = *header(h);
    let required = hdr
        .len
        .checked_add(additional)
        .ok_or(TryReserveError::CapacityOverflow)?;
    if hdr.cap >= required {
        return Ok(h);
    }
    realloc_to(h, hdr, OneAndHalf::grow(hdr.len, hdr.cap, required))
}

/// Ensures the capacity is at least `min_capacity`. Grows to exactly
/// `min_capacity` if it is not; never changes the length.
///
/// # Safety
///
/// `h` must be live. It is dangling afterwards; use the returned handle.
pub unsafe fn reserve(h: RawHandle, min_capacity: usize) -> RawHandle {
    try_reserve(h, min_capacity).unwrap_or_else(|e| fail(e))
}

/// Fallible [`reserve`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// `h` must be live. On `Ok` it is dangling afterwards; use the returned handle.
pub unsafe fn try_reserve(h: RawHandle, min_capacity: usize) -> Result<RawHandle, TryReserveError> {
    let hdr = *header(h);
    if hdr.cap >= min_capacity {
        return Ok(h);
    }
    realloc_to(h, hdr, min_capacity)
}

/// Sets the length to `new_len`.
///
/// Shrinking only lowers the length; the dropped tail is left as it is. Growing
/// reserves exactly `new_len` elements and fills the new elements with zero bytes.
///
/// # Safety
///
/// `h` must be live. It is dangling afterwards; use the returned handle.
pub unsafe fn resize(h: RawHandle, new_len: usize) -> RawHandle {
    try_resize(h, new_len).unwrap_or_else(|e| fail(e))
}

/// Fallible [`resize`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// As for [`try_reserve`].
pub unsafe fn try_resize(h: RawHandle, new_len: usize) -> Result<RawHandle, TryReserveError> {
    let old_len = size(h);
    if new_len <= old_len {
        header_mut(h).len = new_len;
        return Ok(h);
    }
    let h = try_reserve(h, new_len)?;
    let hdr = header_mut(h);
    ptr::write_bytes(
        h.as_ptr().add(hdr.len_bytes()),
        0,
        (new_len - old_len) * hdr.elem_size,
    );
    hdr.len = new_len;
    Ok(h)
}

/// # Safety
///
/// `h` must be live, `new_len <= capacity(h)`, and the first `new_len` slots must
/// hold initialized elements.
#[inline(always)]
pub(crate) unsafe fn set_len(h: RawHandle, new_len: usize) {
    debug_assert!(new_len <= capacity(h));
    header_mut(h).len = new_len;
}

/// Gives back spare capacity, leaving `capacity == len`.
///
/// # Safety
///
/// `h` must be live. It is dangling afterwards; use the returned handle.
pub unsafe fn shrink(h: RawHandle) -> RawHandle {
    try_shrink(h).unwrap_or_else(|e| fail(e))
}

/// Fallible [`shrink`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// As for [`try_reserve`].
pub unsafe fn try_shrink(h: RawHandle) -> Result<RawHandle, TryReserveError> {
    let hdr = *header(h);
    if hdr.len >= hdr.cap {
        return Ok(h);
    }
    realloc_to(h, hdr, hdr.len)
}

/// Appends the `element_size(h)` bytes at `val`.
///
/// # Safety
///
/// `h` must be live; it is dangling afterwards. `val` must be readable for
/// `element_size(h)` bytes and must not point into `h`'s own storage.
pub unsafe fn push(h: RawHandle, val: *const u8) -> RawHandle {
    try_push(h, val).unwrap_or_else(|e| fail(e))
}

/// Fallible [`push`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// As for [`push`].
pub unsafe fn try_push(h: RawHandle, val: *const u8) -> Result<RawHandle, TryReserveError> {
    let h = try_grow_for(h, 1)?;
    let hdr = header_mut(h);
    ptr::copy_nonoverlapping(val, h.as_ptr().add(hdr.len_bytes()), hdr.elem_size);
    hdr.len += 1;
    Ok(h)
}

/// Inserts the element at `val` before index `pos`, shifting later elements one
/// slot to the right. `pos == size(h)` is the same as [`push`].
///
/// # Safety
///
/// As for [`push`], and `pos <= size(h)`.
pub unsafe fn insert(h: RawHandle, val: *const u8, pos: usize) -> RawHandle {
    try_insert(h, val, pos).unwrap_or_else(|e| fail(e))
}

/// Fallible [`insert`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// As for [`insert`].
pub unsafe fn try_insert(
    h: RawHandle,
    val: *const u8,
    pos: usize,
) -> Result<RawHandle, TryReserveError> {
    debug_assert!(pos <= size(h), "insert position out of bounds");
    let h = try_grow_for(h, 1)?;
    let hdr = header_mut(h);
    let elem_size = hdr.elem_size;
    let p = h.as_ptr().add(pos * elem_size);
    ptr::copy(p, p.add(elem_size), (hdr.len - pos) * elem_size);
    ptr::copy_nonoverlapping(val, p, elem_size);
    hdr.len += 1;
    Ok(h)
}

/// Inserts the first `n` elements of `src` before index `pos` of `h`.
///
/// `src` must be a different buffer from `h`: inserting a buffer into itself is
/// not supported. Copy it first with [`copy`] if that is what you need.
///
/// # Safety
///
/// `h` and `src` must be live, distinct, and hold elements of the same size.
/// `pos <= size(h)` and `n <= size(src)`. `h` is dangling afterwards; `src` is not
/// modified.
pub unsafe fn insert_range(h: RawHandle, src: RawHandle, n: usize, pos: usize) -> RawHandle {
    try_insert_range(h, src, n, pos).unwrap_or_else(|e| fail(e))
}

/// Fallible [`insert_range`]. On `Err`, `h` is unchanged and still live.
///
/// # Safety
///
/// As for [`insert_range`].
pub unsafe fn try_insert_range(
    h: RawHandle,
    src: RawHandle,
    n: usize,
    pos: usize,
) -> Result<RawHandle, TryReserveError> {
    debug_assert_ne!(h, src, "inserting a buffer into itself is not supported");
    debug_assert!(n <= size(src), "insert_range count exceeds source length");
    debug_assert_eq!(element_size(h), element_size(src));
    try_insert_bytes(h, src.as_ptr(), n, pos)
}

/// Inserts `n` elements read from `src` before index `pos`.
///
/// # Safety
///
/// `src` must be readable for `n` elements and must not point into `h`.
pub(crate) unsafe fn try_insert_bytes(
    h: RawHandle,
    src: *const u8,
    n: usize,
    pos: usize,
) -> Result<RawHandle, TryReserveError> {
    debug_assert!(pos <= size(h), "insert position out of bounds");
    let h = try_grow_for(h, n)?;
    let hdr = header_mut(h);
    let elem_size = hdr.elem_size;
    let p = h.as_ptr().add(pos * elem_size);
    ptr::copy(p, p.add(n * elem_size), (hdr.len - pos) * elem_size);
    ptr::copy_nonoverlapping(src, p, n * elem_size);
    hdr.len += n;
    Ok(h)
}

/// Removes the element at `pos`, shifting later elements one slot to the left.
/// Never reallocates, so `h` stays valid.
///
/// # Safety
///
/// `h` must be live and `pos < size(h)`.
pub unsafe fn delete_at(h: RawHandle, pos: usize) {
    let hdr = header_mut(h);
    debug_assert!(pos < hdr.len, "delete position out of bounds");
    let elem_size = hdr.elem_size;
    let p = h.as_ptr().add(pos * elem_size);
    ptr::copy(p.add(elem_size), p, (hdr.len - pos - 1) * elem_size);
    hdr.len -= 1;
}

/// Removes the elements in `begin..end`, shifting the tail down to `begin`.
/// Never reallocates, so `h` stays valid.
///
/// # Safety
///
/// `h` must be live and `begin <= end <= size(h)`.
pub unsafe fn delete_range(h: RawHandle, begin: usize, end: usize) {
    let hdr = header_mut(h);
    debug_assert!(begin <= end && end <= hdr.len, "delete range out of bounds");
    let elem_size = hdr.elem_size;
    let base = h.as_ptr();
    ptr::copy(
        base.add(end * elem_size),
        base.add(begin * elem_size),
        (hdr.len - end) * elem_size,
    );
    hdr.len -= end - begin;
}

/// Number of live elements.
///
/// # Safety
///
/// `h` must be live.
#[inline(always)]
pub unsafe fn size(h: RawHandle) -> usize {
    header(h).len
}

/// Number of elements the current block has room for.
///
/// # Safety
///
/// `h` must be live.
#[inline(always)]
pub unsafe fn capacity(h: RawHandle) -> usize {
    header(h).cap
}

/// Size in bytes of one element.
///
/// # Safety
///
/// `h` must be live.
#[inline(always)]
pub unsafe fn element_size(h: RawHandle) -> usize {
    header(h).elem_size
}

/// Alignment in bytes of one element.
///
/// # Safety
///
/// `h` must be live.
#[inline(always)]
pub unsafe fn element_align(h: RawHandle) -> usize {
    header(h).elem_align
}

/// One past the last live element. Stale after any mutating operation.
///
/// # Safety
///
/// `h` must be live.
#[inline(always)]
pub unsafe fn end_pointer(h: RawHandle) -> *mut u8 {
    h.as_ptr().add(header(h).len_bytes())
}
