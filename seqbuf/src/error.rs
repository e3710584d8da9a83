//! Allocation errors.
//!
//! Every growing operation comes in two forms. The plain form treats failure as
//! fatal: an impossible size panics through [`capacity_overflow`], and a refused
//! allocation goes to [`alloc::alloc::handle_alloc_error`], which aborts. The
//! `try_` form reports the same conditions as a [`TryReserveError`] and leaves the
//! buffer untouched.

use core::alloc::Layout;
use core::fmt;

/// Error returned by the `try_` operations when a buffer cannot grow.
///
/// # Examples
///
/// ```
/// use seqbuf::{SeqBuf, TryReserveError};
///
/// let mut s: SeqBuf<u64> = SeqBuf::new();
/// assert_eq!(s.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
/// assert_eq!(s.capacity(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested block size does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator refused the request.
    AllocFailed {
        /// Size in bytes of the block that was requested.
        size: usize,
        /// Alignment of the block that was requested.
        align: usize,
    },
}

impl TryReserveError {
    pub(crate) fn alloc_failed(layout: Layout) -> Self {
        TryReserveError::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => {
                write!(f, "sequence buffer capacity overflow")
            }
            Self::AllocFailed { size, align } => {
                write!(
                    f,
                    "failed to allocate sequence buffer of {size} bytes (align {align})"
                )
            }
        }
    }
}

impl core::error::Error for TryReserveError {}

#[inline(never)]
#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("Sequence buffer capacity overflow")
}

#[inline(never)]
#[cold]
pub(crate) fn out_of_bounds() -> ! {
    panic!("Out-of-bounds access")
}

/// Converts a `TryReserveError` into the fatal behaviour of the infallible API.
#[inline(never)]
#[cold]
pub(crate) fn fail(err: TryReserveError) -> ! {
    match err {
        TryReserveError::CapacityOverflow => capacity_overflow(),
        TryReserveError::AllocFailed { size, align } => {
            // The layout was validated before the allocator was asked for it.
            let layout =
                Layout::from_size_align(size, align).unwrap_or_else(|_| capacity_overflow());
            alloc::alloc::handle_alloc_error(layout)
        }
    }
}
