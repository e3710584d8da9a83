//! The commonly used `seqbuf` exports.
//!
//! ```
//! use seqbuf::prelude::*;
//! let s: SeqBuf<u8> = seqbuf![1, 2, 3];
//! assert_eq!(s.len(), 3);
//! ```

pub use crate::growth::{Doubling, Exact, Growth, OneAndHalf};
pub use crate::seqbuf;
pub use crate::{SeqBuf, TryReserveError, Zeroable};
