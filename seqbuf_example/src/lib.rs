#![allow(dead_code)]
use bumpalo::Bump;
use seqbuf::prelude::*;

/// One reading from a sensor channel.
#[derive(Clone, Copy, Debug, PartialEq, Zeroable)]
#[repr(C)]
pub struct Sample {
    /// Nanoseconds since the start of the capture.
    pub timestamp: u64,
    pub channel: u16,
    pub value: f32,
}

/// An RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroable)]
pub struct Texel(pub [u8; 4]);

/// A value with a numeric tag in front of it.
#[derive(Clone, Copy, Debug, PartialEq, Zeroable)]
pub struct Tagged<T: Copy> {
    pub tag: u32,
    pub payload: T,
}

/// A unit struct; buffers of it only count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroable)]
pub struct Tick;

/// Builds a NUL-terminated byte string.
pub fn c_string(s: &str) -> SeqBuf<u8> {
    let mut buf = SeqBuf::with_capacity(s.len() + 1);
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    buf
}

/// Samples of one channel, in capture order, copied into `arena`.
pub fn freeze_channel<'b>(
    samples: &SeqBuf<Sample>,
    channel: u16,
    arena: &'b Bump,
) -> &'b [Sample] {
    let picked: SeqBuf<Sample> = samples
        .iter()
        .copied()
        .filter(|s| s.channel == channel)
        .collect();
    picked.copy_into_bump(arena)
}
