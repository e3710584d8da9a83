use seqbuf::{SeqBuf, Zeroable};

#[derive(Clone, Copy, Debug, PartialEq, Zeroable)]
struct Particle {
    position: [f32; 3],
    velocity: [f32; 3],
    alive: bool,
}

#[derive(Clone, Copy, Zeroable)]
struct Wrapper<T: Copy>(T, u8);

#[derive(Clone, Copy, Zeroable)]
struct Empty;

fn main() {
    let mut particles: SeqBuf<Particle> = SeqBuf::with_capacity(8);
    particles.resize_zeroed(8);
    assert!(particles.iter().all(|p| !p.alive && p.position == [0.0; 3]));

    let mut wrapped: SeqBuf<Wrapper<u64>> = SeqBuf::new();
    wrapped.resize_zeroed(2);
    assert_eq!(wrapped[1].0, 0);

    let mut empties: SeqBuf<Empty> = SeqBuf::new();
    empties.resize_zeroed(3);
    assert_eq!(empties.len(), 3);
}
