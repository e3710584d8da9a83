use seqbuf::{Exact, SeqBuf, TryReserveError};

fn main() {
    let mut s: SeqBuf<u64, Exact> = SeqBuf::with_growth();
    assert_eq!(s.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    for i in 0..4 {
        s.try_push(i).unwrap();
        assert_eq!(s.capacity(), s.len());
    }
    let err: Box<dyn std::error::Error> = Box::new(TryReserveError::CapacityOverflow);
    assert_eq!(err.to_string(), "sequence buffer capacity overflow");
}
