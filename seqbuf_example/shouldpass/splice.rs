use seqbuf::prelude::*;

fn main() {
    let mut a: SeqBuf<u32> = (0..5).collect();
    let b: SeqBuf<u32> = (5..10).collect();
    a.insert_range(0, &b, b.len());
    assert_eq!(&a[..], &[5, 6, 7, 8, 9, 0, 1, 2, 3, 4]);
    a.remove_range(5..10);
    assert_eq!(&a[..], &[5, 6, 7, 8, 9]);
    assert_eq!(&b[..], &[5, 6, 7, 8, 9]);
}
