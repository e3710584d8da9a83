use seqbuf::raw;

fn main() {
    unsafe {
        let mut x = raw::create(1);
        for c in b"abcdefghijklmnopqrstuvwxyz\0" {
            x = raw::push(x, c);
        }
        assert_eq!(*raw::end_pointer(x).sub(2), b'z');

        for c in b'A'..=b'Z' {
            x = raw::insert(x, &c, raw::size(x) - 1);
        }
        assert_eq!(*raw::end_pointer(x).sub(1), 0);
        assert_eq!(*raw::end_pointer(x).sub(2), b'Z');

        x = raw::shrink(x);
        assert_eq!(raw::capacity(x), raw::size(x));
        let text = std::ffi::CStr::from_ptr(x.as_ptr() as *const std::os::raw::c_char);
        assert_eq!(
            text.to_str().unwrap(),
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"
        );
        raw::release(x);
    }
}
