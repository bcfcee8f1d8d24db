//! Const-evaluable text builder.
//!
//! Const panics accept a single `&str`, not format arguments, so the build-time
//! diagnostic is assembled byte by byte here. ASCII only.

const CAPACITY: usize = 192;

/// Fixed-capacity ASCII buffer usable in `const fn`.
///
/// Input past the capacity is truncated.
#[derive(Clone, Copy)]
pub(crate) struct Message {
    buf: [u8; CAPACITY],
    len: usize,
}

impl Message {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; CAPACITY],
            len: 0,
        }
    }

    pub(crate) const fn str(mut self, s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() && self.len < CAPACITY {
            self.buf[self.len] = bytes[i];
            self.len += 1;
            i += 1;
        }
        self
    }

    pub(crate) const fn usize(self, mut n: usize) -> Self {
        // usize::MAX has 20 decimal digits on 64-bit targets.
        let mut digits = [0u8; 20];
        let mut count = 0;
        if n == 0 {
            digits[0] = b'0';
            count = 1;
        }
        while n > 0 {
            digits[count] = b'0' + (n % 10) as u8;
            n /= 10;
            count += 1;
        }

        let mut this = self;
        while count > 0 {
            count -= 1;
            if this.len < CAPACITY {
                this.buf[this.len] = digits[count];
                this.len += 1;
            }
        }
        this
    }

    pub(crate) const fn as_str(&self) -> &str {
        let (written, _) = self.buf.split_at(self.len);
        match core::str::from_utf8(written) {
            Ok(s) => s,
            Err(_) => "invalid layout declaration",
        }
    }
}
