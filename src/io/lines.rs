//! Line segmentation.
//!
//! Splits a byte stream on `\n`, yielding the final unterminated run too.
//! Lines are decoded lossily: invalid UTF-8 sequences become U+FFFD.
use std::io::BufRead;

/// Lazy, single pass iterator over the lines of a [BufRead].
///
/// Unlike [BufRead::lines], invalid UTF-8 does not stop iteration,
/// and there is no length limit on a single line.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
