/*! Line shuffling

Lines are indexed by `(offset, length)` in a first pass, the index is shuffled
(Fisher-Yates, through [rand::seq::SliceRandom]) and lines are then copied
in the new order with one seek each.
Only the index is held in memory, never the corpus.
!*/
use std::io::{BufRead, Read, Seek, SeekFrom, Write};

use rand::seq::SliceRandom;
use rand::Rng;
use runiq::filters::{DigestFilter, Filter};

/// Position of a line in a file, without its `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub offset: u64,
    pub len: usize,
}

/// Index every line of `src`.
pub fn index_lines<R: BufRead>(mut src: R) -> std::io::Result<Vec<LineSpan>> {
    let mut spans = Vec::new();
    let mut offset = 0u64;
    let mut line = Vec::new();

    loop {
        line.clear();
        let nb_read = src.read_until(b'\n', &mut line)?;
        if nb_read == 0 {
            break;
        }
        let len = if line.last() == Some(&b'\n') {
            nb_read - 1
        } else {
            nb_read
        };
        spans.push(LineSpan { offset, len });
        offset += nb_read as u64;
    }

    Ok(spans)
}

/// Write the lines of `src` into `dst` in random order.
///
/// With `dedup`, a line is only written the first time it comes out of the shuffle.
/// Returns the number of written lines.
pub fn shuffle_lines<S, W, R>(
    src: &mut S,
    dst: &mut W,
    rng: &mut R,
    dedup: bool,
) -> std::io::Result<u64>
where
    S: Read + Seek,
    W: Write,
    R: Rng + ?Sized,
{
    src.seek(SeekFrom::Start(0))?;
    let mut spans = index_lines(std::io::BufReader::new(&mut *src))?;
    spans.shuffle(rng);

    let mut filter = if dedup {
        Some(DigestFilter::default())
    } else {
        None
    };
    let mut line = Vec::new();
    let mut nb_written = 0;

    for span in spans {
        line.resize(span.len, 0);
        src.seek(SeekFrom::Start(span.offset))?;
        src.read_exact(&mut line)?;

        if let Some(f) = filter.as_mut() {
            if !f.detect(&line) {
                continue;
            }
        }
        dst.write_all(&line)?;
        dst.write_all(b"\n")?;
        nb_written += 1;
    }

    Ok(nb_written)
}
