/*! Deduplication

Uses [runiq](https://github.com/whitfin/runiq) digests to drop lines already seen.
The first occurrence of a line is kept, in place.
!*/
use std::io::{BufRead, Write};

use runiq::filters::{DigestFilter, Filter};

/// Outcome of a deduplication pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    pub kept: u64,
    pub removed: u64,
}

/// Copy the lines of `src` into `dst`, skipping duplicates.
///
/// Every written line is `\n`-terminated, including a last unterminated one.
pub fn dedup_lines<R: BufRead, W: Write>(mut src: R, dst: &mut W) -> std::io::Result<DedupStats> {
    let mut filter = DigestFilter::default();
    let mut stats = DedupStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if src.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }

        if filter.detect(&line) {
            dst.write_all(&line)?;
            dst.write_all(b"\n")?;
            stats.kept += 1;
        } else {
            stats.removed += 1;
        }
    }

    Ok(stats)
}
