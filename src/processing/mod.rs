/*! Post-processing

Operations on a finished corpus file: line shuffling and deduplication.
Both are done natively, so they behave the same on every platform.

The result goes to a sibling `<corpus>.post` file that then replaces the corpus.
!*/
mod dedup;
mod shuffle;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::Rng;

use crate::error::Error;
pub use dedup::{dedup_lines, DedupStats};
pub use shuffle::{index_lines, shuffle_lines, LineSpan};

/// What to do with the corpus once written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessor {
    #[default]
    None,
    Shuffle,
    Dedup,
    ShuffleThenDedup,
}

impl PostProcessor {
    pub fn from_flags(shuffle: bool, unique: bool) -> Self {
        match (shuffle, unique) {
            (false, false) => Self::None,
            (true, false) => Self::Shuffle,
            (false, true) => Self::Dedup,
            (true, true) => Self::ShuffleThenDedup,
        }
    }

    fn step(&self) -> &'static str {
        match self {
            Self::None => "no post-processing",
            Self::Shuffle => "shuffle",
            Self::Dedup => "deduplication",
            Self::ShuffleThenDedup => "shuffle and deduplication",
        }
    }

    /// Rewrite the corpus at `path` in place.
    ///
    /// Returns the number of lines left, or `None` if there was nothing to do.
    pub fn run<R: Rng + ?Sized>(&self, path: &Path, rng: &mut R) -> Result<Option<u64>, Error> {
        if *self == Self::None {
            return Ok(None);
        }

        let step = self.step();
        let err = |err| Error::PostProcess { step, err };

        info!("starting {} of {:?}", step, path);
        let tmp = post_path(path);
        let src = File::open(path).map_err(err)?;
        let dst = File::create(&tmp).map_err(err)?;

        let nb_lines = match self.rewrite(src, dst, rng) {
            Ok(nb_lines) => nb_lines,
            Err(e) => {
                if let Err(rm) = std::fs::remove_file(&tmp) {
                    warn!("could not remove {:?}: {}", tmp, rm);
                }
                return Err(err(e));
            }
        };

        std::fs::rename(&tmp, path).map_err(err)?;
        info!("{} done, {} lines", step, nb_lines);

        Ok(Some(nb_lines))
    }

    fn rewrite<R: Rng + ?Sized>(
        &self,
        mut src: File,
        dst: File,
        rng: &mut R,
    ) -> std::io::Result<u64> {
        let mut dst = BufWriter::new(dst);
        let nb_lines = match self {
            Self::Dedup => {
                let stats = dedup_lines(BufReader::new(src), &mut dst)?;
                info!("{} duplicate lines removed", stats.removed);
                stats.kept
            }
            Self::Shuffle => shuffle_lines(&mut src, &mut dst, rng, false)?,
            _ => shuffle_lines(&mut src, &mut dst, rng, true)?,
        };
        dst.flush()?;
        Ok(nb_lines)
    }
}

fn post_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".post");
    PathBuf::from(name)
}
