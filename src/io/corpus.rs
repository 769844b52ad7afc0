//! Corpus writer.
//!
//! Appends records, each followed by a single `\n`, in the order they are given.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;

pub struct CorpusWriter<W: Write> {
    path: PathBuf,
    inner: BufWriter<W>,
    nb_records: u64,
}

impl CorpusWriter<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        debug!("creating corpus file {:?}", path);
        let file = File::create(path).map_err(|err| Error::Output {
            path: path.to_path_buf(),
            err,
        })?;
        Ok(Self::new(path, file))
    }
}

impl<W: Write> CorpusWriter<W> {
    /// Wrap an arbitrary sink. `path` is only used for error reporting.
    pub fn new(path: &Path, inner: W) -> Self {
        Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(inner),
            nb_records: 0,
        }
    }

    pub fn write_record(&mut self, record: &str) -> Result<(), Error> {
        self.inner
            .write_all(record.as_bytes())
            .and_then(|_| self.inner.write_all(b"\n"))
            .map_err(|err| self.output_error(err))?;
        self.nb_records += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn nb_records(&self) -> u64 {
        self.nb_records
    }

    /// Flush buffered records and give the sink back.
    pub fn finish(self) -> Result<W, Error> {
        let path = self.path;
        self.inner.into_inner().map_err(|e| Error::Output {
            path,
            err: e.into_error(),
        })
    }

    fn output_error(&self, err: std::io::Error) -> Error {
        Error::Output {
            path: self.path.clone(),
            err,
        }
    }
}
