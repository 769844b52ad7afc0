use std::fmt;

/// Counters of a pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub archives: usize,
    /// decompressed bytes
    pub bytes: u64,
    pub lines: u64,
    /// records submitted to the length filter
    pub candidates: u64,
    /// records written
    pub accepted: u64,
    /// lines left after post-processing, if any was done
    pub post_processed: Option<u64>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} archives, {} MiB decompressed, {} lines, {} candidates, {} records written",
            self.archives,
            self.bytes / (1024 * 1024),
            self.lines,
            self.candidates,
            self.accepted
        )?;
        if let Some(n) = self.post_processed {
            write!(f, ", {} after post-processing", n)?;
        }
        Ok(())
    }
}
