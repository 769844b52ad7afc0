//! Pipeline trait.
use crate::error::Error;

/// A runnable pipeline, generic over what a successful run reports.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
