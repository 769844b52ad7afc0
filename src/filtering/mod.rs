/*! Filtering utilities

Filters decide whether a candidate record makes it into the corpus.

Filters implement [Filter]: they hold no state, so the same input always
gets the same answer (see [Length]).
! */
mod filter;
mod length;

pub use filter::Filter;
pub use length::Length;
