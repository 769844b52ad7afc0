//! Pipelines.
//!
//! [CorpusPipeline] is the streaming dump-to-corpus pipeline,
//! and implements the light [pipeline::Pipeline] trait.
mod corpus;
#[allow(clippy::module_inception)]
pub mod pipeline;
mod stats;

pub use corpus::CorpusPipeline;
pub use pipeline::Pipeline;
pub use stats::Stats;
