/*!
# IO utilities

Byte stream plumbing between the pipeline stages, and corpus saving.

- [ChunkReader]: [std::io::BufRead] over the chunks sent by the decompressor.
- [Lines]: splits any [std::io::BufRead] into lines.
- [CorpusWriter]: appends accepted records to the corpus file.
!*/
mod chunks;
mod corpus;
mod lines;

pub use chunks::ChunkReader;
pub use corpus::CorpusWriter;
pub use lines::Lines;
