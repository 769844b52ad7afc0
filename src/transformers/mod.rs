/*! Line transformers.

Rewrite raw dump lines into normalized corpus text.

The [Normalizer] applies, in this order:
1. [StripTags]: shallow `<...>` removal
1. [StripDigits]: standalone digit run removal (optional)
1. [TranslationTable]: markup/punctuation to space
1. [Collapse]: whitespace normalization

The [SentenceSplitter] then cuts the normalized line into candidate records.
!*/

mod collapse;
mod digits;
mod normalizer;
mod sentences;
mod table;
mod tags;
mod transform;

pub use collapse::Collapse;
pub use digits::StripDigits;
pub use normalizer::Normalizer;
pub use sentences::SentenceSplitter;
pub use table::{TranslationTable, DEFAULT_ALPHABET};
pub use tags::StripTags;
pub use transform::Transform;
