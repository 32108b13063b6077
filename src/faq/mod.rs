pub mod corpus;
pub mod index;

pub use corpus::{load_corpus, FaqEntry};
pub use index::FaqIndex;
