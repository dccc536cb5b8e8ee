//! Pipeline orchestration: session state, the Index and Search operations,
//! retrieval mapping, and the single-call summary aggregator.

pub mod ops;
pub mod params;
pub mod retrieve;
pub mod session;
pub mod summary;

pub use ops::{index_document, search, SearchOutcome};
pub use params::{IndexParams, SearchParams};
pub use retrieve::retrieve;
pub use session::{IndexedCorpus, Models, SessionState};
pub use summary::summarize_chunks;
