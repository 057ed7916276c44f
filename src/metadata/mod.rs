pub mod aggregator;
pub mod model;
pub mod priority;

pub use aggregator::{Aggregator, aggregate};
pub use model::{Field, MetadataRecord, normalize_whitespace};
pub use priority::{Source, SourcePriority};
