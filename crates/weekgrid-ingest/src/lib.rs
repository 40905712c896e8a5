//! Ingestion: raw calendar payloads and their normalization into records

pub mod error;
pub mod normalize;
pub mod raw;

pub use error::{IngestError, IngestResult};
pub use normalize::{normalize_event, normalize_events, parse_events};
pub use raw::{RawEvent, RawEventId, RawEventTime};
