//! Core types: days, events, decomposition, display formatting

pub mod day;
pub mod decompose;
pub mod event;
pub mod format;
pub mod tracing;

pub use day::{DayError, DayKey, DayRange, DayResult};
pub use decompose::decompose;
pub use event::{EventColor, EventRecord};
pub use format::{DisplayOptions, LabelMode, TimeFormat, day_label, event_display_string};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
