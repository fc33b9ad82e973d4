//! Convenience re-exports of the most commonly used types.

pub use crate::apply::{ApplySummary, FileTimeWriter, TimestampWriter, apply};
pub use crate::config::{Config, ConfigError};
pub use crate::engine::{Engine, ResolutionMode, ScanOutcome, ScanState, exclude_modified};
pub use crate::error::{ApplyError, MtimeError, ProducerError, ScanError};
pub use crate::ledger::Ledger;
pub use crate::producer::ProducerExit;
pub use crate::time::CommitTime;
