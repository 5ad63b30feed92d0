//! Deterministic multi-matcher task filter.
//!
//! [`TaskFilter::filter`] runs every configured matcher over the discovered tasks, merges the matches by matcher type priority
//! and returns the matched tasks in a stable order together with any per-matcher failures.
//!
//! ## Pipeline
//! 1. execute: run each `(type, index)` matcher, collect results and failures
//! 2. merge: attach matched containers in [`vigil_model::MatcherType::PRIORITY`] order, first match wins
//! 3. sort: matched tasks by task index, containers by container index

mod error;
pub use error::FilterError;

mod log;
pub use log::{MatchLog, MatchRecord, TracingLog};

mod executor;
mod merger;
mod sorter;

mod filter;
pub use filter::{FilterOutcome, TaskFilter};

pub mod prelude {
    pub use crate::{FilterError, FilterOutcome, MatchLog, MatchRecord, TaskFilter, TracingLog};
}
