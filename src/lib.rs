//! Lookup engine for command completion and name search.
//!
//! `LookupEngine` owns a vocabulary index and a metric registry. Callers
//! insert vocabulary once, then ask for prefix matches, token completions,
//! metric ranks, or typo-tolerant suggestions.

mod engine;
mod trace_init;

pub use engine::{LookupEngine, LookupError};
pub use lookup_core::{index, metric, settings, suggest};
pub use trace_init::init_tracing;

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
