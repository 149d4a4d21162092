//! Prefix lookup and fuzzy ranking for command completion and name search.
//!
//! `index::PrefixIndex` answers exact-prefix queries over a growing
//! vocabulary. `metric` scores near-matches, and `suggest` combines the two.

pub mod index;
pub mod metric;
pub mod settings;
pub mod suggest;
