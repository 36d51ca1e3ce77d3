//! Text Comparator library
//!
//! The line differ lives in [`differ`]; everything else reads inputs,
//! validates JSON, exports reports or runs comparisons in the background.

pub mod api;
pub mod backend;
pub mod config;
pub mod constant;
pub mod differ;
pub mod messages;
pub mod render;
pub mod worker;

pub use differ::{DiffRecord, DiffResult, LineSequence, Stats, compare};
