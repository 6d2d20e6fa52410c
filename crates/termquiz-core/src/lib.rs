//! termquiz-core: async-aware sequences, stable merge sort, and the quiz engine.
//!
//! [`Sequence`] runs callbacks that may answer immediately or later
//! ([`Eventual`]) and only becomes asynchronous when one of them defers.
//! The quiz modules build a terminal multiple-choice runner on top of it.

pub mod config;
pub mod engine;
pub mod error;
pub mod eventual;
pub mod model;
pub mod parser;
pub mod report;
pub mod scripted;
pub mod seq;
pub mod session;
pub mod sort;
pub mod text;
pub mod traits;
pub mod util;

pub use error::SeqError;
pub use eventual::Eventual;
pub use seq::{SeqResult, Sequence};
pub use sort::{comparator, default_compare, merge_sort};
pub use util::{range, range_args, range_step, shuffle, shuffle_with};
