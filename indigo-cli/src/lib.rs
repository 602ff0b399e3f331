//! Indigo CLI support library
//!
//! Self-play drivers shared by the `indigo` binary and its integration tests.

pub mod simulate;

pub use simulate::{play_random_game, run_batch, summarize, BatchSummary, GameRecord};
