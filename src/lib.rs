//! Daily shop data extractor.
//!
//! Reads the daily shop trade tables of a Cobblemon install, works out how
//! likely each item is to show up in a shop roll and what it costs in
//! emeralds (and coins), and writes the result as CSV.

pub mod cli;
pub mod console;
pub mod data;
pub mod error;
pub mod shop;

pub use error::{ExtractError, Result};
