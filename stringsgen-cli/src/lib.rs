//! CLI library for testing purposes

pub mod output;

pub use output::{Destination, WriteOutcome};
