//! Report formatting and output
//!
//! This module turns elapsed time into report lines and writes them to the
//! diagnostic stream.

pub mod message;
pub(crate) mod sink;

pub use message::{format_duration, format_message};
