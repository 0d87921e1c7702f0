//! BSON utilities for field paths and console formatting.

mod formatter;
mod path;

pub use formatter::*;
pub use path::*;
