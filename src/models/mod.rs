// Data structures and types

pub mod listing;

pub use listing::{Address, Listing};
