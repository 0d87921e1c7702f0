//! Operations on the listings collection, grouped by concern.

pub mod aggregation;
pub mod documents;

pub use aggregation::{ENTIRE_HOME, cheapest_suburbs_pipeline};
pub use documents::{DEFAULT_PROPERTY_TYPE, PROPERTY_TYPE_FIELD};
