//! MongoDB connection lifecycle and collection operations.
//!
//! - `Session`: owns the client for one run, closed on every exit path
//! - `ListingsCollection`: the listings collection handle
//! - `ops`: CRUD and aggregation operations on that handle
//! - `types`: search options and operation reports

pub mod listings;
pub mod ops;
pub mod session;
pub mod types;

pub use listings::ListingsCollection;
pub use ops::cheapest_suburbs_pipeline;
pub use session::{Session, with_session};
pub use types::{InsertManyReport, ListingSearch, SuburbAverage, SuburbQuery, UpdateReport};
