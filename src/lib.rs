//! Typed CRUD and aggregation helpers for the `sample_airbnb` listings
//! collection on MongoDB.

pub mod bson;
pub mod config;
pub mod connection;
pub mod demo;
pub mod error;
pub mod helpers;
pub mod models;
pub mod query;
pub mod report;

pub use config::AppConfig;
pub use connection::{ListingsCollection, Session, with_session};
pub use error::{Error, Result};
