//! Handle on the listings collection.

use mongodb::Collection;
use mongodb::bson::Document;

/// The listings collection; operations live in `connection::ops`.
#[derive(Clone)]
pub struct ListingsCollection {
    pub(crate) collection: Collection<Document>,
}

impl ListingsCollection {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    pub fn name(&self) -> &str {
        self.collection.name()
    }
}
