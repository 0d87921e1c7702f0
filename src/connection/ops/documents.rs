//! Document CRUD operations on the listings collection.

use futures::TryStreamExt;
use mongodb::bson::{Bson, DateTime, Document};

use crate::connection::ListingsCollection;
use crate::connection::types::{InsertManyReport, ListingSearch, UpdateReport};
use crate::error::{Error, Result};
use crate::models::Listing;
use crate::query::{Filter, Update};

/// Field written by `set_default_property_type`.
pub const PROPERTY_TYPE_FIELD: &str = "propertyType";
pub const DEFAULT_PROPERTY_TYPE: &str = "Unknown";

impl ListingsCollection {
    /// Insert a document as-is and return its `_id`.
    pub async fn insert_one(&self, document: Document) -> Result<Bson> {
        let result = self.collection.insert_one(document).await?;
        log::debug!("Inserted {} into {}", result.inserted_id, self.name());
        Ok(result.inserted_id)
    }

    pub async fn insert_listing(&self, listing: &Listing) -> Result<Bson> {
        self.insert_one(listing.to_document()?).await
    }

    /// Insert a batch; ids come back in input order.
    pub async fn insert_many(&self, documents: Vec<Document>) -> Result<InsertManyReport> {
        if documents.is_empty() {
            return Err(Error::InvalidDescriptor("insert_many needs at least one document".into()));
        }
        let result = self.collection.insert_many(documents).await?;
        let report = InsertManyReport::from(result);
        log::debug!("Inserted {} documents into {}", report.inserted_count, self.name());
        Ok(report)
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Document>> {
        let found = self.collection.find_one(filter.to_document()).await?;
        log::debug!("find_one matched: {}", found.is_some());
        Ok(found)
    }

    pub async fn find_one_by_name(&self, name: &str) -> Result<Option<Document>> {
        self.find_one(&Filter::eq("name", name)?).await
    }

    /// Listings with at least the requested rooms, newest review first.
    pub async fn find(&self, search: &ListingSearch) -> Result<Vec<Document>> {
        let mut options = mongodb::options::FindOptions::default();
        options.sort = Some(search.sort()?.to_document());
        options.limit = search.limit();

        let cursor = self.collection.find(search.filter()?.to_document()).with_options(options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        log::debug!("find returned {} listings", documents.len());
        Ok(documents)
    }

    /// Merge `update` into the first matching document.
    pub async fn update_one(&self, filter: &Filter, update: &Update) -> Result<UpdateReport> {
        let result = self.collection.update_one(filter.to_document(), update.to_document()).await?;
        Ok(result.into())
    }

    /// Like `update_one`, inserting a new document when nothing matches.
    pub async fn upsert_one(&self, filter: &Filter, update: &Update) -> Result<UpdateReport> {
        let result = self
            .collection
            .update_one(filter.to_document(), update.to_document())
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    pub async fn update_many(&self, filter: &Filter, update: &Update) -> Result<UpdateReport> {
        let result = self.collection.update_many(filter.to_document(), update.to_document()).await?;
        log::debug!("update_many matched {} modified {}", result.matched_count, result.modified_count);
        Ok(result.into())
    }

    pub async fn update_by_name(&self, name: &str, update: &Update) -> Result<UpdateReport> {
        self.update_one(&Filter::eq("name", name)?, update).await
    }

    pub async fn upsert_by_name(&self, name: &str, update: &Update) -> Result<UpdateReport> {
        self.upsert_one(&Filter::eq("name", name)?, update).await
    }

    /// Give every listing without a property type the default one.
    pub async fn set_default_property_type(&self) -> Result<UpdateReport> {
        let filter = Filter::exists(PROPERTY_TYPE_FIELD, false)?;
        let update = Update::set(PROPERTY_TYPE_FIELD, DEFAULT_PROPERTY_TYPE)?;
        self.update_many(&filter, &update).await
    }

    pub async fn delete_one(&self, filter: &Filter) -> Result<u64> {
        let result = self.collection.delete_one(filter.to_document()).await?;
        Ok(result.deleted_count)
    }

    pub async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        let result = self.collection.delete_many(filter.to_document()).await?;
        log::debug!("delete_many removed {} documents", result.deleted_count);
        Ok(result.deleted_count)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<u64> {
        self.delete_one(&Filter::eq("name", name)?).await
    }

    /// Remove listings last scraped strictly before `cutoff`.
    pub async fn delete_scraped_before(&self, cutoff: DateTime) -> Result<u64> {
        self.delete_many(&Filter::lt("last_scraped", cutoff)?).await
    }
}
