use std::collections::HashMap;
use std::num::NonZeroU64;

use mongodb::bson::{Bson, Document};
use mongodb::results::{InsertManyResult, UpdateResult};

use crate::bson::{bson_number_as_f64, bson_value_display};
use crate::error::{Error, Result};
use crate::query::{Filter, Sort, SortOrder};

/// Search options for `ListingsCollection::find`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingSearch {
    pub min_bedrooms: u32,
    pub min_bathrooms: u32,
    /// `None` returns every match.
    pub max_results: Option<NonZeroU64>,
}

impl ListingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_bedrooms(mut self, bedrooms: u32) -> Self {
        self.min_bedrooms = bedrooms;
        self
    }

    pub fn min_bathrooms(mut self, bathrooms: u32) -> Self {
        self.min_bathrooms = bathrooms;
        self
    }

    pub fn max_results(mut self, max_results: NonZeroU64) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn filter(&self) -> Result<Filter> {
        Ok(Filter::gte("bedrooms", i64::from(self.min_bedrooms))?
            .and(Filter::gte("bathrooms", i64::from(self.min_bathrooms))?))
    }

    /// Most recently reviewed first.
    pub fn sort(&self) -> Result<Sort> {
        Sort::by("last_review", SortOrder::Descending)
    }

    pub(crate) fn limit(&self) -> Option<i64> {
        self.max_results.map(|n| i64::try_from(n.get()).unwrap_or(i64::MAX))
    }
}

/// Arguments for the cheapest-suburbs aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuburbQuery {
    pub country: String,
    pub market: String,
    pub limit: u64,
}

impl SuburbQuery {
    pub fn new(country: impl Into<String>, market: impl Into<String>, limit: u64) -> Self {
        Self { country: country.into(), market: market.into(), limit }
    }
}

/// One row of the cheapest-suburbs aggregation.
#[derive(Clone, Debug, PartialEq)]
pub struct SuburbAverage {
    pub suburb: String,
    /// Whatever numeric type `$avg` produced (Double, or Decimal128 for decimal prices).
    pub average_price: Bson,
}

impl SuburbAverage {
    pub fn average_price_f64(&self) -> Option<f64> {
        bson_number_as_f64(&self.average_price)
    }
}

impl TryFrom<Document> for SuburbAverage {
    type Error = Error;

    fn try_from(mut doc: Document) -> Result<Self> {
        let suburb = match doc.remove("_id") {
            Some(Bson::String(suburb)) => suburb,
            Some(key) => bson_value_display(&key),
            None => {
                return Err(Error::UnexpectedDocument(format!("group row has no `_id`: {doc}")));
            }
        };
        let average_price = doc.remove("averagePrice").unwrap_or(Bson::Null);
        Ok(Self { suburb, average_price })
    }
}

/// Outcome of `insert_many`, ids in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertManyReport {
    pub inserted_count: usize,
    pub inserted_ids: Vec<Bson>,
}

impl From<InsertManyResult> for InsertManyReport {
    fn from(result: InsertManyResult) -> Self {
        let inserted_ids = ids_in_input_order(result.inserted_ids);
        Self { inserted_count: inserted_ids.len(), inserted_ids }
    }
}

fn ids_in_input_order(ids: HashMap<usize, Bson>) -> Vec<Bson> {
    let mut ids: Vec<(usize, Bson)> = ids.into_iter().collect();
    ids.sort_by_key(|(index, _)| *index);
    ids.into_iter().map(|(_, id)| id).collect()
}

/// Outcome of an update or upsert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateReport {
    pub matched: u64,
    pub modified: u64,
    pub upserted_id: Option<Bson>,
}

impl UpdateReport {
    pub fn upserted_count(&self) -> u64 {
        u64::from(self.upserted_id.is_some())
    }
}

impl From<UpdateResult> for UpdateReport {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted_id: result.upserted_id,
        }
    }
}
