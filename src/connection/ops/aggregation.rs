//! Aggregation pipeline operations.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::Document;

use crate::connection::ListingsCollection;
use crate::connection::types::{SuburbAverage, SuburbQuery};
use crate::error::{Error, Result};
use crate::query::{Accumulator, Filter, Pipeline, Sort, SortOrder, Stage};

pub const ENTIRE_HOME: &str = "Entire home/apt";

/// match -> group by suburb -> sort by average price -> limit.
pub fn cheapest_suburbs_pipeline(query: &SuburbQuery) -> Result<Pipeline> {
    let matching = Filter::all([
        Filter::eq("bedrooms", 1)?,
        Filter::eq("address.country", query.country.as_str())?,
        Filter::eq("address.market", query.market.as_str())?,
        Filter::exists("address.suburb", true)?,
        Filter::ne("address.suburb", "")?,
        Filter::eq("room_type", ENTIRE_HOME)?,
    ]);

    Ok(Pipeline::new()
        .then(Stage::Match(matching))
        .then(Stage::group("address.suburb", [("averagePrice", Accumulator::avg("price")?)])?)
        .then(Stage::Sort(Sort::by("averagePrice", SortOrder::Ascending)?))
        .then(Stage::limit(query.limit)?))
}

impl ListingsCollection {
    /// Run `pipeline` and stream the results. The stream is single-pass.
    pub async fn aggregate(
        &self,
        pipeline: &Pipeline,
    ) -> Result<BoxStream<'static, Result<Document>>> {
        let stages = pipeline.to_documents();
        log::debug!("Running {}-stage pipeline on {}", stages.len(), self.name());
        let cursor = self.collection.aggregate(stages).await?;
        Ok(cursor.map_err(Error::from).boxed())
    }

    /// Suburbs of `query.market` ordered by average one-bedroom price, cheapest first.
    pub async fn cheapest_suburbs(
        &self,
        query: &SuburbQuery,
    ) -> Result<BoxStream<'static, Result<SuburbAverage>>> {
        let pipeline = cheapest_suburbs_pipeline(query)?;
        let rows = self.aggregate(&pipeline).await?;
        Ok(rows.map(|row| row.and_then(SuburbAverage::try_from)).boxed())
    }
}
