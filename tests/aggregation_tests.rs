//! Integration tests for the aggregation runner using Testcontainers.

mod common;

use airbnb_listings::connection::SuburbQuery;
use airbnb_listings::query::{Accumulator, Filter, Pipeline, Sort, SortOrder, Stage};
use common::{TestStore, fixtures};
use futures::TryStreamExt;

async fn seeded_store() -> TestStore {
    let store = TestStore::start().await;
    store.raw_listings().insert_many(fixtures::sydney_listings()).await.expect("Failed to seed");
    store
}

/// Averages cover only qualifying listings, cheapest first.
#[tokio::test]
async fn test_cheapest_suburbs_averages_and_order() {
    let store = seeded_store().await;

    let rows = store
        .listings()
        .cheapest_suburbs(&SuburbQuery::new("Australia", "Sydney", 10))
        .await
        .expect("Failed to aggregate");
    let rows: Vec<_> = rows.try_collect().await.expect("Failed to collect");

    let got: Vec<(&str, f64)> =
        rows.iter().map(|row| (row.suburb.as_str(), row.average_price_f64().unwrap())).collect();
    assert_eq!(got, [("Rozelle", 80.0), ("Manly", 97.5), ("Newtown", 110.0), ("Bondi", 150.0)]);
}

#[tokio::test]
async fn test_cheapest_suburbs_limit() {
    let store = seeded_store().await;

    let rows = store
        .listings()
        .cheapest_suburbs(&SuburbQuery::new("Australia", "Sydney", 2))
        .await
        .expect("Failed to aggregate");
    let rows: Vec<_> = rows.try_collect().await.expect("Failed to collect");

    let suburbs: Vec<&str> = rows.iter().map(|row| row.suburb.as_str()).collect();
    assert_eq!(suburbs, ["Rozelle", "Manly"]);
}

#[tokio::test]
async fn test_cheapest_suburbs_unknown_market_is_empty() {
    let store = seeded_store().await;

    let rows = store
        .listings()
        .cheapest_suburbs(&SuburbQuery::new("Portugal", "Porto", 10))
        .await
        .expect("Failed to aggregate");
    let rows: Vec<_> = rows.try_collect().await.expect("Failed to collect");
    assert!(rows.is_empty());
}

/// The generic runner evaluates stages in the given order.
#[tokio::test]
async fn test_generic_pipeline_runner() {
    let store = seeded_store().await;

    let pipeline = Pipeline::new()
        .then(Stage::Match(Filter::eq("address.market", "Sydney").unwrap()))
        .then(
            Stage::group(
                "room_type",
                [("listings", Accumulator::Count), ("maxPrice", Accumulator::max("price").unwrap())],
            )
            .unwrap(),
        )
        .then(Stage::Sort(Sort::by("listings", SortOrder::Descending).unwrap()))
        .then(Stage::limit(1).unwrap());

    let rows = store.listings().aggregate(&pipeline).await.expect("Failed to aggregate");
    let rows: Vec<_> = rows.try_collect().await.expect("Failed to collect");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("_id").unwrap(), "Entire home/apt");
    assert_eq!(rows[0].get_i32("listings").unwrap(), 9);
    assert_eq!(rows[0].get_f64("maxPrice").unwrap(), 160.0);
}
