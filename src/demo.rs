//! The fixed menu of listing operations, each with its canned arguments.

use std::fmt;
use std::io::Write;
use std::num::NonZeroU64;
use std::str::FromStr;

use chrono::NaiveDate;
use mongodb::bson::{DateTime, doc};

use crate::connection::{ListingSearch, Session, SuburbQuery};
use crate::error::{Error, Result};
use crate::models::Listing;
use crate::query::Update;
use crate::report;

const LOFT_SUMMARY: &str = "A charming loft in Paris";

/// One entry of the menu. Exactly one runs per invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDatabases,
    CreateListing,
    CreateListings,
    FindListingByName,
    FindListings,
    UpdateListingByName,
    UpsertListingByName,
    SetDefaultPropertyType,
    DeleteListingByName,
    DeleteScrapedBefore,
    #[default]
    CheapestSuburbs,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::ListDatabases,
        Operation::CreateListing,
        Operation::CreateListings,
        Operation::FindListingByName,
        Operation::FindListings,
        Operation::UpdateListingByName,
        Operation::UpsertListingByName,
        Operation::SetDefaultPropertyType,
        Operation::DeleteListingByName,
        Operation::DeleteScrapedBefore,
        Operation::CheapestSuburbs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::ListDatabases => "list-databases",
            Operation::CreateListing => "create-listing",
            Operation::CreateListings => "create-listings",
            Operation::FindListingByName => "find-listing-by-name",
            Operation::FindListings => "find-listings",
            Operation::UpdateListingByName => "update-listing-by-name",
            Operation::UpsertListingByName => "upsert-listing-by-name",
            Operation::SetDefaultPropertyType => "set-default-property-type",
            Operation::DeleteListingByName => "delete-listing-by-name",
            Operation::DeleteScrapedBefore => "delete-scraped-before",
            Operation::CheapestSuburbs => "cheapest-suburbs",
        }
    }

    /// Run against `session`, writing results to `out`.
    pub async fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        log::info!("Running {self}");
        let listings = session.listings();

        match self {
            Operation::ListDatabases => {
                let names = session.list_databases().await?;
                report::write_database_names(out, &names)
            }
            Operation::CreateListing => {
                let listing = Listing::new("Lovely Loft XXX").with_summary(LOFT_SUMMARY).with_rooms(1, 1);
                let id = listings.insert_listing(&listing).await?;
                report::write_inserted_id(out, &id)
            }
            Operation::CreateListings => {
                let batch = ["Lovely Loft I", "Lovely Loft II"]
                    .into_iter()
                    .map(|name| Listing::new(name).with_summary(LOFT_SUMMARY).with_rooms(1, 1).to_document())
                    .collect::<Result<Vec<_>>>()?;
                let inserted = listings.insert_many(batch).await?;
                report::write_insert_many(out, &inserted)
            }
            Operation::FindListingByName => {
                let name = "Lovely Loft I";
                let found = listings.find_one_by_name(name).await?;
                report::write_found_listing(out, name, found.as_ref())
            }
            Operation::FindListings => {
                let search = ListingSearch::new()
                    .min_bedrooms(4)
                    .min_bathrooms(2)
                    .max_results(NonZeroU64::new(5).unwrap_or(NonZeroU64::MIN));
                let found = listings.find(&search).await?;
                report::write_listing_names(out, &found)
            }
            Operation::UpdateListingByName => {
                let update = Update::from_fields(doc! { "bedrooms": 6, "beds": 8 })?;
                let result = listings.update_by_name("Lovely Loft I", &update).await?;
                report::write_update_report(out, &result)
            }
            Operation::UpsertListingByName => {
                let name = "Cozy Cottage II";
                let update = Update::from_fields(doc! { "name": name, "bedrooms": 2, "bathrooms": 1 })?;
                let result = listings.upsert_by_name(name, &update).await?;
                report::write_upsert_report(out, &result)
            }
            Operation::SetDefaultPropertyType => {
                let result = listings.set_default_property_type().await?;
                report::write_update_report(out, &result)
            }
            Operation::DeleteListingByName => {
                let deleted = listings.delete_by_name("Cozy Cottage II").await?;
                report::write_deleted_count(out, deleted)
            }
            Operation::DeleteScrapedBefore => {
                let cutoff = utc_midnight(2019, 2, 15)?;
                let deleted = listings.delete_scraped_before(cutoff).await?;
                report::write_deleted_count(out, deleted)
            }
            Operation::CheapestSuburbs => {
                let query = SuburbQuery::new("Australia", "Sydney", 10);
                let rows = listings.cheapest_suburbs(&query).await?;
                let written = report::write_suburb_averages(out, rows).await?;
                log::debug!("Printed {written} suburbs");
                Ok(())
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL.into_iter().find(|op| op.name().eq_ignore_ascii_case(s)).ok_or_else(|| {
            let known: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
            Error::Config(format!("unknown operation `{s}`, expected one of: {}", known.join(", ")))
        })
    }
}

/// Midnight UTC on the given calendar day.
pub fn utc_midnight(year: i32, month: u32, day: u32) -> Result<DateTime> {
    let midnight = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::Config(format!("{year}-{month:02}-{day:02} is not a valid date")))?;
    Ok(DateTime::from_millis(midnight.and_utc().timestamp_millis()))
}
