//! Console rendering of operation results.
//!
//! Every writer takes the output sink explicitly so the binary can pass
//! stdout and tests can pass a `Vec<u8>`.

use std::io::Write;

use futures::{Stream, TryStreamExt};
use mongodb::bson::{Bson, Document};

use crate::bson::{bson_value_display, document_to_pretty_json};
use crate::connection::{InsertManyReport, SuburbAverage, UpdateReport};
use crate::error::Result;

pub fn write_database_names(out: &mut impl Write, names: &[String]) -> Result<()> {
    for name in names {
        writeln!(out, "- {name}")?;
    }
    Ok(())
}

pub fn write_inserted_id(out: &mut impl Write, id: &Bson) -> Result<()> {
    writeln!(out, "{}", bson_value_display(id))?;
    Ok(())
}

pub fn write_insert_many(out: &mut impl Write, report: &InsertManyReport) -> Result<()> {
    writeln!(out, "{}", report.inserted_count)?;
    for (index, id) in report.inserted_ids.iter().enumerate() {
        writeln!(out, "{index}: {}", bson_value_display(id))?;
    }
    Ok(())
}

/// Print the listing, or the legacy `<name> listing found` line when there
/// was no match.
pub fn write_found_listing(out: &mut impl Write, name: &str, found: Option<&Document>) -> Result<()> {
    match found {
        Some(listing) => writeln!(out, "{}", document_to_pretty_json(listing)?)?,
        None => writeln!(out, "{name} listing found")?,
    }
    Ok(())
}

/// 1-based numbered list of listing names; prints nothing for no results.
pub fn write_listing_names(out: &mut impl Write, listings: &[Document]) -> Result<()> {
    for (index, listing) in listings.iter().enumerate() {
        let name = listing.get("name").map(bson_value_display).unwrap_or_else(|| "<unnamed>".into());
        writeln!(out, "{}. {name}", index + 1)?;
    }
    Ok(())
}

pub fn write_update_report(out: &mut impl Write, report: &UpdateReport) -> Result<()> {
    writeln!(out, "{}", report.matched)?;
    writeln!(out, "{}", report.modified)?;
    Ok(())
}

pub fn write_upsert_report(out: &mut impl Write, report: &UpdateReport) -> Result<()> {
    writeln!(out, "{}", report.matched)?;
    writeln!(out, "{}", report.upserted_count())?;
    match &report.upserted_id {
        Some(id) => writeln!(out, "{}", bson_value_display(id))?,
        None => writeln!(out, "null")?,
    }
    Ok(())
}

pub fn write_deleted_count(out: &mut impl Write, deleted: u64) -> Result<()> {
    writeln!(out, "{deleted}")?;
    Ok(())
}

/// Drain the aggregation stream, one `<suburb> : <averagePrice>` line per row.
/// Returns the number of rows written.
pub async fn write_suburb_averages(
    out: &mut impl Write,
    rows: impl Stream<Item = Result<SuburbAverage>>,
) -> Result<usize> {
    let mut rows = std::pin::pin!(rows);
    let mut written = 0;
    while let Some(row) = rows.try_next().await? {
        writeln!(out, "{} : {}", row.suburb, bson_value_display(&row.average_price))?;
        written += 1;
    }
    Ok(written)
}
