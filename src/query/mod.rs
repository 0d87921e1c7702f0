//! Typed query descriptors.
//!
//! Filters, updates and aggregation stages are built from validated parts and
//! rendered into the BSON documents the server expects. Rendering never fails:
//! anything malformed is rejected when the descriptor is constructed.

mod filter;
mod pipeline;
mod update;

pub use filter::{CmpOp, Filter};
pub use pipeline::{Accumulator, Pipeline, Sort, SortOrder, Stage};
pub use update::Update;

use mongodb::bson::{Bson, Document};

/// True for `{ "$op": ... }` documents, as opposed to literal sub-documents.
pub(crate) fn is_operator_document(value: &Bson) -> bool {
    match value {
        Bson::Document(doc) => is_operator_keys(doc),
        _ => false,
    }
}

fn is_operator_keys(doc: &Document) -> bool {
    !doc.is_empty() && doc.keys().all(|key| key.starts_with('$'))
}
