//! BSON value formatting for console output.

use mongodb::bson::{Bson, Document};

/// Render a value the way it appears in a console line.
///
/// Strings are printed bare, numbers without a trailing `.0`, ids as hex.
/// Anything structured falls back to relaxed Extended JSON.
pub fn bson_value_display(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) => n.to_string(),
        Bson::Decimal128(d) => d.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "null".to_string(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::DateTime(dt) => (*dt).try_to_rfc3339_string().unwrap_or_else(|_| format!("{dt:?}")),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

/// Numeric value of an Int32/Int64/Double/Decimal128, if it has one.
pub fn bson_number_as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        Bson::Decimal128(d) => d.to_string().parse().ok(),
        _ => None,
    }
}

/// Pretty relaxed Extended JSON for a whole document.
pub fn document_to_pretty_json(doc: &Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Bson::Document(doc.clone()).into_relaxed_extjson())
}
