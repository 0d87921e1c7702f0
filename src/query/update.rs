use mongodb::bson::{Bson, Document, doc};

use super::is_operator_document;
use crate::bson::FieldPath;
use crate::error::{Error, Result};

/// A partial-merge update: every entry becomes part of one `$set`.
///
/// Fields absent from the update are never touched, so applying it can not
/// remove data from a matched document.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    set: Vec<(FieldPath, Bson)>,
}

impl Update {
    pub fn set(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self { set: Vec::new() }.and_set(path, value)
    }

    pub fn and_set(mut self, path: &str, value: impl Into<Bson>) -> Result<Self> {
        let path = FieldPath::new(path)?;
        let value = value.into();

        if path.segments().next() == Some("_id") {
            return Err(Error::InvalidDescriptor("`_id` can not be updated".into()));
        }
        if is_operator_document(&value) {
            return Err(Error::InvalidDescriptor(format!(
                "value for `{path}` must be a literal, got operator document {value}"
            )));
        }
        if let Some((existing, _)) = self.set.iter().find(|(other, _)| overlaps(other, &path)) {
            return Err(Error::InvalidDescriptor(format!(
                "`{path}` conflicts with `{existing}` in the same update"
            )));
        }

        self.set.push((path, value));
        Ok(self)
    }

    /// Build from a patch document whose top-level keys are field paths.
    pub fn from_fields(fields: Document) -> Result<Self> {
        let mut entries = fields.into_iter();
        let Some((first_path, first_value)) = entries.next() else {
            return Err(Error::InvalidDescriptor("update has no fields to set".into()));
        };

        let mut update = Self::set(&first_path, first_value)?;
        for (path, value) in entries {
            update = update.and_set(&path, value)?;
        }
        Ok(update)
    }

    /// The fields being set, keyed by path.
    pub fn fields(&self) -> Document {
        self.set.iter().map(|(path, value)| (path.to_string(), value.clone())).collect()
    }

    pub fn to_document(&self) -> Document {
        doc! { "$set": self.fields() }
    }
}

/// Equal paths, or one path nested inside the other.
fn overlaps(a: &FieldPath, b: &FieldPath) -> bool {
    let mut a = a.segments();
    let mut b = b.segments();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) if x == y => continue,
            (Some(_), Some(_)) => return false,
            _ => return true,
        }
    }
}
