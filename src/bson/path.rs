//! Dotted field paths used by query descriptors.

use std::fmt;

use crate::error::{Error, Result};

/// A validated dotted field path such as `address.suburb`.
///
/// Every segment is non-empty and none may start with `$`, so a path can
/// never be mistaken for an operator once rendered into a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(Error::InvalidDescriptor("field path is empty".into()));
        }
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(Error::InvalidDescriptor(format!(
                    "field path `{path}` has an empty segment"
                )));
            }
            if segment.starts_with('$') {
                return Err(Error::InvalidDescriptor(format!(
                    "field path `{path}` contains operator segment `{segment}`"
                )));
            }
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Field reference for aggregation expressions (`$address.suburb`).
    pub fn to_expression(&self) -> String {
        format!("${}", self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
