use mongodb::bson::{Bson, Document, doc};

use super::is_operator_document;
use crate::bson::FieldPath;
use crate::error::{Error, Result};

/// Comparison applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
}

impl CmpOp {
    pub fn operator(self) -> &'static str {
        match self {
            CmpOp::Eq => "$eq",
            CmpOp::Ne => "$ne",
            CmpOp::Gt => "$gt",
            CmpOp::Gte => "$gte",
            CmpOp::Lt => "$lt",
        }
    }
}

/// A predicate selecting documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Cmp { path: FieldPath, op: CmpOp, value: Bson },
    Exists { path: FieldPath, exists: bool },
    And(Vec<Filter>),
}

impl Filter {
    /// Matches every document.
    pub fn any() -> Self {
        Filter::And(Vec::new())
    }

    pub fn eq(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self::compare(path, CmpOp::Eq, value)
    }

    pub fn ne(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self::compare(path, CmpOp::Ne, value)
    }

    pub fn gt(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self::compare(path, CmpOp::Gt, value)
    }

    pub fn gte(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self::compare(path, CmpOp::Gte, value)
    }

    pub fn lt(path: &str, value: impl Into<Bson>) -> Result<Self> {
        Self::compare(path, CmpOp::Lt, value)
    }

    pub fn exists(path: &str, exists: bool) -> Result<Self> {
        Ok(Filter::Exists { path: FieldPath::new(path)?, exists })
    }

    pub fn compare(path: &str, op: CmpOp, value: impl Into<Bson>) -> Result<Self> {
        let path = FieldPath::new(path)?;
        let value = value.into();
        if is_operator_document(&value) {
            return Err(Error::InvalidDescriptor(format!(
                "value for `{path}` must be a literal, got operator document {value}"
            )));
        }
        Ok(Filter::Cmp { path, op, value })
    }

    /// Conjunction of `filters`, with nested conjunctions flattened.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut clauses = Vec::new();
        for filter in filters {
            filter.flatten_into(&mut clauses);
        }
        Filter::And(clauses)
    }

    pub fn and(self, other: Filter) -> Self {
        Filter::all([self, other])
    }

    fn flatten_into(self, out: &mut Vec<Filter>) {
        match self {
            Filter::And(inner) => inner.into_iter().for_each(|f| f.flatten_into(out)),
            leaf => out.push(leaf),
        }
    }

    /// Render as a query document.
    ///
    /// Clauses on the same path are merged into one operator document when
    /// their operators do not overlap; anything that cannot be merged goes
    /// into `$and`.
    pub fn to_document(&self) -> Document {
        let mut clauses = Vec::new();
        self.clone().flatten_into(&mut clauses);

        let mut rendered = Document::new();
        let mut overflow: Vec<Bson> = Vec::new();

        for clause in clauses {
            let Some((path, condition)) = clause.condition() else {
                continue;
            };

            if let Some(existing) = rendered.get_mut(path.as_str()) {
                if !merge_operators(existing, &condition) {
                    overflow.push(Bson::Document(doc! { path.as_str(): condition }));
                }
            } else {
                rendered.insert(path.as_str(), condition);
            }
        }

        if !overflow.is_empty() {
            rendered.insert("$and", overflow);
        }
        rendered
    }

    fn condition(&self) -> Option<(&FieldPath, Bson)> {
        match self {
            Filter::Cmp { path, op: CmpOp::Eq, value } if !matches!(value, Bson::Document(_)) => {
                Some((path, value.clone()))
            }
            Filter::Cmp { path, op, value } => {
                Some((path, Bson::Document(doc! { op.operator(): value.clone() })))
            }
            Filter::Exists { path, exists } => {
                Some((path, Bson::Document(doc! { "$exists": *exists })))
            }
            Filter::And(_) => None,
        }
    }
}

/// Fold `incoming` operators into `existing` when both are operator
/// documents with disjoint operators.
fn merge_operators(existing: &mut Bson, incoming: &Bson) -> bool {
    if !is_operator_document(existing) || !is_operator_document(incoming) {
        return false;
    }
    let (Bson::Document(existing), Bson::Document(incoming)) = (existing, incoming) else {
        return false;
    };
    if incoming.keys().any(|key| existing.contains_key(key)) {
        return false;
    }
    for (key, value) in incoming {
        existing.insert(key.clone(), value.clone());
    }
    true
}
