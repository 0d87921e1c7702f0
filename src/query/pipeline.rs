use mongodb::bson::{Bson, Document, doc};

use super::Filter;
use crate::bson::FieldPath;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn direction(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// Ordered sort keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    keys: Vec<(FieldPath, SortOrder)>,
}

impl Sort {
    pub fn by(path: &str, order: SortOrder) -> Result<Self> {
        Ok(Self { keys: vec![(FieldPath::new(path)?, order)] })
    }

    pub fn then_by(mut self, path: &str, order: SortOrder) -> Result<Self> {
        let path = FieldPath::new(path)?;
        if self.keys.iter().any(|(existing, _)| *existing == path) {
            return Err(Error::InvalidDescriptor(format!("`{path}` is already a sort key")));
        }
        self.keys.push((path, order));
        Ok(self)
    }

    pub fn to_document(&self) -> Document {
        self.keys.iter().map(|(path, order)| (path.to_string(), Bson::Int32(order.direction()))).collect()
    }
}

/// Per-group computation for a `$group` stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    Avg(FieldPath),
    Max(FieldPath),
    Count,
}

impl Accumulator {
    pub fn avg(path: &str) -> Result<Self> {
        Ok(Accumulator::Avg(FieldPath::new(path)?))
    }

    pub fn max(path: &str) -> Result<Self> {
        Ok(Accumulator::Max(FieldPath::new(path)?))
    }

    fn to_bson(&self) -> Bson {
        let expression = match self {
            Accumulator::Avg(path) => doc! { "$avg": path.to_expression() },
            Accumulator::Max(path) => doc! { "$max": path.to_expression() },
            Accumulator::Count => doc! { "$sum": 1 },
        };
        Bson::Document(expression)
    }
}

/// One aggregation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Match(Filter),
    Group { key: FieldPath, accumulators: Vec<(String, Accumulator)> },
    Sort(Sort),
    Limit(i64),
}

impl Stage {
    /// Group by `key`, computing each named accumulator.
    pub fn group<N: Into<String>>(
        key: &str,
        accumulators: impl IntoIterator<Item = (N, Accumulator)>,
    ) -> Result<Self> {
        let key = FieldPath::new(key)?;
        let mut named: Vec<(String, Accumulator)> = Vec::new();
        for (name, accumulator) in accumulators {
            let name: String = name.into();
            if name.is_empty() || name == "_id" || name.starts_with('$') || name.contains('.') {
                return Err(Error::InvalidDescriptor(format!(
                    "`{name}` is not a valid group output field"
                )));
            }
            if named.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::InvalidDescriptor(format!("group output `{name}` is repeated")));
            }
            named.push((name, accumulator));
        }
        Ok(Stage::Group { key, accumulators: named })
    }

    pub fn limit(limit: u64) -> Result<Self> {
        match i64::try_from(limit) {
            Ok(limit) if limit > 0 => Ok(Stage::Limit(limit)),
            _ => Err(Error::InvalidDescriptor(format!("limit must be between 1 and {}", i64::MAX))),
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            Stage::Match(filter) => doc! { "$match": filter.to_document() },
            Stage::Group { key, accumulators } => {
                let mut group = doc! { "_id": key.to_expression() };
                for (name, accumulator) in accumulators {
                    group.insert(name.clone(), accumulator.to_bson());
                }
                doc! { "$group": group }
            }
            Stage::Sort(sort) => doc! { "$sort": sort.to_document() },
            Stage::Limit(limit) => doc! { "$limit": *limit },
        }
    }
}

/// Stages evaluated in order by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn to_documents(&self) -> Vec<Document> {
        self.stages.iter().map(Stage::to_document).collect()
    }
}
