use crate::expr::{Dialect, Expr};
use compact_str::CompactString;

/// A named column of nullable floating point values held in memory.
///
/// NaN values are stored as nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryColumn {
    name: CompactString,
    values: Vec<Option<f64>>,
}

impl InMemoryColumn {
    #[must_use]
    pub fn new(name: impl Into<CompactString>, values: Vec<Option<f64>>) -> Self {
        let values = values.into_iter().map(|v| v.filter(|f| !f.is_nan())).collect();
        Self { name: name.into(), values }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn non_null_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of rows `start..end`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values[start..end].to_vec(),
        }
    }
}

/// Backend-native reference to a column, borrowed for one strategy call.
#[derive(Debug, Clone, Copy)]
pub enum ColumnHandle<'a> {
    /// Materialized values for eager strategies.
    InMemory(&'a InMemoryColumn),

    /// Column expression plus the dialect it will be rendered in, for deferred strategies.
    Expression { column: &'a Expr, dialect: &'a Dialect },
}
