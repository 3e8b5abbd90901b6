use crate::Result;
use crate::engines::InMemoryColumn;
use crate::expr::{Dialect, Expr};
use crate::metrics::{MetricOptions, MetricValue};
use strum::Display;

/// Computes a value immediately from an in-memory column.
pub type EagerFn = fn(&InMemoryColumn, &MetricOptions) -> Result<MetricValue>;

/// Builds an unevaluated expression over a column expression for a dialect.
///
/// Implementations must not touch the backend.
pub type DeferredFn = fn(&Expr, &Dialect, &MetricOptions) -> Result<Expr>;

#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Eager(EagerFn),
    Deferred(DeferredFn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StrategyKind {
    Eager,
    Deferred,
}

impl StrategyKind {
    #[must_use]
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::Deferred)
    }
}

impl Strategy {
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Eager(_) => StrategyKind::Eager,
            Self::Deferred(_) => StrategyKind::Deferred,
        }
    }

    /// Whether both strategies have the same shape and call the same function.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Eager(a), Self::Eager(b)) => core::ptr::fn_addr_eq(*a, *b),
            (Self::Deferred(a), Self::Deferred(b)) => core::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}
