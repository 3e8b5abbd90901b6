use super::MetricValue;
use crate::expr::Expr;

/// What a strategy hands back: a value, or an expression still to be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputationResult {
    /// Computed immediately by an eager backend.
    Scalar(MetricValue),

    /// Unevaluated expression to be merged into an aggregation plan.
    Deferred(Expr),
}

impl ComputationResult {
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&MetricValue> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    #[must_use]
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Self::Deferred(expr) => Some(expr),
            Self::Scalar(_) => None,
        }
    }
}
