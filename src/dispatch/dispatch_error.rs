use super::StrategyKind;
use crate::metrics::{BackendKind, MetricId};
use core::fmt;

/// Errors raised by registration and lookup in the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No strategy is registered for the requested pair.
    UnsupportedCombination { metric: MetricId, backend: BackendKind },

    /// A strategy exists, but it has the other shape than the caller needs.
    StrategyMismatch {
        metric: MetricId,
        backend: BackendKind,
        expected: StrategyKind,
        found: StrategyKind,
    },

    /// A different strategy is already registered for the pair.
    ConflictingRegistration { metric: MetricId, backend: BackendKind },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCombination { metric, backend } => {
                write!(f, "metric '{metric}' is not supported on the {backend} backend")
            }
            Self::StrategyMismatch {
                metric,
                backend,
                expected,
                found,
            } => write!(
                f,
                "metric '{metric}' on the {backend} backend is registered as {found}, but {expected} is required"
            ),
            Self::ConflictingRegistration { metric, backend } => {
                write!(f, "a different strategy for metric '{metric}' on the {backend} backend is already registered")
            }
        }
    }
}

impl core::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_combination_message() {
        let e = DispatchError::UnsupportedCombination {
            metric: MetricId::from("column.median"),
            backend: BackendKind::Sql,
        };
        assert_eq!(e.to_string(), "metric 'column.median' is not supported on the sql backend");
    }

    #[test]
    fn test_strategy_mismatch_message() {
        let e = DispatchError::StrategyMismatch {
            metric: MetricId::from("column.standard_deviation"),
            backend: BackendKind::InMemory,
            expected: StrategyKind::Deferred,
            found: StrategyKind::Eager,
        };
        assert_eq!(
            e.to_string(),
            "metric 'column.standard_deviation' on the in-memory backend is registered as eager, but deferred is required"
        );
    }

    #[test]
    fn test_converts_into_app_error() {
        fn fails() -> crate::Result<()> {
            Err(DispatchError::ConflictingRegistration {
                metric: MetricId::from("m"),
                backend: BackendKind::Distributed,
            })?;
            Ok(())
        }

        let e = fails().unwrap_err();
        assert!(e.to_string().contains("already registered"));
    }
}
