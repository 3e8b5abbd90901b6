//! Sample standard deviation of a column

use super::{MetricOptions, MetricValue};
use crate::Result;
use crate::engines::{InMemoryColumn, Moments};
use crate::expr::{AggregateFunction, Dialect, Expr};

/// Native sample standard deviation function of the distributed engine.
const DISTRIBUTED_STDDEV_SAMP: &str = "stddev_samp";

/// Sample standard deviation (denominator `n - 1`) of `values`.
///
/// Returns NaN when fewer than two values are supplied, as the sample
/// statistic is undefined there.
#[must_use]
pub fn sample_standard_deviation(values: impl IntoIterator<Item = f64>) -> f64 {
    Moments::from_values(values).sample_variance().map_or(f64::NAN, f64::sqrt)
}

#[expect(clippy::unnecessary_wraps, reason = "Signature is fixed by the eager strategy type")]
pub(super) fn in_memory(column: &InMemoryColumn, _options: &MetricOptions) -> Result<MetricValue> {
    Ok(MetricValue::Float(sample_standard_deviation(column.non_null_values())))
}

#[expect(clippy::unnecessary_wraps, reason = "Signature is fixed by the deferred strategy type")]
pub(super) fn sql(column: &Expr, dialect: &Dialect, _options: &MetricOptions) -> Result<Expr> {
    Ok(Expr::call(dialect.aggregate_function(AggregateFunction::StddevSamp), vec![column.clone()]))
}

#[expect(clippy::unnecessary_wraps, reason = "Signature is fixed by the deferred strategy type")]
pub(super) fn distributed(column: &Expr, _dialect: &Dialect, _options: &MetricOptions) -> Result<Expr> {
    Ok(Expr::call(DISTRIBUTED_STDDEV_SAMP, vec![column.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_known_sample_standard_deviation() {
        // Population std of this set is exactly 2; the sample std is sqrt(32 / 7).
        assert_close(sample_standard_deviation(KNOWN), (32.0_f64 / 7.0).sqrt());
        assert!((sample_standard_deviation(KNOWN) - 2.138).abs() < 1e-3);
    }

    #[test]
    fn test_fewer_than_two_values_is_nan() {
        assert!(sample_standard_deviation(core::iter::empty::<f64>()).is_nan());
        assert!(sample_standard_deviation([3.0]).is_nan());
    }

    #[test]
    fn test_matches_merged_partials() {
        let (left, right) = KNOWN.split_at(3);
        let merged = Moments::from_values(left.iter().copied()).merge(Moments::from_values(right.iter().copied()));
        assert_close(sample_standard_deviation(KNOWN), merged.sample_variance().unwrap().sqrt());
    }

    #[test]
    fn test_constant_column_is_zero() {
        assert_close(sample_standard_deviation([4.0, 4.0, 4.0]), 0.0);
    }

    #[test]
    fn test_in_memory_skips_nulls() {
        let mut values: Vec<Option<f64>> = KNOWN.iter().copied().map(Some).collect();
        values.insert(3, None);
        values.push(Some(f64::NAN));
        let column = InMemoryColumn::new("x", values);

        let value = in_memory(&column, &MetricOptions::for_column("x")).unwrap();
        match value {
            MetricValue::Float(v) => assert_close(v, (32.0_f64 / 7.0).sqrt()),
            other => panic!("expected a float, got {other:?}"),
        }
    }

    #[test]
    fn test_sql_uses_stdev_for_mssql() {
        let expr = sql(&Expr::column("x"), &Dialect::new("mssql"), &MetricOptions::for_column("x")).unwrap();
        assert_eq!(expr.function_name(), Some("stdev"));
    }

    #[test]
    fn test_sql_dialect_name_is_case_insensitive() {
        let expr = sql(&Expr::column("x"), &Dialect::new("MsSql"), &MetricOptions::for_column("x")).unwrap();
        assert_eq!(expr.function_name(), Some("stdev"));
    }

    #[test]
    fn test_sql_uses_stddev_samp_elsewhere() {
        for name in ["postgresql", "sqlite", "mysql", "snowflake"] {
            let expr = sql(&Expr::column("x"), &Dialect::new(name), &MetricOptions::for_column("x")).unwrap();
            assert_eq!(expr.function_name(), Some("stddev_samp"), "dialect {name}");
            assert_eq!(expr.args(), &[Expr::column("x")]);
        }
    }

    #[test]
    fn test_distributed_uses_native_function() {
        let expr = distributed(&Expr::column("x"), &Dialect::new("dataframe"), &MetricOptions::for_column("x")).unwrap();
        assert_eq!(expr, Expr::call("stddev_samp", vec![Expr::column("x")]));
    }
}
