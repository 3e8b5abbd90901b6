/// Count, mean, and sum of squared deviations of a set of values.
///
/// Partials computed on disjoint partitions merge exactly into the moments of
/// their union, which is what lets the distributed engine aggregate in parallel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub count: u64,
    pub mean: f64,
    pub m2: f64,
}

impl Moments {
    #[expect(clippy::cast_precision_loss, reason = "Partition sizes stay far below 2^53")]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().fold(Self::default(), |mut acc, value| {
            acc.count += 1;
            let delta = value - acc.mean;
            acc.mean += delta / acc.count as f64;
            acc.m2 += delta * (value - acc.mean);
            acc
        })
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^53")]
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }

        let count = self.count + other.count;
        let (n_a, n_b, n) = (self.count as f64, other.count as f64, count as f64);
        let delta = other.mean - self.mean;

        Self {
            count,
            mean: self.mean + delta * n_b / n,
            m2: self.m2 + other.m2 + delta * delta * n_a * n_b / n,
        }
    }

    /// Sample variance, `None` with fewer than two values.
    #[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^53")]
    pub fn sample_variance(self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance, `None` without values.
    #[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^53")]
    pub fn population_variance(self) -> Option<f64> {
        (self.count >= 1).then(|| self.m2 / self.count as f64)
    }

    pub fn mean(self) -> Option<f64> {
        (self.count >= 1).then_some(self.mean)
    }
}
