use super::{Capabilities, DeferredFn, DispatchError, EagerFn, RegistryBuilder, Strategy, StrategyKind};
use crate::Result;
use crate::engines::ColumnHandle;
use crate::metrics::{BackendKind, ComputationResult, METRIC_DEFINITIONS, MetricId, MetricOptions};
use std::collections::HashMap;
use std::sync::LazyLock;

static GLOBAL_TABLE: LazyLock<DispatchTable> = LazyLock::new(|| {
    DispatchTable::from_definitions(Capabilities::detect()).expect("built-in metric definitions must register cleanly")
});

/// Key of a binding in the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    pub metric: MetricId,
    pub backend: BackendKind,
}

impl BindingKey {
    #[must_use]
    pub const fn new(metric: MetricId, backend: BackendKind) -> Self {
        Self { metric, backend }
    }
}

/// Immutable mapping from `(metric, backend)` to the strategy computing it.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    bindings: HashMap<BindingKey, Strategy>,
}

impl DispatchTable {
    pub(super) const fn new(bindings: HashMap<BindingKey, Strategy>) -> Self {
        Self { bindings }
    }

    /// Build a table from every statically declared metric.
    ///
    /// # Errors
    ///
    /// Fails if two declarations bind different strategies to the same pair.
    pub fn from_definitions(capabilities: Capabilities) -> Result<Self, DispatchError> {
        let mut builder = RegistryBuilder::new(capabilities);
        for def in METRIC_DEFINITIONS {
            builder.register_definition(def)?;
        }
        Ok(builder.build())
    }

    /// The process-wide table, built on first use from the detected capabilities.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_TABLE
    }

    /// Find the strategy bound to `(metric, backend)`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnsupportedCombination`] when nothing is bound.
    pub fn lookup(&self, metric: &MetricId, backend: BackendKind) -> Result<Strategy, DispatchError> {
        self.bindings
            .get(&BindingKey::new(metric.clone(), backend))
            .copied()
            .ok_or_else(|| DispatchError::UnsupportedCombination {
                metric: metric.clone(),
                backend,
            })
    }

    /// Find an eager strategy.
    ///
    /// # Errors
    ///
    /// Fails when nothing is bound or the bound strategy is deferred.
    pub fn eager(&self, metric: &MetricId, backend: BackendKind) -> Result<EagerFn, DispatchError> {
        match self.lookup(metric, backend)? {
            Strategy::Eager(f) => Ok(f),
            Strategy::Deferred(_) => Err(mismatch(metric, backend, StrategyKind::Eager, StrategyKind::Deferred)),
        }
    }

    /// Find a deferred strategy.
    ///
    /// # Errors
    ///
    /// Fails when nothing is bound or the bound strategy is eager.
    pub fn deferred(&self, metric: &MetricId, backend: BackendKind) -> Result<DeferredFn, DispatchError> {
        match self.lookup(metric, backend)? {
            Strategy::Deferred(f) => Ok(f),
            Strategy::Eager(_) => Err(mismatch(metric, backend, StrategyKind::Deferred, StrategyKind::Eager)),
        }
    }

    /// Look up and run the strategy for `(metric, backend)` against `column`.
    ///
    /// Deferred strategies only build an expression; nothing is executed.
    ///
    /// # Errors
    ///
    /// Fails on lookup errors, when the column handle does not fit the strategy,
    /// or with whatever error the strategy itself reports.
    pub fn invoke(&self, metric: &MetricId, backend: BackendKind, column: ColumnHandle<'_>, options: &MetricOptions) -> Result<ComputationResult> {
        match (self.lookup(metric, backend)?, column) {
            (Strategy::Eager(f), ColumnHandle::InMemory(column)) => Ok(ComputationResult::Scalar(f(column, options)?)),
            (Strategy::Deferred(f), ColumnHandle::Expression { column, dialect }) => {
                Ok(ComputationResult::Deferred(f(column, dialect, options)?))
            }
            (Strategy::Eager(_), ColumnHandle::Expression { .. }) => {
                Err(mismatch(metric, backend, StrategyKind::Deferred, StrategyKind::Eager).into())
            }
            (Strategy::Deferred(_), ColumnHandle::InMemory(_)) => {
                Err(mismatch(metric, backend, StrategyKind::Eager, StrategyKind::Deferred).into())
            }
        }
    }

    #[must_use]
    pub fn supports(&self, metric: &MetricId, backend: BackendKind) -> bool {
        self.bindings.contains_key(&BindingKey::new(metric.clone(), backend))
    }

    /// All bindings, ordered by metric then backend.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&BindingKey, StrategyKind)> {
        let mut bindings: Vec<_> = self.bindings.iter().map(|(key, strategy)| (key, strategy.kind())).collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    /// Backends with a strategy for `metric`, in declaration order of [`BackendKind`].
    #[must_use]
    pub fn backends_for(&self, metric: &MetricId) -> Vec<BackendKind> {
        let mut backends: Vec<_> = self.bindings.keys().filter(|key| key.metric == *metric).map(|key| key.backend).collect();
        backends.sort();
        backends
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl PartialEq for DispatchTable {
    fn eq(&self, other: &Self) -> bool {
        self.bindings.len() == other.bindings.len()
            && self
                .bindings
                .iter()
                .all(|(key, strategy)| other.bindings.get(key).is_some_and(|theirs| theirs.same_as(strategy)))
    }
}

fn mismatch(metric: &MetricId, backend: BackendKind, expected: StrategyKind, found: StrategyKind) -> DispatchError {
    DispatchError::StrategyMismatch {
        metric: metric.clone(),
        backend,
        expected,
        found,
    }
}
