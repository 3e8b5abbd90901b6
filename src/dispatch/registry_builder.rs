use super::dispatch_table::{BindingKey, DispatchTable};
use super::{Capabilities, DeferredFn, DispatchError, EagerFn, LOG_TARGET, Strategy, StrategyKind};
use crate::metrics::{BackendKind, MetricDef, MetricId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Collects strategy bindings before they are frozen into a [`DispatchTable`].
#[derive(Debug)]
pub struct RegistryBuilder {
    capabilities: Capabilities,
    bindings: HashMap<BindingKey, Strategy>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            bindings: HashMap::new(),
        }
    }

    /// Register a strategy that computes a value immediately.
    ///
    /// # Errors
    ///
    /// Fails if `backend` evaluates lazily or another strategy is already bound to the pair.
    pub fn register_eager(&mut self, metric: impl Into<MetricId>, backend: BackendKind, strategy: EagerFn) -> Result<(), DispatchError> {
        self.register(metric.into(), backend, Strategy::Eager(strategy))
    }

    /// Register a strategy that builds an expression for later execution.
    ///
    /// # Errors
    ///
    /// Fails if `backend` evaluates eagerly or another strategy is already bound to the pair.
    pub fn register_deferred(
        &mut self,
        metric: impl Into<MetricId>,
        backend: BackendKind,
        strategy: DeferredFn,
    ) -> Result<(), DispatchError> {
        self.register(metric.into(), backend, Strategy::Deferred(strategy))
    }

    /// Register every strategy a static metric declaration offers.
    ///
    /// # Errors
    ///
    /// Fails on the first strategy that cannot be registered.
    pub fn register_definition(&mut self, def: &MetricDef) -> Result<(), DispatchError> {
        for (backend, strategy) in def.strategies {
            self.register(MetricId::new(def.name), *backend, *strategy)?;
        }
        Ok(())
    }

    /// Register `strategy` for `(metric, backend)`.
    ///
    /// Unavailable backends are skipped. Registering the same strategy twice
    /// for a pair is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if the strategy shape does not fit the backend or a different strategy is already bound to the pair.
    pub fn register(&mut self, metric: MetricId, backend: BackendKind, strategy: Strategy) -> Result<(), DispatchError> {
        let expected = if backend.is_deferred() {
            StrategyKind::Deferred
        } else {
            StrategyKind::Eager
        };

        if strategy.kind() != expected {
            return Err(DispatchError::StrategyMismatch {
                metric,
                backend,
                expected,
                found: strategy.kind(),
            });
        }

        if !self.capabilities.is_available(backend) {
            log::debug!(target: LOG_TARGET, "Skipping '{metric}' for the {backend} backend, which is unavailable in this process");
            return Ok(());
        }

        match self.bindings.entry(BindingKey::new(metric, backend)) {
            Entry::Occupied(entry) => {
                if entry.get().same_as(&strategy) {
                    Ok(())
                } else {
                    let key = entry.key();
                    Err(DispatchError::ConflictingRegistration {
                        metric: key.metric.clone(),
                        backend: key.backend,
                    })
                }
            }
            Entry::Vacant(entry) => {
                log::debug!(target: LOG_TARGET, "Registering '{}' for the {backend} backend", entry.key().metric);
                let _ = entry.insert(strategy);
                Ok(())
            }
        }
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Freeze the registered bindings.
    #[must_use]
    pub fn build(self) -> DispatchTable {
        DispatchTable::new(self.bindings)
    }
}
