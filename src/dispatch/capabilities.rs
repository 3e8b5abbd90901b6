use super::LOG_TARGET;
use crate::metrics::BackendKind;
use strum::IntoEnumIterator;

/// Which backends can be served by this process.
///
/// Optional backends are compiled in through the `sql` and `distributed`
/// cargo features. A backend without support is reported as unavailable and
/// its strategies are left out of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    in_memory: bool,
    sql: bool,
    distributed: bool,
}

impl Capabilities {
    /// Probe the backends compiled into this build.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            in_memory: true,
            sql: cfg!(feature = "sql"),
            distributed: cfg!(feature = "distributed"),
        }
    }

    /// Every backend, regardless of build features.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            in_memory: true,
            sql: true,
            distributed: true,
        }
    }

    /// No backend at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            in_memory: false,
            sql: false,
            distributed: false,
        }
    }

    /// Restrict the detected capabilities to the listed backends.
    #[must_use]
    pub fn from_backends(backends: &[BackendKind]) -> Self {
        let detected = Self::detect();
        let mut capabilities = Self::none();

        for backend in BackendKind::iter() {
            let wanted = backends.contains(&backend);
            if wanted && !detected.is_available(backend) {
                log::debug!(target: LOG_TARGET, "The {backend} backend is not compiled into this build; enable the '{backend}' feature for support");
            }
            capabilities = capabilities.with(backend, wanted && detected.is_available(backend));
        }

        capabilities
    }

    #[must_use]
    pub const fn is_available(self, backend: BackendKind) -> bool {
        match backend {
            BackendKind::InMemory => self.in_memory,
            BackendKind::Sql => self.sql,
            BackendKind::Distributed => self.distributed,
        }
    }

    #[must_use]
    pub const fn with(mut self, backend: BackendKind, available: bool) -> Self {
        match backend {
            BackendKind::InMemory => self.in_memory = available,
            BackendKind::Sql => self.sql = available,
            BackendKind::Distributed => self.distributed = available,
        }
        self
    }

    pub fn available_backends(self) -> impl Iterator<Item = BackendKind> {
        BackendKind::iter().filter(move |backend| self.is_available(*backend))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_is_always_detected() {
        assert!(Capabilities::detect().is_available(BackendKind::InMemory));
    }

    #[test]
    fn test_with_toggles_single_backend() {
        let caps = Capabilities::all().with(BackendKind::Sql, false);
        assert!(caps.is_available(BackendKind::InMemory));
        assert!(!caps.is_available(BackendKind::Sql));
        assert!(caps.is_available(BackendKind::Distributed));
    }

    #[test]
    fn test_available_backends() {
        let caps = Capabilities::none().with(BackendKind::Distributed, true);
        assert_eq!(caps.available_backends().collect::<Vec<_>>(), [BackendKind::Distributed]);
    }

    #[test]
    fn test_from_backends_excludes_unlisted() {
        let caps = Capabilities::from_backends(&[BackendKind::InMemory]);
        assert!(caps.is_available(BackendKind::InMemory));
        assert!(!caps.is_available(BackendKind::Sql));
        assert!(!caps.is_available(BackendKind::Distributed));
    }

    #[test]
    fn test_from_backends_never_exceeds_detection() {
        let caps = Capabilities::from_backends(&[BackendKind::InMemory, BackendKind::Sql, BackendKind::Distributed]);
        assert_eq!(caps, Capabilities::detect());
    }
}
