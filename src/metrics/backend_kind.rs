use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The kind of execution backend a strategy is written for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize, ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Local dataframe engine that computes values eagerly
    InMemory,

    /// Relational database reached through generated SQL
    Sql,

    /// Partitioned dataframe engine that aggregates in parallel
    Distributed,
}

impl BackendKind {
    /// Whether strategies for this backend build expressions instead of values.
    #[must_use]
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::Sql | Self::Distributed)
    }
}
