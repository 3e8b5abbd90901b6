use compact_str::CompactString;
use core::fmt;

/// Vendor families whose SQL differs in ways metrics care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectFamily {
    Mssql,
    Postgresql,
    Mysql,
    Sqlite,
    Other,
}

/// Aggregate functions whose spelling varies between dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    /// Sample standard deviation, `n - 1` denominator.
    StddevSamp,
}

/// Discriminator identifying the SQL variant spoken by a backend.
///
/// Names are matched case-insensitively; unknown names are kept as-is and
/// receive the standard spelling of every function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect {
    name: CompactString,
    family: DialectFamily,
}

impl Dialect {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = CompactString::from(name.trim().to_ascii_lowercase());
        let family = match name.as_str() {
            "mssql" => DialectFamily::Mssql,
            "postgresql" => DialectFamily::Postgresql,
            "mysql" => DialectFamily::Mysql,
            "sqlite" => DialectFamily::Sqlite,
            _ => DialectFamily::Other,
        };

        Self { name, family }
    }

    /// Lower-cased discriminator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn family(&self) -> DialectFamily {
        self.family
    }

    /// Name of `function` in this dialect.
    #[must_use]
    pub const fn aggregate_function(&self, function: AggregateFunction) -> &'static str {
        match (function, self.family) {
            (AggregateFunction::StddevSamp, DialectFamily::Mssql) => "stdev",
            (AggregateFunction::StddevSamp, _) => "stddev_samp",
        }
    }

    /// Quote a single identifier, doubling any embedded closing quote.
    #[must_use]
    pub fn quote_identifier(&self, identifier: &str) -> String {
        let (open, close) = match self.family {
            DialectFamily::Mssql => ('[', ']'),
            DialectFamily::Mysql => ('`', '`'),
            DialectFamily::Postgresql | DialectFamily::Sqlite | DialectFamily::Other => ('"', '"'),
        };

        let mut quoted = String::with_capacity(identifier.len() + 2);
        quoted.push(open);
        for c in identifier.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_detection_ignores_case() {
        assert_eq!(Dialect::new("MSSQL").family(), DialectFamily::Mssql);
        assert_eq!(Dialect::new(" PostgreSQL ").family(), DialectFamily::Postgresql);
        assert_eq!(Dialect::new("mysql").family(), DialectFamily::Mysql);
        assert_eq!(Dialect::new("sqlite").family(), DialectFamily::Sqlite);
        assert_eq!(Dialect::new("bigquery").family(), DialectFamily::Other);
        assert_eq!(Dialect::new("MSSQL").name(), "mssql");
    }

    #[test]
    fn test_stddev_samp_names() {
        assert_eq!(Dialect::new("mssql").aggregate_function(AggregateFunction::StddevSamp), "stdev");
        for name in ["postgresql", "mysql", "sqlite", "trino", ""] {
            assert_eq!(
                Dialect::new(name).aggregate_function(AggregateFunction::StddevSamp),
                "stddev_samp",
                "dialect '{name}'"
            );
        }
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::new("mssql").quote_identifier("price"), "[price]");
        assert_eq!(Dialect::new("mssql").quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(Dialect::new("mysql").quote_identifier("a`b"), "`a``b`");
        assert_eq!(Dialect::new("postgresql").quote_identifier("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
