use compact_str::CompactString;
use core::fmt;

/// Node of an unevaluated expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Reference to a column by name.
    Column(CompactString),

    /// Function applied to argument expressions.
    Function { name: CompactString, args: Vec<Self> },
}

impl Expr {
    #[must_use]
    pub fn column(name: impl Into<CompactString>) -> Self {
        Self::Column(name.into())
    }

    #[must_use]
    pub fn call(name: impl Into<CompactString>, args: Vec<Self>) -> Self {
        Self::Function { name: name.into(), args }
    }

    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function { name, .. } => Some(name.as_str()),
            Self::Column(_) => None,
        }
    }

    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name.as_str()),
            Self::Function { .. } => None,
        }
    }

    #[must_use]
    pub fn args(&self) -> &[Self] {
        match self {
            Self::Function { args, .. } => args.as_slice(),
            Self::Column(_) => &[],
        }
    }

    /// Names of all columns referenced anywhere in the tree, in visiting order.
    #[must_use]
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, columns: &mut Vec<&'a str>) {
        match self {
            Self::Column(name) => columns.push(name),
            Self::Function { args, .. } => args.iter().for_each(|arg| arg.collect_columns(columns)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => f.write_str(name),
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
