//! Deferred expressions and SQL dialect handling
//!
//! Deferred strategies return an [`Expr`] instead of a value. Building an
//! expression never reaches a backend; engines collect the expressions of a
//! batch into an aggregation plan and execute the plan in one go.
//!
//! The [`Dialect`] discriminator carries vendor differences: quoting of
//! identifiers and the names of aggregate functions. The sample variant of a
//! statistic is always the default, with vendor-specific names used only where
//! a dialect spells the function differently.

mod dialect;
mod expression;
mod sql_renderer;

pub use dialect::{AggregateFunction, Dialect, DialectFamily};
pub use expression::Expr;
pub use sql_renderer::{render_expr, render_select};
