use super::{Dialect, Expr};
use crate::Result;
use core::fmt::Write;
use ohno::bail;

/// Render an expression as SQL text for `dialect`.
#[must_use]
pub fn render_expr(expr: &Expr, dialect: &Dialect) -> String {
    let mut sql = String::new();
    write_expr(&mut sql, expr, dialect);
    sql
}

/// Render a single-row aggregate query selecting each item under its alias.
///
/// `table` may be schema-qualified (`schema.table`); each part is quoted separately.
///
/// # Errors
///
/// Fails when `items` is empty or `table` has an empty part.
pub fn render_select<'a>(table: &str, items: impl IntoIterator<Item = (&'a str, &'a Expr)>, dialect: &Dialect) -> Result<String> {
    let mut sql = String::from("SELECT ");
    let mut count = 0;

    for (alias, expr) in items {
        if count > 0 {
            sql.push_str(", ");
        }
        write_expr(&mut sql, expr, dialect);
        sql.push_str(" AS ");
        sql.push_str(&dialect.quote_identifier(alias));
        count += 1;
    }

    if count == 0 {
        bail!("an aggregate query needs at least one selected expression");
    }

    if table.split('.').any(str::is_empty) {
        bail!("invalid table name '{table}'");
    }

    sql.push_str(" FROM ");
    for (i, part) in table.split('.').enumerate() {
        if i > 0 {
            sql.push('.');
        }
        sql.push_str(&dialect.quote_identifier(part));
    }

    Ok(sql)
}

fn write_expr(sql: &mut String, expr: &Expr, dialect: &Dialect) {
    match expr {
        Expr::Column(name) => sql.push_str(&dialect.quote_identifier(name)),
        Expr::Function { name, args } => {
            let _ = write!(sql, "{name}(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                write_expr(sql, arg, dialect);
            }
            sql.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stddev(dialect: &Dialect) -> Expr {
        Expr::call(
            dialect.aggregate_function(crate::expr::AggregateFunction::StddevSamp),
            vec![Expr::column("price")],
        )
    }

    #[test]
    fn test_render_expr_mssql() {
        let dialect = Dialect::new("mssql");
        insta::assert_snapshot!(render_expr(&stddev(&dialect), &dialect), @"stdev([price])");
    }

    #[test]
    fn test_render_expr_postgresql() {
        let dialect = Dialect::new("postgresql");
        insta::assert_snapshot!(render_expr(&stddev(&dialect), &dialect), @r#"stddev_samp("price")"#);
    }

    #[test]
    fn test_render_select() {
        let dialect = Dialect::new("postgresql");
        let expr = stddev(&dialect);
        let count = Expr::call("count", vec![Expr::column("price")]);
        let sql = render_select("sales.orders", [("std", &expr), ("n", &count)], &dialect).unwrap();
        insta::assert_snapshot!(sql, @r#"SELECT stddev_samp("price") AS "std", count("price") AS "n" FROM "sales"."orders""#);
    }

    #[test]
    fn test_render_select_mysql_quoting() {
        let dialect = Dialect::new("mysql");
        let expr = stddev(&dialect);
        let sql = render_select("orders", [("column.standard_deviation(price)", &expr)], &dialect).unwrap();
        insta::assert_snapshot!(sql, @"SELECT stddev_samp(`price`) AS `column.standard_deviation(price)` FROM `orders`");
    }

    #[test]
    fn test_render_select_requires_items() {
        let err = render_select("orders", core::iter::empty::<(&str, &Expr)>(), &Dialect::new("sqlite")).unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn test_render_select_rejects_empty_table_part() {
        let expr = Expr::column("x");
        let _ = render_select("sales.", [("x", &expr)], &Dialect::new("sqlite")).unwrap_err();
    }
}
