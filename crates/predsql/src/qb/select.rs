//! SELECT statement builder.

use crate::config::FormatConfig;
use crate::error::{BuildError, BuildResult};
use crate::ident::ensure_safe_name;
use crate::param::ParamList;
use crate::qb::push_where;
use crate::qb::traits::{BuiltQuery, Memo, SqlQb, StatementKind};
use crate::tree::Where;
use crate::value::Value;

/// SELECT statement builder.
///
/// Column expressions, ORDER BY text and aliases are spliced verbatim and
/// must never carry user input. Only the FROM table and OPTION names are
/// checked.
#[derive(Clone, Debug, Default)]
pub struct SelectQb {
    /// SELECT column expressions (empty means `*`)
    columns: Vec<String>,
    from: Option<String>,
    filter: Option<Where>,
    order_by: Option<String>,
    /// Rendered LIMIT argument: `n` or `offset, n`
    limit: Option<String>,
    /// Trailing `OPTION name=?` settings, in insertion order
    options: Vec<(String, Value)>,
    format: FormatConfig,
    memo: Memo,
}

impl SelectQb {
    /// Create a new SELECT builder with no columns (`SELECT *`).
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT columns ====================

    /// Append column expressions.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.memo.reset();
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one column expression.
    pub fn column(mut self, column: &str) -> Self {
        self.memo.reset();
        self.columns.push(column.to_string());
        self
    }

    /// Append `expr AS alias`.
    pub fn column_as(mut self, expr: &str, alias: &str) -> Self {
        self.memo.reset();
        self.columns.push(format!("{expr} AS {alias}"));
        self
    }

    // ==================== FROM / WHERE ====================

    /// Set the table to select from.
    pub fn from(mut self, table: &str) -> Self {
        self.memo.reset();
        self.from = Some(table.to_string());
        self
    }

    /// Set the WHERE tree, replacing any previous one.
    pub fn filter(mut self, tree: Where) -> Self {
        self.memo.reset();
        self.filter = Some(tree);
        self
    }

    // ==================== ORDER BY / LIMIT ====================

    /// Set the ORDER BY text.
    pub fn order_by(mut self, clause: &str) -> Self {
        self.memo.reset();
        self.order_by = Some(clause.to_string());
        self
    }

    /// Set `LIMIT n`.
    pub fn limit(mut self, n: u64) -> Self {
        self.memo.reset();
        self.limit = Some(n.to_string());
        self
    }

    /// Set `LIMIT offset, n`.
    pub fn limit_offset(mut self, offset: u64, n: u64) -> Self {
        self.memo.reset();
        self.limit = Some(format!("{offset}, {n}"));
        self
    }

    // ==================== OPTION ====================

    /// Add a trailing `OPTION name=?` setting; re-using a name replaces it.
    ///
    /// Names must be plain identifiers and values text or numbers; both are
    /// checked at build time.
    pub fn option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.memo.reset();
        let value = value.into();
        match self.options.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.options.push((name.to_string(), value)),
        }
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: FormatConfig) -> Self {
        self.memo.reset();
        self.format = format;
        self
    }
}

impl SqlQb for SelectQb {
    const KIND: StatementKind = StatementKind::Select;

    fn build_query(&self) -> BuildResult<BuiltQuery> {
        let from = self
            .from
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| BuildError::missing_data("SELECT needs a FROM table"))?;
        ensure_safe_name("FROM", from)?;
        for (name, value) in &self.options {
            ensure_safe_name("OPTION name", name)?;
            if value.is_null() {
                return Err(BuildError::invalid_value(
                    name,
                    "OPTION values can only be strings or numbers",
                ));
            }
        }

        let mut params = ParamList::new();
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str("\nFROM ");
        sql.push_str(from);

        push_where(&mut sql, &mut params, self.filter.as_ref(), &self.format)?;

        if let Some(order_by) = self.order_by.as_deref().filter(|o| !o.is_empty()) {
            sql.push_str("\nORDER BY ");
            sql.push_str(order_by);
        }

        if let Some(limit) = &self.limit {
            sql.push_str("\nLIMIT ");
            sql.push_str(limit);
        }

        if !self.options.is_empty() {
            sql.push_str("\nOPTION ");
            for (i, (name, value)) in self.options.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(name);
                sql.push('=');
                params.bind(value, &self.format, &mut sql);
            }
        }

        Ok(BuiltQuery::new(sql, params.into_values()))
    }

    fn built(&self) -> BuildResult<&BuiltQuery> {
        self.memo.get_or_build(Self::KIND, || self.build_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Placeholder;
    use crate::tree::Group;

    #[test]
    fn test_select_star() {
        let qb = SelectQb::new().from("books");
        assert_eq!(qb.to_sql().unwrap(), "SELECT *\nFROM books");
        assert!(qb.params().unwrap().is_empty());
    }

    #[test]
    fn test_select_columns_and_aliases() {
        let qb = SelectQb::new()
            .columns(["id", "name"])
            .column_as("bookTitle", "title")
            .column_as("bookPrice", "price")
            .from("books");
        assert_eq!(
            qb.to_sql().unwrap(),
            "SELECT id, name, bookTitle AS title, bookPrice AS price\nFROM books"
        );
    }

    #[test]
    fn test_select_missing_from() {
        let err = SelectQb::new().column("id").to_sql().unwrap_err();
        assert!(matches!(err, BuildError::MissingData(_)));
    }

    #[test]
    fn test_select_unsafe_from() {
        let err = SelectQb::new().from("books b").to_sql().unwrap_err();
        assert!(matches!(err, BuildError::Identifier { what: "FROM", .. }));
    }

    #[test]
    fn test_select_order_limit() {
        let qb = SelectQb::new().from("books").order_by("id DESC").limit(10);
        assert_eq!(
            qb.to_sql().unwrap(),
            "SELECT *\nFROM books\nORDER BY id DESC\nLIMIT 10"
        );

        let qb = SelectQb::new().from("books").limit_offset(20, 10);
        assert_eq!(qb.to_sql().unwrap(), "SELECT *\nFROM books\nLIMIT 20, 10");
    }

    #[test]
    fn test_select_options_follow_where_params() {
        let qb = SelectQb::new()
            .from("books")
            .filter(Where::new(Group::new().with("id", 5)))
            .option("max_matches", 100)
            .option("ranker", "bm25");
        let (sql, params) = qb.pair().unwrap();
        assert_eq!(
            sql,
            "SELECT *\nFROM books\nWHERE id = ?\nOPTION max_matches=?, ranker=?"
        );
        assert_eq!(
            params,
            &[Value::Int(5), Value::Int(100), Value::Text("bm25".into())]
        );
    }

    #[test]
    fn test_select_option_validation() {
        let err = SelectQb::new()
            .from("books")
            .option("max matches", 1)
            .to_sql()
            .unwrap_err();
        assert!(matches!(err, BuildError::Identifier { what: "OPTION name", .. }));

        let err = SelectQb::new()
            .from("books")
            .option("comment", None::<&str>)
            .to_sql()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidValue { .. }));
    }

    #[test]
    fn test_select_dollar_numbering() {
        let qb = SelectQb::new()
            .from("books")
            .filter(Where::new(Group::new().with("a", 1).with("b", 2)))
            .option("cutoff", 3)
            .format(FormatConfig::new().with_placeholder(Placeholder::Dollar));
        assert_eq!(
            qb.to_sql().unwrap(),
            "SELECT *\nFROM books\nWHERE (a = $1 AND b = $2)\nOPTION cutoff=$3"
        );
    }
}
