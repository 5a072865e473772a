//! UPDATE statement builder.

use crate::config::FormatConfig;
use crate::error::{BuildError, BuildResult};
use crate::ident::ensure_safe_name;
use crate::param::ParamList;
use crate::qb::push_where;
use crate::qb::traits::{BuiltQuery, Memo, SqlQb, StatementKind};
use crate::tree::Where;
use crate::value::{Row, Value};

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    /// SET assignments
    data: Row,
    filter: Option<Where>,
    format: FormatConfig,
    memo: Memo,
}

impl UpdateQb {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Row::new(),
            filter: None,
            format: FormatConfig::default(),
            memo: Memo::default(),
        }
    }

    // ==================== SET ====================

    /// Add `column = ?`. `None` binds NULL.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.memo.reset();
        self.data = self.data.set(column, value);
        self
    }

    /// Add `column = ?` only when a value is present.
    pub fn set_opt<T: Into<Value>>(mut self, column: &str, value: Option<T>) -> Self {
        self.memo.reset();
        self.data = self.data.set_opt(column, value);
        self
    }

    /// Replace all SET assignments.
    pub fn set_row(mut self, row: Row) -> Self {
        self.memo.reset();
        self.data = row;
        self
    }

    // ==================== WHERE ====================

    /// Set the WHERE tree, replacing any previous one.
    pub fn filter(mut self, tree: Where) -> Self {
        self.memo.reset();
        self.filter = Some(tree);
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: FormatConfig) -> Self {
        self.memo.reset();
        self.format = format;
        self
    }
}

impl SqlQb for UpdateQb {
    const KIND: StatementKind = StatementKind::Update;

    fn build_query(&self) -> BuildResult<BuiltQuery> {
        ensure_safe_name("UPDATE", &self.table)?;
        if self.data.is_empty() {
            return Err(BuildError::missing_data("UPDATE needs at least one SET column"));
        }

        let mut params = ParamList::new();
        let mut sql = format!("UPDATE {}\nSET ", self.table);
        for (i, (column, value)) in self.data.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(" = ");
            params.bind(value, &self.format, &mut sql);
        }

        // WHERE numbering continues after the SET values.
        push_where(&mut sql, &mut params, self.filter.as_ref(), &self.format)?;

        Ok(BuiltQuery::new(sql, params.into_values()))
    }

    fn built(&self) -> BuildResult<&BuiltQuery> {
        self.memo.get_or_build(Self::KIND, || self.build_query())
    }
}
