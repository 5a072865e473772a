//! DELETE statement builder.

use crate::config::FormatConfig;
use crate::error::BuildResult;
use crate::ident::ensure_safe_name;
use crate::param::ParamList;
use crate::qb::push_where;
use crate::qb::traits::{BuiltQuery, Memo, SqlQb, StatementKind};
use crate::tree::Where;

/// DELETE statement builder.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    filter: Option<Where>,
    format: FormatConfig,
    memo: Memo,
}

impl DeleteQb {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filter: None,
            format: FormatConfig::default(),
            memo: Memo::default(),
        }
    }

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

impl SqlQb for DeleteQb {
    const KIND: StatementKind = StatementKind::Delete;

    fn build_query(&self) -> BuildResult<BuiltQuery> {
        ensure_safe_name("DELETE FROM", &self.table)?;

        let mut params = ParamList::new();
        let mut sql = format!("DELETE FROM {}", self.table);
        push_where(&mut sql, &mut params, self.filter.as_ref(), &self.format)?;

        Ok(BuiltQuery::new(sql, params.into_values()))
    }

    fn built(&self) -> BuildResult<&BuiltQuery> {
        self.memo.get_or_build(Self::KIND, || self.build_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::tree::Group;
    use crate::value::Value;

    #[test]
    fn test_delete_without_where() {
        let qb = DeleteQb::new("fruits");
        assert_eq!(qb.to_sql().unwrap(), "DELETE FROM fruits");
        assert!(qb.params().unwrap().is_empty());
    }

    #[test]
    fn test_delete_with_where() {
        let qb = DeleteQb::new("fruits").filter(Where::new(Group::new().with("id", 5)));
        assert_eq!(qb.to_sql().unwrap(), "DELETE FROM fruits\nWHERE id = ?");
        assert_eq!(qb.params().unwrap(), &[Value::Int(5)]);
    }

    #[test]
    fn test_delete_skips_empty_where() {
        let qb = DeleteQb::new("fruits").filter(Where::new(Group::new()));
        assert_eq!(qb.to_sql().unwrap(), "DELETE FROM fruits");

        let qb = DeleteQb::new("fruits").filter(Where::default());
        assert_eq!(qb.to_sql().unwrap(), "DELETE FROM fruits");
    }

    #[test]
    fn test_delete_rejects_unsafe_table() {
        let qb = DeleteQb::new("fruits; DROP TABLE x");
        assert!(matches!(
            qb.to_sql(),
            Err(BuildError::Identifier { what: "DELETE FROM", .. })
        ));
    }
}
