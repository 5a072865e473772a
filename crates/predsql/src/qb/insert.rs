//! INSERT statement builder.

use crate::config::FormatConfig;
use crate::error::{BuildError, BuildResult};
use crate::ident::ensure_safe_name;
use crate::param::ParamList;
use crate::qb::traits::{BuiltQuery, Memo, SqlQb, StatementKind};
use crate::value::{Row, Value};

/// INSERT statement builder.
///
/// Rows come either from [`Row`] values (`row` / `data`) or from a column
/// list plus positional value rows (`columns` / `values`). Every row must
/// carry the same columns in the same order.
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    /// Column names per row; `columns()` stores a single shared entry
    columns: Vec<Vec<String>>,
    values: Vec<Vec<Value>>,
    format: FormatConfig,
    memo: Memo,
}

impl InsertQb {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
            format: FormatConfig::default(),
            memo: Memo::default(),
        }
    }

    /// Append one row.
    pub fn row(mut self, row: Row) -> Self {
        self.memo.reset();
        self.columns.push(row.columns().map(str::to_string).collect());
        self.values.push(row.values().cloned().collect());
        self
    }

    /// Replace all rows.
    pub fn data(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.columns.clear();
        self.values.clear();
        for row in rows {
            self = self.row(row);
        }
        self.memo.reset();
        self
    }

    /// Set the column list for positional `values` rows.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.memo.reset();
        self.columns = vec![columns.into_iter().map(Into::into).collect()];
        self
    }

    /// Replace the value rows, each matching the column list positionally.
    pub fn values<R, V>(mut self, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.memo.reset();
        self.values = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: FormatConfig) -> Self {
        self.memo.reset();
        self.format = format;
        self
    }

    fn check_shape(&self) -> BuildResult<&[String]> {
        if self.columns.is_empty() && self.values.is_empty() {
            return Err(BuildError::missing_data("nothing to insert"));
        }
        let Some(keys) = self.columns.first() else {
            return Err(BuildError::missing_data("no columns given"));
        };
        if let Some((index, other)) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, cols)| *cols != keys)
        {
            return Err(BuildError::shape_mismatch(format!(
                "row {index} has columns ({}), expected ({})",
                other.join(", "),
                keys.join(", ")
            )));
        }
        if keys.is_empty() {
            return Err(BuildError::missing_data("rows have no columns"));
        }
        if self.values.is_empty() {
            return Err(BuildError::missing_data("no values given"));
        }
        if let Some((index, row)) = self
            .values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != keys.len())
        {
            return Err(BuildError::shape_mismatch(format!(
                "value row {index} has {} values for {} columns",
                row.len(),
                keys.len()
            )));
        }
        Ok(keys.as_slice())
    }
}

impl SqlQb for InsertQb {
    const KIND: StatementKind = StatementKind::Insert;

    fn build_query(&self) -> BuildResult<BuiltQuery> {
        ensure_safe_name("INSERT INTO", &self.table)?;
        let keys = self.check_shape()?;

        let mut params = ParamList::new();
        let mut sql = format!("INSERT INTO {}\n({})\nVALUES\n", self.table, keys.join(", "));
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                sql.push_str(",\n");
            }
            sql.push('(');
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                params.bind(value, &self.format, &mut sql);
            }
            sql.push(')');
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

    fn fruit(color: &str, name: &str) -> Row {
        Row::new().set("color", color).set("name", name)
    }

    #[test]
    fn test_insert_single_row() {
        let qb = InsertQb::new("fruits").row(fruit("red", "apple"));
        assert_eq!(
            qb.to_sql().unwrap(),
            "INSERT INTO fruits\n(color, name)\nVALUES\n(?, ?)"
        );
        assert_eq!(
            qb.params().unwrap(),
            &[Value::from("red"), Value::from("apple")]
        );
    }

    #[test]
    fn test_insert_data_replaces_rows() {
        let qb = InsertQb::new("fruits")
            .row(fruit("blue", "plum"))
            .data([fruit("red", "apple"), fruit("green", "mango")]);
        assert_eq!(
            qb.to_sql().unwrap(),
            "INSERT INTO fruits\n(color, name)\nVALUES\n(?, ?),\n(?, ?)"
        );
        assert_eq!(qb.params().unwrap().len(), 4);
    }

    #[test]
    fn test_insert_columns_and_values() {
        let qb = InsertQb::new("fruits")
            .columns(["color", "name"])
            .values([["red", "apple"], ["green", "mango"]]);
        assert_eq!(
            qb.to_sql().unwrap(),
            "INSERT INTO fruits\n(color, name)\nVALUES\n(?, ?),\n(?, ?)"
        );
    }

    #[test]
    fn test_insert_null_values() {
        let qb = InsertQb::new("fruits")
            .columns(["color"])
            .values([vec![None::<&str>]]);
        assert_eq!(qb.params().unwrap(), &[Value::Null]);
    }

    #[test]
    fn test_insert_errors() {
        let missing = |qb: InsertQb| {
            let result = qb.to_sql();
            matches!(result, Err(BuildError::MissingData(_)))
        };
        let mismatch = |qb: InsertQb| {
            let result = qb.to_sql();
            matches!(result, Err(BuildError::ShapeMismatch(_)))
        };

        assert!(missing(InsertQb::new("fruits")));
        assert!(missing(InsertQb::new("fruits").data(Vec::new())));
        assert!(missing(InsertQb::new("fruits").row(Row::new())));
        assert!(missing(InsertQb::new("fruits").columns(["color"])));
        assert!(missing(
            InsertQb::new("fruits").values([[Value::from("red")]])
        ));
        assert!(mismatch(InsertQb::new("fruits").data([
            Row::new().set("color", "red"),
            Row::new().set("name", "mango"),
        ])));
        assert!(mismatch(
            InsertQb::new("fruits")
                .columns(["color", "name"])
                .values([vec!["red"]])
        ));
    }

    #[test]
    fn test_insert_dollar_numbering() {
        let qb = InsertQb::new("fruits")
            .data([fruit("red", "apple"), fruit("green", "mango")])
            .format(FormatConfig::new().with_placeholder(Placeholder::Dollar));
        assert_eq!(
            qb.to_sql().unwrap(),
            "INSERT INTO fruits\n(color, name)\nVALUES\n($1, $2),\n($3, $4)"
        );
    }
}
