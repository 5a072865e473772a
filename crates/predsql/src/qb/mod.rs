//! Statement builders.
//!
//! Each builder collects clause state through consuming methods and turns it
//! into SQL plus bind values on first retrieval. WHERE clauses come from a
//! [`Where`] tree run through the compiler.
//!
//! # Usage
//!
//! ```ignore
//! use predsql::qb::{self, SqlQb};
//! use predsql::{Group, Row, Where};
//!
//! // SELECT
//! let q = qb::select(["id", "name"])
//!     .from("users")
//!     .filter(Where::new(Group::new().with("status", "active")))
//!     .order_by("id DESC")
//!     .limit(20);
//! let (sql, params) = q.pair()?;
//!
//! // INSERT
//! let q = qb::insert("users").row(Row::new().set("name", "alice"));
//!
//! // UPDATE
//! let q = qb::update("users")
//!     .set("status", "inactive")
//!     .filter(Where::new(Group::new().with("id", 7)));
//!
//! // DELETE
//! let q = qb::delete("users").filter(Where::new(Group::new().with("id", 7)));
//! ```

mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::{BuiltQuery, SqlQb, StatementKind};
pub use update::UpdateQb;

use crate::compile::compile_with;
use crate::config::FormatConfig;
use crate::error::BuildResult;
use crate::param::ParamList;
use crate::tree::Where;

/// Create a SELECT builder for the given column expressions.
///
/// Columns are spliced verbatim; an empty list selects `*`.
///
/// # Example
/// ```ignore
/// let q = predsql::qb::select(["id", "name"]).from("users");
/// ```
pub fn select<I, S>(columns: I) -> SelectQb
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectQb::new().columns(columns)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
///
/// # Example
/// ```ignore
/// let q = predsql::qb::update("fruits").set("color", "red");
/// ```
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
///
/// Without a filter the statement deletes every row.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// Append `\nWHERE ...` for `filter`, continuing the numbering of `params`.
///
/// Missing trees, zero-node trees and trees whose groups are all empty leave
/// the statement untouched.
pub(crate) fn push_where(
    sql: &mut String,
    params: &mut ParamList,
    filter: Option<&Where>,
    format: &FormatConfig,
) -> BuildResult<()> {
    let Some(tree) = filter.filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    let fragment = compile_with(tree, format, params.next_offset())?;
    if !fragment.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&fragment.sql);
        params.extend(fragment.params);
    }
    Ok(())
}
