//! # predsql
//!
//! Compile nested predicate trees into parameterized SQL.
//!
//! ## Features
//!
//! - **Values never touch the SQL text**: every value becomes a positional
//!   placeholder (`?` or `$n`) plus an entry in the parameter list
//! - **Prefix operators**: `col`, `!col`, `%col`, `<col`, `<=col`, `>col`,
//!   `>=col`, `<>col` and their negations select the comparison
//! - **NULL-aware lists**: `NULL` inside an IN / LIKE list becomes an
//!   `IS [NOT] NULL` term instead of a bound value
//! - **Transparent empty groups**: groups whose values are all absent vanish
//!   together with their connective
//! - **Statement builders**: SELECT / INSERT / UPDATE / DELETE with a
//!   build-once cache
//!
//! ## WHERE compiler
//!
//! ```ignore
//! use predsql::{compile, Group, Where};
//!
//! let tree = Where::new(Group::new().with("a", 1).with("b", 2))
//!     .or_nested(Where::new(Group::new().with("title", "x")));
//!
//! let fragment = compile(&tree)?;
//! assert_eq!(fragment.sql, "(a = ? AND b = ?) OR (\n    title = ?\n)");
//! ```
//!
//! ## Statement builders (qb)
//!
//! ```ignore
//! use predsql::qb::{self, SqlQb};
//!
//! let q = qb::select(["id", "name"])
//!     .from("users")
//!     .filter(Where::from_json(&serde_json::json!([{"!status": "banned"}]))?)
//!     .limit(10);
//! let (sql, params) = q.pair()?;
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod ident;
pub mod key;
mod param;
pub mod prelude;
pub mod qb;
pub mod tree;
pub mod value;

pub use compile::{Fragment, compile, compile_with};
pub use config::{FormatConfig, Placeholder};
pub use error::{BuildError, BuildResult};
pub use ident::{ensure_safe_name, is_safe_name};
pub use key::{ConditionKey, Operator};
pub use tree::{Connective, Group, Node, Where};
pub use value::{Operand, Row, Value};

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, DeleteQb, InsertQb, SelectQb, SqlQb, StatementKind, UpdateQb, delete, insert,
    select, update,
};
