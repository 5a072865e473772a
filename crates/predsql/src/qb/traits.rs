//! Trait definitions for statement builders.

use crate::error::BuildResult;
use crate::value::Value;
use std::sync::OnceLock;

/// Kind of statement a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// The result of building a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Split into `(sql, params)`.
    pub fn into_pair(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Base trait for all statement builders.
///
/// The first call to [`built`](SqlQb::built) (or any accessor built on it)
/// runs the build once and caches the outcome, failures included. Builder
/// methods consume `self` and clear the cache, so a retrieved result always
/// matches the builder it came from.
pub trait SqlQb {
    /// Which statement this builder produces.
    const KIND: StatementKind;

    /// Build the statement without touching the cache.
    fn build_query(&self) -> BuildResult<BuiltQuery>;

    /// Build once and return the cached result.
    fn built(&self) -> BuildResult<&BuiltQuery>;

    /// The SQL text.
    fn to_sql(&self) -> BuildResult<&str> {
        self.built().map(|q| q.sql.as_str())
    }

    /// Bind values in placeholder order.
    fn params(&self) -> BuildResult<&[Value]> {
        self.built().map(|q| q.params.as_slice())
    }

    /// SQL and parameters together, ready for a driver call.
    fn pair(&self) -> BuildResult<(&str, &[Value])> {
        self.built().map(|q| (q.sql.as_str(), q.params.as_slice()))
    }
}

/// Build-once cache shared by the statement builders.
#[derive(Debug, Clone, Default)]
pub(crate) struct Memo(OnceLock<BuildResult<BuiltQuery>>);

impl Memo {
    pub(crate) fn get_or_build(
        &self,
        kind: StatementKind,
        build: impl FnOnce() -> BuildResult<BuiltQuery>,
    ) -> BuildResult<&BuiltQuery> {
        self.0
            .get_or_init(|| {
                let result = build();
                trace_build(kind, &result);
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub(crate) fn reset(&mut self) {
        self.0.take();
    }
}

#[cfg(feature = "tracing")]
fn trace_build(kind: StatementKind, result: &BuildResult<BuiltQuery>) {
    match result {
        Ok(query) => tracing::debug!(
            target: "predsql.sql",
            kind = ?kind,
            param_count = query.params.len(),
            sql = %query.sql,
            "statement built"
        ),
        Err(error) => tracing::debug!(
            target: "predsql.sql",
            kind = ?kind,
            error = %error,
            "statement build failed"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
fn trace_build(_kind: StatementKind, _result: &BuildResult<BuiltQuery>) {}
