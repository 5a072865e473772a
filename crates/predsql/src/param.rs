//! Positional parameter accumulation.

use crate::config::FormatConfig;
use crate::value::Value;

/// An ordered list of bind values being collected for one SQL fragment.
///
/// `offset` is the number of parameters already bound before this fragment,
/// so `$n` placeholders keep counting across clauses.
#[derive(Clone, Debug, Default)]
pub(crate) struct ParamList {
    offset: usize,
    values: Vec<Value>,
}

impl ParamList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_offset(offset: usize) -> Self {
        Self {
            offset,
            values: Vec::new(),
        }
    }

    /// Add a value and return its 1-based index in the whole statement.
    pub(crate) fn push(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.offset + self.values.len()
    }

    /// Add a value and write its placeholder into `sql`.
    pub(crate) fn bind(&mut self, value: &Value, cfg: &FormatConfig, sql: &mut String) {
        let index = self.push(value.clone());
        cfg.placeholder.render(index, sql);
    }

    /// Index the next pushed value will get, minus one.
    pub(crate) fn next_offset(&self) -> usize {
        self.offset + self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values.extend(values);
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}
