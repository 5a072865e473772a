//! Predicate tree data model.
//!
//! A [`Where`] is an odd-length sequence alternating between predicate
//! groups (or nested trees) and connectives:
//!
//! ```text
//! [ group, AND|OR, group, AND|OR, [[ nested tree ]], ... ]
//! ```
//!
//! The builders on [`Where`] always produce a well-formed sequence.
//! [`Where::from_nodes`] accepts any sequence; its shape is checked when the
//! tree is compiled. [`Where::from_json`] checks length and positions before
//! reading any element, so a malformed literal is a shape error even when it
//! also holds a misspelled connective.
//!
//! # Example
//! ```ignore
//! use predsql::{Group, Where};
//!
//! let tree = Where::new(Group::new().with("a", 1).with("b", 2))
//!     .or_nested(Where::new(Group::new().with("title", "x")));
//!
//! // same tree, literal form
//! let tree = Where::from_json(&serde_json::json!(
//!     [{"a": 1, "b": 2}, "or", [[{"title": "x"}]]]
//! ))?;
//! ```

use crate::error::{BuildError, BuildResult};
use crate::value::Operand;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Logical connective joining two adjacent groups at the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    /// Uppercase SQL keyword.
    pub fn as_sql(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Only the four spellings `AND`, `and`, `OR`, `or` are recognized.
impl FromStr for Connective {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" | "and" => Ok(Connective::And),
            "OR" | "or" => Ok(Connective::Or),
            other => Err(BuildError::Connective(other.to_string())),
        }
    }
}

/// A set of conditions ANDed together.
///
/// Keys are condition keys (`col`, `!col`, `%col`, `<col`, `<>col`, ...),
/// unique within the group. Iteration order is insertion order and decides
/// both SQL order and parameter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, Operand)>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. Re-using a key replaces its operand in place.
    pub fn with(mut self, key: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.insert(key.into(), operand.into());
        self
    }

    /// Add a condition if value is Some; `None` records an absent operand.
    pub fn with_opt<T: Into<Operand>>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self.with(key, Operand::Absent),
        }
    }

    fn insert(&mut self, key: String, operand: Operand) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = operand;
        } else {
            self.entries.push((key, operand));
        }
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose operand is not [`Operand::Absent`], in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.entries
            .iter()
            .filter(|(_, op)| !op.is_absent())
            .map(|(k, op)| (k.as_str(), op))
    }

    fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> BuildResult<Self> {
        let mut group = Group::new();
        for (key, json) in map {
            let operand =
                Operand::from_json(json).map_err(|reason| BuildError::invalid_value(key, reason))?;
            group.insert(key.clone(), operand);
        }
        Ok(group)
    }
}

impl<K: Into<String>, V: Into<Operand>> FromIterator<(K, V)> for Group {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = Group::new();
        for (k, v) in iter {
            group.insert(k.into(), v.into());
        }
        group
    }
}

/// One element of a predicate tree sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Connective(Connective),
    /// A parenthesized sub-tree.
    Nested(Where),
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Connective> for Node {
    fn from(connective: Connective) -> Self {
        Node::Connective(connective)
    }
}

impl From<Where> for Node {
    fn from(tree: Where) -> Self {
        Node::Nested(tree)
    }
}

/// A predicate tree: the WHERE clause description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Where {
    nodes: Vec<Node>,
}

impl Where {
    /// Start a tree with a single group.
    pub fn new(group: Group) -> Self {
        Self {
            nodes: vec![Node::Group(group)],
        }
    }

    /// Start a tree whose first element is a parenthesized sub-tree.
    pub fn nested(tree: Where) -> Self {
        Self {
            nodes: vec![Node::Nested(tree)],
        }
    }

    /// Wrap a raw node sequence without checking its shape.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Append `AND group`.
    pub fn and(self, group: Group) -> Self {
        self.push(Connective::And, Node::Group(group))
    }

    /// Append `OR group`.
    pub fn or(self, group: Group) -> Self {
        self.push(Connective::Or, Node::Group(group))
    }

    /// Append `AND ( tree )`.
    pub fn and_nested(self, tree: Where) -> Self {
        self.push(Connective::And, Node::Nested(tree))
    }

    /// Append `OR ( tree )`.
    pub fn or_nested(self, tree: Where) -> Self {
        self.push(Connective::Or, Node::Nested(tree))
    }

    fn push(mut self, connective: Connective, node: Node) -> Self {
        if !self.nodes.is_empty() {
            self.nodes.push(Node::Connective(connective));
        }
        self.nodes.push(node);
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Convert the literal JSON notation into a tree.
    ///
    /// - arrays are sequences,
    /// - strings are connectives,
    /// - objects are groups (key order preserved),
    /// - a one-element array holding an array is a nested sub-tree.
    pub fn from_json(json: &serde_json::Value) -> BuildResult<Self> {
        let serde_json::Value::Array(items) = json else {
            return Err(BuildError::shape("WHERE should be an array"));
        };

        check_len(items.len())?;

        let nodes = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                check_position(index, item.is_string())?;
                Node::from_json(index, item)
            })
            .collect::<BuildResult<Vec<_>>>()?;

        Ok(Self { nodes })
    }
}

/// A tree alternates operands and connectives, so it has an odd length.
pub(crate) fn check_len(len: usize) -> BuildResult<()> {
    if len % 2 == 0 {
        return Err(BuildError::shape(
            "WHERE should be an array with odd items count",
        ));
    }
    Ok(())
}

/// Odd indexes hold connectives, even indexes hold groups or nested trees.
pub(crate) fn check_position(index: usize, is_connective: bool) -> BuildResult<()> {
    match (index % 2 == 1, is_connective) {
        (true, false) => Err(BuildError::shape(format!(
            "element at index {index} should be and/or"
        ))),
        (false, true) => Err(BuildError::shape(format!(
            "element at index {index} should not be and/or"
        ))),
        _ => Ok(()),
    }
}

impl Node {
    fn from_json(index: usize, item: &serde_json::Value) -> BuildResult<Self> {
        match item {
            serde_json::Value::String(s) => s.parse::<Connective>().map(Node::Connective),
            serde_json::Value::Object(map) => Group::from_json(map).map(Node::Group),
            serde_json::Value::Array(wrapper) => match wrapper.as_slice() {
                [inner] => Where::from_json(inner).map(Node::Nested),
                _ => Err(BuildError::shape(format!(
                    "element at index {index} should wrap exactly one nested WHERE, got {} items",
                    wrapper.len()
                ))),
            },
            other => Err(BuildError::shape(format!(
                "element at index {index} should be a group, a nested WHERE or and/or, got {other}"
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for Where {
    type Error = BuildError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Where::from_json(&json)
    }
}

impl From<Group> for Where {
    fn from(group: Group) -> Self {
        Where::new(group)
    }
}
