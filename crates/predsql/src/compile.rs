//! WHERE compiler.
//!
//! Walks a [`Where`] tree depth-first and emits SQL text with positional
//! placeholders plus the bind values in placeholder order.
//!
//! Rendering rules:
//!
//! - groups with more than one condition are parenthesized and ANDed,
//! - nested trees are wrapped in `(\n<indent>...\n<indent>)`, one indent
//!   level per depth,
//! - groups and nested trees that render nothing drop their connective,
//! - NULL inside equality / LIKE lists becomes an `IS [NOT] NULL` term,
//! - empty lists render an always-false condition (`1=0`, `1=2`, `0=2`).

use crate::config::FormatConfig;
use crate::error::{BuildError, BuildResult};
use crate::key::{ConditionKey, Operator};
use crate::param::ParamList;
use crate::tree::{Group, Node, Where, check_len, check_position};
use crate::value::{Operand, Value};

/// Compiled SQL fragment with its bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Fragment {
    /// True when the tree produced no condition at all.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Compile a tree with the default format (`?` placeholders, 4-space indent).
pub fn compile(tree: &Where) -> BuildResult<Fragment> {
    compile_with(tree, &FormatConfig::default(), 0)
}

/// Compile a tree.
///
/// `offset` is the number of parameters bound earlier in the enclosing
/// statement; numbered placeholders start at `offset + 1`.
pub fn compile_with(tree: &Where, cfg: &FormatConfig, offset: usize) -> BuildResult<Fragment> {
    let mut params = ParamList::with_offset(offset);
    let sql = compile_tree(tree, cfg, &mut params, 1)?;
    Ok(Fragment {
        sql,
        params: params.into_values(),
    })
}

fn check_shape(tree: &Where) -> BuildResult<()> {
    check_len(tree.len())?;
    for (index, node) in tree.nodes().iter().enumerate() {
        check_position(index, matches!(node, Node::Connective(_)))?;
    }
    Ok(())
}

fn compile_tree(
    tree: &Where,
    cfg: &FormatConfig,
    params: &mut ParamList,
    depth: usize,
) -> BuildResult<String> {
    check_shape(tree)?;

    let mut sql = String::new();
    for node in tree.nodes() {
        match node {
            Node::Connective(connective) => {
                // Nothing to join yet: the previous element rendered empty.
                if !sql.is_empty() {
                    sql.push(' ');
                    sql.push_str(connective.as_sql());
                    sql.push(' ');
                }
            }
            Node::Group(group) => {
                if !compile_group(group, cfg, params, &mut sql)? {
                    trim_connective(&mut sql);
                }
            }
            Node::Nested(sub) => {
                let mut inner_params = ParamList::with_offset(params.next_offset());
                let inner = compile_tree(sub, cfg, &mut inner_params, depth + 1)?;
                if inner.is_empty() {
                    trim_connective(&mut sql);
                    continue;
                }
                sql.push_str("(\n");
                cfg.push_indent(depth, &mut sql);
                sql.push_str(&inner);
                sql.push('\n');
                cfg.push_indent(depth - 1, &mut sql);
                sql.push(')');
                params.extend(inner_params.into_values());
            }
        }
    }
    Ok(sql)
}

/// Remove a dangling ` AND ` / ` OR ` left by a connective whose right-hand
/// side rendered nothing.
fn trim_connective(sql: &mut String) {
    for suffix in [" AND ", " OR "] {
        if sql.ends_with(suffix) {
            sql.truncate(sql.len() - suffix.len());
            return;
        }
    }
}

/// Render one group; returns `false` when every entry was absent.
fn compile_group(
    group: &Group,
    cfg: &FormatConfig,
    params: &mut ParamList,
    sql: &mut String,
) -> BuildResult<bool> {
    let entries: Vec<_> = group.present().collect();
    if entries.is_empty() {
        return Ok(false);
    }

    let wrap = entries.len() > 1;
    if wrap {
        sql.push('(');
    }
    for (i, (key, operand)) in entries.into_iter().enumerate() {
        if i > 0 {
            sql.push_str(" AND ");
        }
        let mut cond = Condition {
            key: ConditionKey::parse(key),
            cfg,
            params: &mut *params,
            sql: &mut *sql,
        };
        cond.render(operand)?;
    }
    if wrap {
        sql.push(')');
    }
    Ok(true)
}

struct Condition<'a, 'k> {
    key: ConditionKey<'k>,
    cfg: &'a FormatConfig,
    params: &'a mut ParamList,
    sql: &'a mut String,
}

impl Condition<'_, '_> {
    fn render(&mut self, operand: &Operand) -> BuildResult<()> {
        match self.key.op {
            Operator::Eq => self.equality(operand),
            Operator::Like => self.like(operand),
            Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte => self.compare(operand),
            Operator::Between => self.between(operand),
        }
    }

    fn column(&self) -> &str {
        self.key.column
    }

    fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    fn bind(&mut self, value: &Value) {
        self.params.bind(value, self.cfg, self.sql);
    }

    fn is_null_term(&mut self) {
        let column = self.key.column;
        self.push(column);
        self.push(if self.key.negated {
            " IS NOT NULL"
        } else {
            " IS NULL"
        });
    }

    fn equality(&mut self, operand: &Operand) -> BuildResult<()> {
        let negated = self.key.negated;
        match operand {
            Operand::Scalar(Value::Null) => self.is_null_term(),
            Operand::Scalar(value) => {
                let column = self.key.column;
                self.push(column);
                self.push(if negated { " != " } else { " = " });
                self.bind(value);
            }
            Operand::List(values) if values.is_empty() => self.push("1=0"),
            Operand::List(values) => {
                let (nulls, present) = split_nulls(values);
                if present.is_empty() {
                    self.is_null_term();
                    return Ok(());
                }
                if nulls {
                    self.push("(");
                    self.is_null_term();
                    self.push(if negated { " AND " } else { " OR " });
                }
                let column = self.key.column;
                self.push(column);
                self.push(if negated { " NOT IN (" } else { " IN (" });
                for (i, value) in present.into_iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.bind(value);
                }
                self.push(")");
                if nulls {
                    self.push(")");
                }
            }
            Operand::Absent => {}
        }
        Ok(())
    }

    fn like(&mut self, operand: &Operand) -> BuildResult<()> {
        let negated = self.key.negated;
        let op = if negated { " NOT LIKE " } else { " LIKE " };
        match operand {
            Operand::Scalar(Value::Null) => self.is_null_term(),
            Operand::Scalar(value) => {
                let column = self.key.column;
                self.push(column);
                self.push(op);
                self.bind(value);
            }
            Operand::List(values) if values.is_empty() => self.push("1=2"),
            Operand::List(values) => {
                let joiner = if negated { " AND " } else { " OR " };
                let (nulls, present) = split_nulls(values);
                self.push("(");
                for (i, value) in present.iter().enumerate() {
                    if i > 0 {
                        self.push(joiner);
                    }
                    let column = self.key.column;
                    self.push(column);
                    self.push(op);
                    self.bind(value);
                }
                if nulls {
                    if !present.is_empty() {
                        self.push(joiner);
                    }
                    self.is_null_term();
                }
                self.push(")");
            }
            Operand::Absent => {}
        }
        Ok(())
    }

    fn compare(&mut self, operand: &Operand) -> BuildResult<()> {
        let symbol = self.key.op.symbol();
        match operand {
            Operand::Scalar(Value::Null) => return Err(self.null_comparison()),
            Operand::Scalar(value) => {
                let column = self.key.column;
                self.push(column);
                self.push(" ");
                self.push(symbol);
                self.push(" ");
                self.bind(value);
            }
            Operand::List(values) => {
                if values.iter().any(Value::is_null) {
                    return Err(self.null_comparison());
                }
                if values.is_empty() {
                    self.push("0=2");
                    return Ok(());
                }
                self.push("(");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.push(" AND ");
                    }
                    let column = self.key.column;
                    self.push(column);
                    self.push(" ");
                    self.push(symbol);
                    self.push(" ");
                    self.bind(value);
                }
                self.push(")");
            }
            Operand::Absent => {}
        }
        Ok(())
    }

    fn between(&mut self, operand: &Operand) -> BuildResult<()> {
        let negated = self.key.negated;
        let bounds = match operand {
            Operand::List(values) if values.len() == 2 => values,
            Operand::Absent => return Ok(()),
            _ => {
                return Err(BuildError::OperatorArity {
                    column: self.column().to_string(),
                    op: if negated { "NOT BETWEEN" } else { "BETWEEN" },
                });
            }
        };
        if bounds.iter().any(Value::is_null) {
            return Err(self.null_comparison());
        }

        let column = self.key.column;
        let (low_op, joiner, high_op) = if negated {
            (" < ", " OR ", " > ")
        } else {
            (" >= ", " AND ", " <= ")
        };
        self.push("(");
        self.push(column);
        self.push(low_op);
        self.bind(&bounds[0]);
        self.push(joiner);
        self.push(column);
        self.push(high_op);
        self.bind(&bounds[1]);
        self.push(")");
        Ok(())
    }

    fn null_comparison(&self) -> BuildError {
        let op = match (self.key.op, self.key.negated) {
            (Operator::Lt, _) => "less than",
            (Operator::Lte, _) => "less than or equal to",
            (Operator::Gt, _) => "greater than",
            (Operator::Gte, _) => "greater than or equal to",
            (Operator::Between, false) => "between",
            (Operator::Between, true) => "not between",
            (Operator::Eq | Operator::Like, _) => "compared to",
        };
        BuildError::NullComparison {
            column: self.column().to_string(),
            op,
        }
    }
}

/// Returns whether any NULL was present, and the non-NULL values in order.
fn split_nulls(values: &[Value]) -> (bool, Vec<&Value>) {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    (present.len() != values.len(), present)
}
