//! Condition key parsing.
//!
//! A condition key is a column name preceded by an optional operator prefix.
//! Negated comparisons are folded into their complement here, so the only
//! keys that stay negated are `!col`, `!%col` and `!<>col`.

/// Comparison family selected by a key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `col` / `!col`
    Eq,
    /// `%col` / `!%col`
    Like,
    /// `<col`
    Lt,
    /// `<=col`
    Lte,
    /// `>col`
    Gt,
    /// `>=col`
    Gte,
    /// `<>col` / `!<>col`
    Between,
}

impl Operator {
    /// SQL symbol for the four ordering comparisons.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Eq => "=",
            Operator::Like => "LIKE",
            Operator::Between => "BETWEEN",
        }
    }
}

/// Prefix table, longest match first within each leading character.
const PREFIXES: &[(&str, Operator, bool)] = &[
    ("!<=", Operator::Gt, false),
    ("!<>", Operator::Between, true),
    ("!<", Operator::Gte, false),
    ("!>=", Operator::Lt, false),
    ("!>", Operator::Lte, false),
    ("!%", Operator::Like, true),
    ("!", Operator::Eq, true),
    ("%", Operator::Like, false),
    ("<>", Operator::Between, false),
    ("<=", Operator::Lte, false),
    ("<", Operator::Lt, false),
    (">=", Operator::Gte, false),
    (">", Operator::Gt, false),
];

/// A parsed condition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionKey<'a> {
    pub column: &'a str,
    pub op: Operator,
    pub negated: bool,
}

impl<'a> ConditionKey<'a> {
    /// Split `key` into column, operator and negation.
    ///
    /// Only one prefix is consumed; whatever follows is the column name as
    /// written.
    pub fn parse(key: &'a str) -> Self {
        for &(prefix, op, negated) in PREFIXES {
            if let Some(column) = key.strip_prefix(prefix) {
                return Self { column, op, negated };
            }
        }
        Self {
            column: key,
            op: Operator::Eq,
            negated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(key: &str) -> (&str, Operator, bool) {
        let k = ConditionKey::parse(key);
        (k.column, k.op, k.negated)
    }

    #[test]
    fn plain_prefixes() {
        assert_eq!(parse("id"), ("id", Operator::Eq, false));
        assert_eq!(parse("%name"), ("name", Operator::Like, false));
        assert_eq!(parse("<a"), ("a", Operator::Lt, false));
        assert_eq!(parse("<=a"), ("a", Operator::Lte, false));
        assert_eq!(parse(">a"), ("a", Operator::Gt, false));
        assert_eq!(parse(">=a"), ("a", Operator::Gte, false));
        assert_eq!(parse("<>a"), ("a", Operator::Between, false));
    }

    #[test]
    fn negations_fold_into_complements() {
        assert_eq!(parse("!<=a"), ("a", Operator::Gt, false));
        assert_eq!(parse("!<a"), ("a", Operator::Gte, false));
        assert_eq!(parse("!>=a"), ("a", Operator::Lt, false));
        assert_eq!(parse("!>a"), ("a", Operator::Lte, false));
    }

    #[test]
    fn true_negations() {
        assert_eq!(parse("!a"), ("a", Operator::Eq, true));
        assert_eq!(parse("!%a"), ("a", Operator::Like, true));
        assert_eq!(parse("!<>a"), ("a", Operator::Between, true));
    }

    #[test]
    fn only_one_prefix_is_consumed() {
        assert_eq!(parse("!!a"), ("!a", Operator::Eq, true));
        assert_eq!(parse("%<a"), ("<a", Operator::Like, false));
    }
}
