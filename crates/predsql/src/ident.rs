//! Table and option name validation.
//!
//! Names are spliced into SQL verbatim, so anything outside `[A-Za-z0-9_]`
//! is rejected. No quoting or escaping is performed.

use crate::error::{BuildError, BuildResult};
use std::sync::OnceLock;

/// Returns `true` if `name` only contains ASCII letters, digits and `_`.
///
/// The empty string is considered safe; callers that need a non-empty name
/// check that separately.
pub fn is_safe_name(name: &str) -> bool {
    static UNSAFE_RE: OnceLock<regex::Regex> = OnceLock::new();
    !UNSAFE_RE
        .get_or_init(|| regex::Regex::new(r"[^A-Za-z0-9_]").expect("invalid built-in name regex"))
        .is_match(name)
}

/// Fail with [`BuildError::Identifier`] unless `name` is safe.
///
/// `what` names the slot being filled (e.g. `"FROM"`, `"OPTION name"`).
pub fn ensure_safe_name(what: &'static str, name: &str) -> BuildResult<()> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(BuildError::Identifier {
            what,
            name: name.to_string(),
        })
    }
}
