//! Convenient imports for typical `predsql` usage.
//!
//! ```ignore
//! use predsql::prelude::*;
//! ```

pub use crate::qb::{SqlQb, delete, insert, select, update};
pub use crate::{BuildError, BuildResult, Group, Row, Value, Where, compile};
