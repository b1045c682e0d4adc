use serde::{Deserialize, Serialize};

use crate::model::TimeExpression;

/// A qualitative tag carried alongside a period or point.
///
/// Modifiers are descriptive metadata only: the algebra stores them and hands
/// them back, it never interprets them. `Fiscal` in particular is tagged but
/// not resolved to any fiscal-year convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Exact,
    Approx,
    LessThan,
    MoreThan,
    Start,
    Mid,
    End,
    Fiscal,
}

impl TimeExpression for Modifier {
    // A modifier is never itself a computable timeline value.
    fn is_defined(&self) -> bool {
        false
    }
}
