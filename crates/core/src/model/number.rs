use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::TimeExpression;

/// A scalar count attached to a period.
///
/// Only `Int` participates in calendar arithmetic; `Fraction` and `Vague`
/// fail as unsupported when arithmetic reaches them. `Vague` carries the
/// unresolved surface text and is never defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Number {
    Int(i64),
    Fraction {
        whole: i64,
        numerator: i64,
        denominator: i64,
    },
    Vague(String),
}

impl Number {
    /// The integer value, if this number supports arithmetic.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Number::Int(value) => Ok(*value),
            Number::Fraction { .. } => {
                Err(CoreError::unsupported("arithmetic on a fractional count"))
            }
            Number::Vague(text) => Err(CoreError::unsupported(format!(
                "arithmetic on the vague count {text:?}"
            ))),
        }
    }

    /// Sum of two counts; defined for integer counts only.
    pub fn checked_add(&self, other: &Number) -> Result<Number> {
        let sum = self
            .as_int()?
            .checked_add(other.as_int()?)
            .ok_or_else(|| CoreError::out_of_range("count addition overflow"))?;
        Ok(Number::Int(sum))
    }
}

impl TimeExpression for Number {
    fn is_defined(&self) -> bool {
        !matches!(self, Number::Vague(_))
    }
}
