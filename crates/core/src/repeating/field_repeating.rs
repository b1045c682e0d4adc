// Field-value generator: base-unit spans where a calendar field equals a
// target value ("the 3rd of the month", "April", "Wednesdays").

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{truncate, truncate_to_field, Field, Unit};
use crate::error::{CoreError, Result};
use crate::interval::Span;
use crate::repeating::Direction;

/// Occurrences recur once per `field.range()` cycle. A cycle where the
/// target value is calendrically impossible (day 31 in February) simply has
/// no occurrence; the sequence skips it rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldRepeating")]
pub struct FieldRepeating {
    field: Field,
    value: i64,
}

/// Unvalidated mirror for deserialization; conversion goes through `new` so
/// decoded values honor the same domain check as constructed ones.
#[derive(Deserialize)]
struct RawFieldRepeating {
    field: Field,
    value: i64,
}

impl TryFrom<RawFieldRepeating> for FieldRepeating {
    type Error = CoreError;

    fn try_from(raw: RawFieldRepeating) -> Result<Self> {
        FieldRepeating::new(raw.field, raw.value)
    }
}

impl FieldRepeating {
    /// Rejects values outside the field's static domain up front, so the
    /// skip loop below only ever skips date-dependent impossibilities and
    /// always terminates.
    pub fn new(field: Field, value: i64) -> Result<Self> {
        if !field.value_domain().contains(&value) {
            return Err(CoreError::unsupported(format!(
                "{field} never takes the value {value}"
            )));
        }
        Ok(Self { field, value })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn base(&self) -> Unit {
        self.field.base()
    }

    pub fn range(&self) -> Unit {
        self.field.range()
    }

    pub fn following(&self, point: NaiveDateTime) -> Result<FieldSpans> {
        self.spans(point, Direction::Forward)
    }

    pub fn preceding(&self, point: NaiveDateTime) -> Result<FieldSpans> {
        self.spans(point, Direction::Backward)
    }

    fn spans(&self, point: NaiveDateTime, direction: Direction) -> Result<FieldSpans> {
        Ok(FieldSpans {
            field: self.field,
            value: self.value,
            anchor: truncate_to_field(point, self.field)?,
            point,
            direction,
        })
    }
}

/// Steps one range cycle at a time from the cycle containing the reference
/// point, re-applying the target field value each cycle and skipping cycles
/// where the assignment is invalid.
#[derive(Debug)]
pub struct FieldSpans {
    field: Field,
    value: i64,
    anchor: NaiveDateTime,
    point: NaiveDateTime,
    direction: Direction,
}

impl Iterator for FieldSpans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            let anchor = self.anchor;
            self.anchor = self.field.range().add(anchor, self.direction.step()).ok()?;

            let candidate = match self.field.set(anchor, self.value) {
                Ok(candidate) => candidate,
                Err(error) => {
                    debug!(%anchor, %error, "no occurrence this cycle");
                    continue;
                }
            };
            let start = truncate(candidate, self.field.base()).ok()?;
            let end = self.field.base().add(start, 1).ok()?;
            let span = Span::new(start, end);

            let bounds_point = match self.direction {
                Direction::Forward => span.end > self.point,
                Direction::Backward => span.start <= self.point,
            };
            if bounds_point {
                return Some(span);
            }
        }
    }
}
