// Repeating intervals: generators of conceptually infinite, direction-aware
// sequences of same-shaped occurrences, plus the Union and Intersection
// combinators over them.

pub mod field_repeating;
pub mod intersection;
pub mod union;
pub mod unit_repeating;

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::Unit;
use crate::error::Result;
use crate::interval::Span;
use crate::model::TimeExpression;

pub use field_repeating::FieldRepeating;
pub use intersection::Intersection;
pub use union::Union;
pub use unit_repeating::UnitRepeating;

/// A pull-based lazy sequence of occurrences. Infinite by design (it ends
/// only at the edge of the representable timeline); the consumer applies its
/// own termination condition. Restartable only by asking the generator for a
/// fresh sequence.
pub type SpanIter<'a> = Box<dyn Iterator<Item = Span> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A generator of a conceptually infinite set of same-shaped intervals.
///
/// `base()` is the granularity of one occurrence, `range()` the spacing
/// between successive occurrence starts; base never exceeds range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatingInterval {
    Unit(UnitRepeating),
    Field(FieldRepeating),
    Union(Union),
    Intersection(Intersection),
}

impl RepeatingInterval {
    pub fn base(&self) -> Unit {
        match self {
            RepeatingInterval::Unit(unit) => unit.base(),
            RepeatingInterval::Field(field) => field.base(),
            RepeatingInterval::Union(union) => union.base(),
            RepeatingInterval::Intersection(intersection) => intersection.base(),
        }
    }

    pub fn range(&self) -> Unit {
        match self {
            RepeatingInterval::Unit(unit) => unit.range(),
            RepeatingInterval::Field(field) => field.range(),
            RepeatingInterval::Union(union) => union.range(),
            RepeatingInterval::Intersection(intersection) => intersection.range(),
        }
    }

    /// The strictly ascending (by start) sequence of occurrences, none of
    /// which end at or before `point`.
    pub fn following(&self, point: NaiveDateTime) -> Result<SpanIter<'_>> {
        match self {
            RepeatingInterval::Unit(unit) => Ok(Box::new(unit.following(point)?)),
            RepeatingInterval::Field(field) => Ok(Box::new(field.following(point)?)),
            RepeatingInterval::Union(union) => Ok(Box::new(union.following(point)?)),
            RepeatingInterval::Intersection(intersection) => {
                Ok(Box::new(intersection.following(point)?))
            }
        }
    }

    /// The strictly descending (by end) sequence of occurrences, none of
    /// which start after `point`'s truncation boundary.
    pub fn preceding(&self, point: NaiveDateTime) -> Result<SpanIter<'_>> {
        match self {
            RepeatingInterval::Unit(unit) => Ok(Box::new(unit.preceding(point)?)),
            RepeatingInterval::Field(field) => Ok(Box::new(field.preceding(point)?)),
            RepeatingInterval::Union(union) => Ok(Box::new(union.preceding(point)?)),
            RepeatingInterval::Intersection(intersection) => {
                Ok(Box::new(intersection.preceding(point)?))
            }
        }
    }
}

impl TimeExpression for RepeatingInterval {
    fn is_defined(&self) -> bool {
        match self {
            RepeatingInterval::Unit(_) | RepeatingInterval::Field(_) => true,
            RepeatingInterval::Union(union) => {
                union.members().iter().all(TimeExpression::is_defined)
            }
            RepeatingInterval::Intersection(intersection) => {
                intersection.members().iter().all(TimeExpression::is_defined)
            }
        }
    }
}

/// Merge order for `following`: primary key is the start time (earliest
/// first); a shared start is broken by preferring the longer occurrence, so
/// a coarser occurrence covering the same boundary surfaces first.
pub(crate) fn earliest_start_longest(a: &Span, b: &Span) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.duration().cmp(&a.duration()))
}

/// Merge order for `preceding`: primary key is the end time (latest first),
/// same longer-first tie-break.
pub(crate) fn latest_end_longest(a: &Span, b: &Span) -> Ordering {
    b.end
        .cmp(&a.end)
        .then_with(|| b.duration().cmp(&a.duration()))
}
