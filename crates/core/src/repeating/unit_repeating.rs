// Fixed-unit generator: contiguous, non-overlapping spans of exactly one
// unit ("every day", "every week").

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{truncate, Unit};
use crate::error::Result;
use crate::interval::Span;
use crate::repeating::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRepeating {
    pub unit: Unit,
}

impl UnitRepeating {
    pub fn new(unit: Unit) -> Self {
        Self { unit }
    }

    pub fn base(&self) -> Unit {
        self.unit
    }

    pub fn range(&self) -> Unit {
        self.unit
    }

    /// Ascending spans starting at the unit boundary containing `point`.
    /// The first span contains `point` (or starts exactly at it when
    /// `point` is already aligned).
    pub fn following(&self, point: NaiveDateTime) -> Result<UnitSpans> {
        Ok(UnitSpans {
            unit: self.unit,
            cursor: truncate(point, self.unit)?,
            direction: Direction::Forward,
        })
    }

    /// Descending spans ending at the unit boundary immediately at or after
    /// `point`.
    pub fn preceding(&self, point: NaiveDateTime) -> Result<UnitSpans> {
        let mut boundary = truncate(point, self.unit)?;
        if boundary < point {
            boundary = self.unit.add(boundary, 1)?;
        }
        Ok(UnitSpans {
            unit: self.unit,
            cursor: boundary,
            direction: Direction::Backward,
        })
    }
}

/// Cursor-stepping iterator: each emitted span's boundary becomes the next
/// span's boundary. Stops only at the edge of the representable timeline.
#[derive(Debug)]
pub struct UnitSpans {
    unit: Unit,
    cursor: NaiveDateTime,
    direction: Direction,
}

impl Iterator for UnitSpans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        match self.direction {
            Direction::Forward => {
                let start = self.cursor;
                let end = self.unit.add(start, 1).ok()?;
                self.cursor = end;
                Some(Span::new(start, end))
            }
            Direction::Backward => {
                let end = self.cursor;
                let start = self.unit.add(end, -1).ok()?;
                self.cursor = start;
                Some(Span::new(start, end))
            }
        }
    }
}
