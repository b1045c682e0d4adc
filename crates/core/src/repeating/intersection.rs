// Intersection combinator: occurrences of the finer members that are fully
// contained in simultaneous occurrences of every coarser member
// ("Wednesdays in April").

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{truncate, Unit};
use crate::error::{CoreError, Result};
use crate::interval::Span;
use crate::repeating::{Direction, RepeatingInterval};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawIntersection")]
pub struct Intersection {
    members: Vec<RepeatingInterval>,
}

/// Unvalidated mirror for deserialization; conversion goes through `new` so
/// decoded intersections honor the same arity check as constructed ones.
#[derive(Deserialize)]
struct RawIntersection {
    members: Vec<RepeatingInterval>,
}

impl TryFrom<RawIntersection> for Intersection {
    type Error = CoreError;

    fn try_from(raw: RawIntersection) -> Result<Self> {
        Intersection::new(raw.members)
    }
}

impl Intersection {
    pub fn new(members: Vec<RepeatingInterval>) -> Result<Self> {
        if members.len() < 2 {
            return Err(CoreError::unsupported(
                "an intersection needs at least two repeating intervals",
            ));
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[RepeatingInterval] {
        &self.members
    }

    pub fn base(&self) -> Unit {
        self.members
            .iter()
            .map(RepeatingInterval::base)
            .min()
            .unwrap_or(Unit::Second)
    }

    pub fn range(&self) -> Unit {
        self.members
            .iter()
            .map(RepeatingInterval::range)
            .max()
            .unwrap_or(Unit::Second)
    }

    pub fn following(&self, point: NaiveDateTime) -> Result<IntersectionSpans<'_>> {
        let range = self.range();
        Ok(IntersectionSpans {
            members: self.ordered_members(),
            range,
            cursor: truncate(point, range)?,
            point,
            direction: Direction::Forward,
            pending: VecDeque::new(),
        })
    }

    pub fn preceding(&self, point: NaiveDateTime) -> Result<IntersectionSpans<'_>> {
        let range = self.range();
        // The cursor tracks the exclusive end of the next window to scan.
        let cursor = range.add(truncate(point, range)?, 1)?;
        Ok(IntersectionSpans {
            members: self.ordered_members(),
            range,
            cursor,
            point,
            direction: Direction::Backward,
            pending: VecDeque::new(),
        })
    }

    /// Members ordered coarsest first by (range, base); the head anchors the
    /// window scan.
    fn ordered_members(&self) -> Vec<&RepeatingInterval> {
        let mut ordered: Vec<&RepeatingInterval> = self.members.iter().collect();
        ordered.sort_by(|a, b| (b.range(), b.base()).cmp(&(a.range(), a.base())));
        ordered
    }
}

/// Scans one combinator-range window at a time. Within a window, the anchor
/// member's occurrences are intersected progressively with every other
/// member's window-contained occurrences; the survivors of the last member
/// are emitted before the window advances.
pub struct IntersectionSpans<'a> {
    members: Vec<&'a RepeatingInterval>,
    range: Unit,
    cursor: NaiveDateTime,
    point: NaiveDateTime,
    direction: Direction,
    pending: VecDeque<Span>,
}

impl Iterator for IntersectionSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.pending.is_empty() {
            self.scan_window()?;
        }
        self.pending.pop_front()
    }
}

impl IntersectionSpans<'_> {
    fn scan_window(&mut self) -> Option<()> {
        let (window_start, window_end) = match self.direction {
            Direction::Forward => {
                let start = self.cursor;
                let end = self.range.add(start, 1).ok()?;
                self.cursor = end;
                (start, end)
            }
            Direction::Backward => {
                let end = self.cursor;
                let start = self.range.add(end, -1).ok()?;
                self.cursor = start;
                (start, end)
            }
        };

        let mut retained = self.member_occurrences(0, window_start, window_end)?;
        for index in 1..self.members.len() {
            if retained.is_empty() {
                break;
            }
            let occurrences = self.member_occurrences(index, window_start, window_end)?;
            retained = occurrences
                .into_iter()
                .filter(|candidate| retained.iter().any(|kept| kept.contains(candidate)))
                .collect();
        }

        if retained.is_empty() {
            debug!(%window_start, %window_end, "empty intersection window");
        }
        let point = self.point;
        let direction = self.direction;
        self.pending.extend(retained.into_iter().filter(|span| match direction {
            Direction::Forward => span.end > point,
            Direction::Backward => span.start <= point,
        }));
        Some(())
    }

    /// Occurrences of one member inside the window. The anchor (index 0) is
    /// only clipped by its start; every other member must fall entirely
    /// within the window.
    fn member_occurrences(
        &self,
        index: usize,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Option<Vec<Span>> {
        let member = self.members[index];
        let spans = match self.direction {
            Direction::Forward => member
                .following(window_start)
                .ok()?
                .take_while(|span| span.start < window_end)
                .filter(|span| {
                    index == 0 || (span.start >= window_start && span.end <= window_end)
                })
                .collect(),
            Direction::Backward => member
                .preceding(window_end)
                .ok()?
                .take_while(|span| span.end > window_start)
                .filter(|span| {
                    index == 0 || (span.start >= window_start && span.end <= window_end)
                })
                .collect(),
        };
        Some(spans)
    }
}
