// Union combinator: merges member sequences into one ordered sequence,
// advancing exactly one member per emitted occurrence.

use std::cmp::Ordering;
use std::iter::Peekable;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::Unit;
use crate::error::{CoreError, Result};
use crate::interval::Span;
use crate::repeating::{
    earliest_start_longest, latest_end_longest, Direction, RepeatingInterval, SpanIter,
};

/// Any occurrence of any member. Base is the smallest member base, range the
/// largest member range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawUnion")]
pub struct Union {
    members: Vec<RepeatingInterval>,
}

/// Unvalidated mirror for deserialization; conversion goes through `new` so
/// decoded unions honor the same arity check as constructed ones.
#[derive(Deserialize)]
struct RawUnion {
    members: Vec<RepeatingInterval>,
}

impl TryFrom<RawUnion> for Union {
    type Error = CoreError;

    fn try_from(raw: RawUnion) -> Result<Self> {
        Union::new(raw.members)
    }
}

impl Union {
    pub fn new(members: Vec<RepeatingInterval>) -> Result<Self> {
        if members.len() < 2 {
            return Err(CoreError::unsupported(
                "a union needs at least two repeating intervals",
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

    pub fn following(&self, point: NaiveDateTime) -> Result<UnionSpans<'_>> {
        self.merge(point, Direction::Forward)
    }

    pub fn preceding(&self, point: NaiveDateTime) -> Result<UnionSpans<'_>> {
        self.merge(point, Direction::Backward)
    }

    fn merge(&self, point: NaiveDateTime, direction: Direction) -> Result<UnionSpans<'_>> {
        let mut heads = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let sequence = match direction {
                Direction::Forward => member.following(point)?,
                Direction::Backward => member.preceding(point)?,
            };
            heads.push(sequence.peekable());
        }
        Ok(UnionSpans { heads, direction })
    }
}

/// One buffered sequence per member; each `next` emits the member head that
/// is furthest in the requested direction and advances only that member.
pub struct UnionSpans<'a> {
    heads: Vec<Peekable<SpanIter<'a>>>,
    direction: Direction,
}

impl Iterator for UnionSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let order: fn(&Span, &Span) -> Ordering = match self.direction {
            Direction::Forward => earliest_start_longest,
            Direction::Backward => latest_end_longest,
        };
        let mut best: Option<(usize, Span)> = None;
        for (index, member) in self.heads.iter_mut().enumerate() {
            let Some(&head) = member.peek() else { continue };
            let better = match &best {
                None => true,
                Some((_, current)) => order(&head, current) == Ordering::Less,
            };
            if better {
                best = Some((index, head));
            }
        }
        let (index, span) = best?;
        self.heads[index].next();
        Some(span)
    }
}
