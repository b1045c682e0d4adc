// Intervals: the concrete half-open span, the closed expression enum over
// interval-derivation operators, and the multi-interval sequence forms.

pub mod period_ops;
pub mod repeating_ops;
pub mod year;

use std::sync::OnceLock;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::TimeExpression;

pub use period_ops::{
    AfterPeriod, BeforePeriod, Between, LastPeriod, NextPeriod, NthPeriod, ThisPeriod,
};
pub use repeating_ops::{
    AfterRepeating, BeforeRepeating, IntervalSeq, LastRepeating, LastSeq, NextRepeating, NextSeq,
    NthRepeating, ThisRepeating, ThisSeq,
};
pub use year::{Year, YearSuffix};

/// A concrete half-open span `[start, end)` on the local timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Full containment: `other` lies entirely within `self`.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// An unresolved reference to an event mentioned in text. Anchoring events
/// to real spans belongs to the front end, so an event is never defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub description: String,
}

impl Event {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// An interval-valued temporal expression.
///
/// The hierarchy is closed by design: adding a variant forces a review of
/// every consumption site. Leaves are `Simple`, `Unknown`, `Event` and
/// `DocumentCreationTime`; the rest derive their span from other
/// expressions, lazily and memoized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Simple(Span),
    Unknown,
    Event(Event),
    DocumentCreationTime,
    Year(Year),
    YearSuffix(YearSuffix),
    ThisPeriod(ThisPeriod),
    ThisRepeating(ThisRepeating),
    LastPeriod(LastPeriod),
    LastRepeating(LastRepeating),
    NextPeriod(NextPeriod),
    NextRepeating(NextRepeating),
    BeforePeriod(BeforePeriod),
    BeforeRepeating(BeforeRepeating),
    AfterPeriod(AfterPeriod),
    AfterRepeating(AfterRepeating),
    Between(Between),
    NthPeriod(NthPeriod),
    NthRepeating(NthRepeating),
}

impl Interval {
    /// Start and end, computed together. Forcing a placeholder leaf fails.
    pub fn span(&self) -> Result<Span> {
        match self {
            Interval::Simple(span) => Ok(*span),
            Interval::Unknown => Err(CoreError::unsupported("span of an unknown interval")),
            Interval::Event(event) => Err(CoreError::unsupported(format!(
                "span of the unanchored event {:?}",
                event.description
            ))),
            Interval::DocumentCreationTime => Err(CoreError::unsupported(
                "span of the unanchored document creation time",
            )),
            Interval::Year(year) => year.span(),
            Interval::YearSuffix(suffix) => suffix.span(),
            Interval::ThisPeriod(op) => op.span(),
            Interval::ThisRepeating(op) => op.span(),
            Interval::LastPeriod(op) => op.span(),
            Interval::LastRepeating(op) => op.span(),
            Interval::NextPeriod(op) => op.span(),
            Interval::NextRepeating(op) => op.span(),
            Interval::BeforePeriod(op) => op.span(),
            Interval::BeforeRepeating(op) => op.span(),
            Interval::AfterPeriod(op) => op.span(),
            Interval::AfterRepeating(op) => op.span(),
            Interval::Between(op) => op.span(),
            Interval::NthPeriod(op) => op.span(),
            Interval::NthRepeating(op) => op.span(),
        }
    }

    pub fn start(&self) -> Result<NaiveDateTime> {
        Ok(self.span()?.start)
    }

    pub fn end(&self) -> Result<NaiveDateTime> {
        Ok(self.span()?.end)
    }

    /// Convenience constructor for a concrete interval.
    pub fn simple(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Interval::Simple(Span::new(start, end))
    }
}

impl TimeExpression for Interval {
    fn is_defined(&self) -> bool {
        match self {
            Interval::Simple(_) => true,
            Interval::Unknown | Interval::Event(_) | Interval::DocumentCreationTime => false,
            Interval::Year(_) => true,
            Interval::YearSuffix(suffix) => suffix.is_defined(),
            Interval::ThisPeriod(op) => op.is_defined(),
            Interval::ThisRepeating(op) => op.is_defined(),
            Interval::LastPeriod(op) => op.is_defined(),
            Interval::LastRepeating(op) => op.is_defined(),
            Interval::NextPeriod(op) => op.is_defined(),
            Interval::NextRepeating(op) => op.is_defined(),
            Interval::BeforePeriod(op) => op.is_defined(),
            Interval::BeforeRepeating(op) => op.is_defined(),
            Interval::AfterPeriod(op) => op.is_defined(),
            Interval::AfterRepeating(op) => op.is_defined(),
            Interval::Between(op) => op.is_defined(),
            Interval::NthPeriod(op) => op.is_defined(),
            Interval::NthRepeating(op) => op.is_defined(),
        }
    }
}

/// Memoized span: evaluated at most once per value, read-only afterwards.
/// Cloning an expression clones whatever has already been computed.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpanCell(OnceLock<Result<Span>>);

impl SpanCell {
    pub(crate) fn get_or_eval(&self, eval: impl FnOnce() -> Result<Span>) -> Result<Span> {
        self.0.get_or_init(eval).clone()
    }
}

/// Memoized span sequence, same contract as `SpanCell`.
#[derive(Debug, Clone, Default)]
pub(crate) struct SeqCell(OnceLock<Result<Vec<Span>>>);

impl SeqCell {
    pub(crate) fn get_or_eval(
        &self,
        eval: impl FnOnce() -> Result<Vec<Span>>,
    ) -> Result<Vec<Span>> {
        self.0.get_or_init(eval).clone()
    }
}

/// Contract check for the singular repeating-interval operators: the
/// underlying sequence must yield exactly one interval.
pub(crate) fn exactly_one(spans: Vec<Span>) -> Result<Span> {
    match spans.as_slice() {
        [span] => Ok(*span),
        other => Err(CoreError::NotSingular { found: other.len() }),
    }
}
