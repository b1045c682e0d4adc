// Repeating-interval-based derivation: the multi-interval sequence forms
// (This/Last/Next) and the single-interval selectors built on them.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::calendar::truncate;
use crate::error::{CoreError, Result};
use crate::interval::{exactly_one, Interval, SeqCell, Span, SpanCell};
use crate::model::TimeExpression;
use crate::repeating::RepeatingInterval;

/// All generator occurrences whose start falls within the anchor interval
/// expanded outward to the generator's range-unit boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisSeq {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    #[serde(skip)]
    cache: SeqCell,
}

impl ThisSeq {
    pub fn new(interval: Interval, repeating: RepeatingInterval) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            cache: SeqCell::default(),
        }
    }

    pub fn spans(&self) -> Result<Vec<Span>> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let range = self.repeating.range();
            let window_start = truncate(bounds.start, range)?;
            // The window's far edge: truncate the last contained tick down,
            // then move one range unit past it.
            let last_tick = bounds
                .end
                .checked_sub_signed(TimeDelta::nanoseconds(1))
                .ok_or_else(|| CoreError::out_of_range("window end underflow"))?;
            let window_end = range.add(truncate(last_tick, range)?, 1)?;
            Ok(self
                .repeating
                .following(window_start)?
                .take_while(|span| span.start < window_end)
                .filter(|span| span.start >= window_start)
                .collect())
        })
    }
}

/// The `count` latest occurrences strictly up to the anchor's start, most
/// recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastSeq {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    count: usize,
    #[serde(skip)]
    cache: SeqCell,
}

impl LastSeq {
    pub fn new(interval: Interval, repeating: RepeatingInterval, count: usize) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            count,
            cache: SeqCell::default(),
        }
    }

    pub fn spans(&self) -> Result<Vec<Span>> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let spans: Vec<Span> = self
                .repeating
                .preceding(bounds.start)?
                .take(self.count)
                .collect();
            if spans.len() < self.count {
                return Err(CoreError::out_of_range(format!(
                    "only {} occurrence(s) precede {}",
                    spans.len(),
                    bounds.start
                )));
            }
            Ok(spans)
        })
    }
}

/// The `count` earliest occurrences at or after the anchor's end, soonest
/// first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextSeq {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    count: usize,
    #[serde(skip)]
    cache: SeqCell,
}

impl NextSeq {
    pub fn new(interval: Interval, repeating: RepeatingInterval, count: usize) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            count,
            cache: SeqCell::default(),
        }
    }

    pub fn spans(&self) -> Result<Vec<Span>> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let spans: Vec<Span> = self
                .repeating
                .following(bounds.end)?
                .take(self.count)
                .collect();
            if spans.len() < self.count {
                return Err(CoreError::out_of_range(format!(
                    "only {} occurrence(s) follow {}",
                    spans.len(),
                    bounds.end
                )));
            }
            Ok(spans)
        })
    }
}

/// A multi-interval temporal expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalSeq {
    This(ThisSeq),
    Last(LastSeq),
    Next(NextSeq),
}

impl IntervalSeq {
    pub fn spans(&self) -> Result<Vec<Span>> {
        match self {
            IntervalSeq::This(seq) => seq.spans(),
            IntervalSeq::Last(seq) => seq.spans(),
            IntervalSeq::Next(seq) => seq.spans(),
        }
    }
}

impl TimeExpression for IntervalSeq {
    fn is_defined(&self) -> bool {
        match self {
            IntervalSeq::This(seq) => seq.is_defined(),
            IntervalSeq::Last(seq) => seq.is_defined(),
            IntervalSeq::Next(seq) => seq.is_defined(),
        }
    }
}

/// Singular This: the window computation must yield exactly one occurrence;
/// zero or several is a contract violation, never a silent truncation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisRepeating {
    sequence: ThisSeq,
    #[serde(skip)]
    cache: SpanCell,
}

impl ThisRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval) -> Self {
        Self {
            sequence: ThisSeq::new(interval, repeating),
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| exactly_one(self.sequence.spans()?))
    }
}

/// Singular Last: the single occurrence immediately preceding the anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastRepeating {
    sequence: LastSeq,
    #[serde(skip)]
    cache: SpanCell,
}

impl LastRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval) -> Self {
        Self {
            sequence: LastSeq::new(interval, repeating, 1),
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| exactly_one(self.sequence.spans()?))
    }
}

/// Singular Next: the single occurrence immediately following the anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextRepeating {
    sequence: NextSeq,
    #[serde(skip)]
    cache: SpanCell,
}

impl NextRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval) -> Self {
        Self {
            sequence: NextSeq::new(interval, repeating, 1),
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| exactly_one(self.sequence.spans()?))
    }
}

/// The `index`-th-latest occurrence before the anchor's start (1-based:
/// index 1 is the one immediately before).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeforeRepeating {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    index: usize,
    #[serde(skip)]
    cache: SpanCell,
}

impl BeforeRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval, index: usize) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            index,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            if self.index == 0 {
                return Err(CoreError::unsupported("before indices are 1-based"));
            }
            let bounds = self.interval.span()?;
            self.repeating
                .preceding(bounds.start)?
                .nth(self.index - 1)
                .ok_or_else(|| CoreError::out_of_range("timeline exhausted going backward"))
        })
    }
}

/// The `index`-th-earliest occurrence at or after the anchor's end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfterRepeating {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    index: usize,
    #[serde(skip)]
    cache: SpanCell,
}

impl AfterRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval, index: usize) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            index,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            if self.index == 0 {
                return Err(CoreError::unsupported("after indices are 1-based"));
            }
            let bounds = self.interval.span()?;
            self.repeating
                .following(bounds.end)?
                .nth(self.index - 1)
                .ok_or_else(|| CoreError::out_of_range("timeline exhausted going forward"))
        })
    }
}

/// The `index`-th occurrence at or after the anchor's start, required to end
/// at or before the anchor's end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NthRepeating {
    interval: Box<Interval>,
    repeating: RepeatingInterval,
    index: usize,
    #[serde(skip)]
    cache: SpanCell,
}

impl NthRepeating {
    pub fn new(interval: Interval, repeating: RepeatingInterval, index: usize) -> Self {
        Self {
            interval: Box::new(interval),
            repeating,
            index,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            if self.index == 0 {
                return Err(CoreError::unsupported("nth-from-start indices are 1-based"));
            }
            let bounds = self.interval.span()?;
            let span = self
                .repeating
                .following(bounds.start)?
                .nth(self.index - 1)
                .ok_or_else(|| CoreError::out_of_range("timeline exhausted going forward"))?;
            if span.end > bounds.end {
                return Err(CoreError::OccurrenceOutOfBounds {
                    end: span.end,
                    bound: bounds.end,
                });
            }
            Ok(span)
        })
    }
}

impl TimeExpression for ThisSeq {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}

impl TimeExpression for LastSeq {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}

impl TimeExpression for NextSeq {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}

impl TimeExpression for ThisRepeating {
    fn is_defined(&self) -> bool {
        self.sequence.is_defined()
    }
}

impl TimeExpression for LastRepeating {
    fn is_defined(&self) -> bool {
        self.sequence.is_defined()
    }
}

impl TimeExpression for NextRepeating {
    fn is_defined(&self) -> bool {
        self.sequence.is_defined()
    }
}

impl TimeExpression for BeforeRepeating {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}

impl TimeExpression for AfterRepeating {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}

impl TimeExpression for NthRepeating {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.repeating.is_defined()
    }
}
