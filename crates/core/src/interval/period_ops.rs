// Period-based interval derivation: This, Last, Next, Before, After,
// Between and NthFromStart over a period.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::interval::{Interval, Span, SpanCell};
use crate::model::{Period, TimeExpression};

/// A period-length span centered on the anchor interval's midpoint:
/// `[mid - P/2, mid + P/2)`, with the period width measured backward from
/// the midpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisPeriod {
    interval: Box<Interval>,
    period: Period,
    #[serde(skip)]
    cache: SpanCell,
}

impl ThisPeriod {
    pub fn new(interval: Interval, period: Period) -> Self {
        Self {
            interval: Box::new(interval),
            period,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let mid = bounds
                .start
                .checked_add_signed(bounds.duration() / 2)
                .ok_or_else(|| CoreError::out_of_range("interval midpoint"))?;
            let width = mid.signed_duration_since(self.period.subtract_from(mid)?);
            let start = mid
                .checked_sub_signed(width / 2)
                .ok_or_else(|| CoreError::out_of_range("centered span start"))?;
            let end = start
                .checked_add_signed(width)
                .ok_or_else(|| CoreError::out_of_range("centered span end"))?;
            Ok(Span::new(start, end))
        })
    }
}

/// `[I.start - P, I.start)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastPeriod {
    interval: Box<Interval>,
    period: Period,
    #[serde(skip)]
    cache: SpanCell,
}

impl LastPeriod {
    pub fn new(interval: Interval, period: Period) -> Self {
        Self {
            interval: Box::new(interval),
            period,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let start = self.period.subtract_from(bounds.start)?;
            Ok(Span::new(start, bounds.start))
        })
    }
}

/// `[I.end, I.end + P)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPeriod {
    interval: Box<Interval>,
    period: Period,
    #[serde(skip)]
    cache: SpanCell,
}

impl NextPeriod {
    pub fn new(interval: Interval, period: Period) -> Self {
        Self {
            interval: Box::new(interval),
            period,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            let end = self.period.add_to(bounds.end)?;
            Ok(Span::new(bounds.end, end))
        })
    }
}

/// The whole anchor interval shifted one period into the past:
/// `[I.start - P, I.end - P)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeforePeriod {
    interval: Box<Interval>,
    period: Period,
    #[serde(skip)]
    cache: SpanCell,
}

impl BeforePeriod {
    pub fn new(interval: Interval, period: Period) -> Self {
        Self {
            interval: Box::new(interval),
            period,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            Ok(Span::new(
                self.period.subtract_from(bounds.start)?,
                self.period.subtract_from(bounds.end)?,
            ))
        })
    }
}

/// The whole anchor interval shifted one period into the future:
/// `[I.start + P, I.end + P)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfterPeriod {
    interval: Box<Interval>,
    period: Period,
    #[serde(skip)]
    cache: SpanCell,
}

impl AfterPeriod {
    pub fn new(interval: Interval, period: Period) -> Self {
        Self {
            interval: Box::new(interval),
            period,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let bounds = self.interval.span()?;
            Ok(Span::new(
                self.period.add_to(bounds.start)?,
                self.period.add_to(bounds.end)?,
            ))
        })
    }
}

/// The gap between two intervals: `[A.end, B.start)`. Inputs are trusted;
/// overlapping or reversed arguments produce an unchecked, ill-formed span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Between {
    start_interval: Box<Interval>,
    end_interval: Box<Interval>,
    #[serde(skip)]
    cache: SpanCell,
}

impl Between {
    pub fn new(start_interval: Interval, end_interval: Interval) -> Self {
        Self {
            start_interval: Box::new(start_interval),
            end_interval: Box::new(end_interval),
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            Ok(Span::new(
                self.start_interval.span()?.end,
                self.end_interval.span()?.start,
            ))
        })
    }
}

/// The `index`-th period-length slot from the anchor's start (1-based):
/// `[I.start + P*(n-1), I.start + P*n)`. Multiplication is by repeated
/// application so sum periods keep their coarsest-first order each step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NthPeriod {
    interval: Box<Interval>,
    period: Period,
    index: usize,
    #[serde(skip)]
    cache: SpanCell,
}

impl NthPeriod {
    pub fn new(interval: Interval, period: Period, index: usize) -> Self {
        Self {
            interval: Box::new(interval),
            period,
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
            let mut start = bounds.start;
            for _ in 1..self.index {
                start = self.period.add_to(start)?;
            }
            let end = self.period.add_to(start)?;
            Ok(Span::new(start, end))
        })
    }
}

impl TimeExpression for ThisPeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for LastPeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for NextPeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for BeforePeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for AfterPeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for NthPeriod {
    fn is_defined(&self) -> bool {
        self.interval.is_defined() && self.period.is_defined()
    }
}

impl TimeExpression for Between {
    fn is_defined(&self) -> bool {
        self.start_interval.is_defined() && self.end_interval.is_defined()
    }
}
