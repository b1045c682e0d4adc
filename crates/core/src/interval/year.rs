// Year and year-suffix operators.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::interval::{Interval, Span, SpanCell};
use crate::model::TimeExpression;

/// A span of `10^missing_digits` years starting at year
/// `digits * 10^missing_digits`: `Year::new(1990)` is the calendar year
/// 1990, `Year::with_missing_digits(199, 1)` the decade 1990-2000.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Year {
    digits: i64,
    missing_digits: u32,
    #[serde(skip)]
    cache: SpanCell,
}

impl Year {
    pub fn new(digits: i64) -> Self {
        Self::with_missing_digits(digits, 0)
    }

    pub fn with_missing_digits(digits: i64, missing_digits: u32) -> Self {
        Self {
            digits,
            missing_digits,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let width = 10i64
                .checked_pow(self.missing_digits)
                .ok_or_else(|| CoreError::out_of_range("year span width overflow"))?;
            let first_year = self
                .digits
                .checked_mul(width)
                .ok_or_else(|| CoreError::out_of_range("year digits overflow"))?;
            let last_year = first_year
                .checked_add(width)
                .ok_or_else(|| CoreError::out_of_range("year span end overflow"))?;
            Ok(Span::new(year_start(first_year)?, year_start(last_year)?))
        })
    }
}

impl TimeExpression for Year {
    fn is_defined(&self) -> bool {
        true
    }
}

/// Replaces the low-order digits of another interval's starting year:
/// `YearSuffix(I over 1985, 76)` is 1976; `YearSuffix(I over 1985, 7, 1)`
/// is the decade 1970-1980.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSuffix {
    interval: Box<Interval>,
    last_digits: i64,
    missing_digits: u32,
    #[serde(skip)]
    cache: SpanCell,
}

impl YearSuffix {
    pub fn new(interval: Interval, last_digits: i64) -> Self {
        Self::with_missing_digits(interval, last_digits, 0)
    }

    pub fn with_missing_digits(interval: Interval, last_digits: i64, missing_digits: u32) -> Self {
        Self {
            interval: Box::new(interval),
            last_digits,
            missing_digits,
            cache: SpanCell::default(),
        }
    }

    pub fn span(&self) -> Result<Span> {
        self.cache.get_or_eval(|| {
            let suffix_width = digit_count(self.last_digits) + self.missing_digits;
            let divider = 10i64
                .checked_pow(suffix_width)
                .ok_or_else(|| CoreError::out_of_range("year suffix width overflow"))?;
            let multiplier = 10i64
                .checked_pow(self.missing_digits)
                .ok_or_else(|| CoreError::out_of_range("year suffix width overflow"))?;
            let anchor_year = i64::from(self.interval.span()?.start.year());
            let digits = anchor_year.div_euclid(divider) * divider / multiplier + self.last_digits;
            Year::with_missing_digits(digits, self.missing_digits).span()
        })
    }
}

impl TimeExpression for YearSuffix {
    fn is_defined(&self) -> bool {
        self.interval.is_defined()
    }
}

fn year_start(year: i64) -> Result<NaiveDateTime> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| CoreError::out_of_range(format!("year {year}")))
}

fn digit_count(value: i64) -> u32 {
    value.checked_ilog10().unwrap_or(0) + 1
}
