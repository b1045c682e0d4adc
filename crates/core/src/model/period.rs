// The period algebra: timeline-independent durations over calendar units.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::Unit;
use crate::error::{CoreError, Result};
use crate::model::{Modifier, Number, TimeExpression};

/// A duration as counts over a set of calendar units, independent of any
/// timeline position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Single(SinglePeriod),
    Sum(PeriodSum),
    Unknown,
}

/// One count of one unit, e.g. "3 days".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinglePeriod {
    pub unit: Unit,
    pub count: Number,
    pub modifier: Modifier,
}

/// A set of periods merged into per-unit totals on first use.
///
/// Units are applied coarsest first when adding or subtracting: calendar
/// overflow makes unit addition non-commutative near month boundaries, so the
/// application order must be fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSum {
    pub periods: Vec<Period>,
    pub modifier: Modifier,
    #[serde(skip)]
    merged: OnceLock<Result<BTreeMap<Unit, Number>>>,
}

impl Period {
    /// An exact integer-count single period.
    pub fn of(unit: Unit, count: i64) -> Self {
        Period::Single(SinglePeriod {
            unit,
            count: Number::Int(count),
            modifier: Modifier::Exact,
        })
    }

    pub fn single(unit: Unit, count: Number, modifier: Modifier) -> Self {
        Period::Single(SinglePeriod {
            unit,
            count,
            modifier,
        })
    }

    pub fn sum(periods: Vec<Period>, modifier: Modifier) -> Self {
        Period::Sum(PeriodSum {
            periods,
            modifier,
            merged: OnceLock::new(),
        })
    }

    /// The count this period carries for `unit`. Querying a unit the period
    /// does not carry is unsupported.
    pub fn count(&self, unit: Unit) -> Result<Number> {
        match self {
            Period::Single(single) if single.unit == unit => Ok(single.count.clone()),
            Period::Single(single) => Err(CoreError::unsupported(format!(
                "no {unit} count in a {} period",
                single.unit
            ))),
            Period::Sum(sum) => sum
                .merged()?
                .get(&unit)
                .cloned()
                .ok_or_else(|| CoreError::unsupported(format!("no {unit} count in period sum"))),
            Period::Unknown => Err(CoreError::unsupported("querying an unknown period")),
        }
    }

    pub fn add_to(&self, point: NaiveDateTime) -> Result<NaiveDateTime> {
        self.apply(point, false)
    }

    pub fn subtract_from(&self, point: NaiveDateTime) -> Result<NaiveDateTime> {
        self.apply(point, true)
    }

    fn apply(&self, point: NaiveDateTime, negate: bool) -> Result<NaiveDateTime> {
        match self {
            Period::Single(single) => {
                single.unit.add(point, signed(single.count.as_int()?, negate)?)
            }
            Period::Sum(sum) => {
                // Coarsest unit first, for addition and subtraction alike.
                let mut point = point;
                for (unit, count) in sum.merged()?.iter().rev() {
                    point = unit.add(point, signed(count.as_int()?, negate)?)?;
                }
                Ok(point)
            }
            Period::Unknown => Err(CoreError::unsupported("arithmetic on an unknown period")),
        }
    }

    fn collect_into(&self, totals: &mut BTreeMap<Unit, Number>) -> Result<()> {
        match self {
            Period::Single(single) => {
                match totals.entry(single.unit) {
                    Entry::Vacant(slot) => {
                        slot.insert(single.count.clone());
                    }
                    Entry::Occupied(mut slot) => {
                        let sum = slot.get().checked_add(&single.count)?;
                        slot.insert(sum);
                    }
                }
                Ok(())
            }
            Period::Sum(sum) => {
                for period in &sum.periods {
                    period.collect_into(totals)?;
                }
                Ok(())
            }
            Period::Unknown => Err(CoreError::unsupported("merging an unknown period")),
        }
    }
}

impl PeriodSum {
    /// The unit -> total-count map, computed once and fixed afterwards.
    /// Iteration order is finest to coarsest (`BTreeMap` over `Unit`'s
    /// duration ordering); callers that need coarsest-first reverse it.
    pub fn merged(&self) -> Result<&BTreeMap<Unit, Number>> {
        self.merged
            .get_or_init(|| {
                let mut totals = BTreeMap::new();
                for period in &self.periods {
                    period.collect_into(&mut totals)?;
                }
                Ok(totals)
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl TimeExpression for Period {
    fn is_defined(&self) -> bool {
        match self {
            Period::Single(single) => single.count.is_defined(),
            Period::Sum(sum) => sum.periods.iter().all(TimeExpression::is_defined),
            Period::Unknown => false,
        }
    }
}

fn signed(count: i64, negate: bool) -> Result<i64> {
    if negate {
        count
            .checked_neg()
            .ok_or_else(|| CoreError::out_of_range("count negation overflow"))
    } else {
        Ok(count)
    }
}
