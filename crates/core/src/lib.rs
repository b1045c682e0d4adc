//! Formal evaluation engine for normalized temporal expressions: periods,
//! half-open intervals, and repeating-interval generators, composed into
//! expression trees by an external front end and evaluated lazily here.

pub mod calendar;
pub mod error;
pub mod interval;
pub mod model;
pub mod repeating;

pub use calendar::{truncate, truncate_to_field, Field, Unit};
pub use error::{CoreError, Result};
pub use interval::{Event, Interval, IntervalSeq, Span};
pub use model::{Modifier, Number, Period, TimeExpression, TimeZone};
pub use repeating::{FieldRepeating, Intersection, RepeatingInterval, Union, UnitRepeating};
