pub mod modifier;
pub mod number;
pub mod period;
pub mod time_zone;

pub use modifier::Modifier;
pub use number::Number;
pub use period::{Period, PeriodSum, SinglePeriod};
pub use time_zone::TimeZone;

/// Structural definedness: does this expression resolve to a concrete
/// timeline value rather than a placeholder?
///
/// Composite nodes are defined iff every direct child is defined; vague or
/// placeholder leaves are the base case. Consumers must check this before
/// forcing `span()`/`start()`/`end()`, since forcing a not-defined leaf
/// fails.
pub trait TimeExpression {
    fn is_defined(&self) -> bool;
}
