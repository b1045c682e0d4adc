// Date/time primitive layer over chrono: units, fields, truncation.
// Everything above this module treats NaiveDateTime as an opaque calendar
// point and goes through these operations.

pub mod field;
pub mod truncate;
pub mod unit;

pub use field::Field;
pub use truncate::{truncate, truncate_to_field};
pub use unit::Unit;
