use serde::{Deserialize, Serialize};

use crate::model::TimeExpression;

/// A named, unresolved time-zone tag. Resolution is out of scope, so a time
/// zone is recognized but never defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZone {
    pub name: String,
}

impl TimeZone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TimeExpression for TimeZone {
    fn is_defined(&self) -> bool {
        false
    }
}
