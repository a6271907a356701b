// SPDX-License-Identifier: MPL-2.0

//! The record type of the dimensional store: a value valid over an interval.

use std::fmt::{self, Debug, Display};

use crate::interval::IntervalLike;

/// A value and the interval over which it is valid.
///
/// Inside a store, a record is uniquely identified by its interval's start;
/// see [key](Self::key).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidData<V, I> {
    /// Where the value is valid.
    pub interval: I,
    /// The valid value.
    pub value: V,
}

impl<V, I> ValidData<V, I> {
    /// Record from an interval and a value.
    pub fn new(interval: I, value: V) -> Self {
        Self { interval, value }
    }
}

impl<V, I: IntervalLike> ValidData<V, I> {
    /// The record's identity within a store: its interval's start.
    pub fn key(&self) -> I::Domain {
        self.interval.start()
    }
}

impl<V: Debug, I: IntervalLike> ValidData<V, I> {
    /// Constructor-style rendering, e.g. `(interval(1, 2) -> "hi")`.
    pub fn to_code_like_string(&self) -> String {
        format!("({} -> {:?})", self.interval.to_code_like_string(), self.value)
    }
}

impl<V: Debug, I: IntervalLike> Display for ValidData<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.interval, self.value)
    }
}
