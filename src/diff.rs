// SPDX-License-Identifier: MPL-2.0

//! Differential synchronization between stores.
//!
//! A diff action describes one record-level difference between two store
//! states. A stream of them, produced by
//! [`diff_actions_from`](crate::DataStore::diff_actions_from) and consumed
//! by [`apply_diff_actions`](crate::DataStore::apply_diff_actions), carries
//! one store's state to another. It is a state synchronization protocol,
//! not a mutation log: the stream describes where the states differ, not
//! how the target got there.

use std::fmt::{self, Debug, Display};

use crate::domain::DomainLike;
use crate::interval::IntervalLike;
use crate::valid_data::ValidData;

/// One record-level difference between two store states.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "V: serde::Serialize, I: serde::Serialize, I::Domain: serde::Serialize",
    deserialize = "V: serde::Deserialize<'de>, I: serde::Deserialize<'de>, I::Domain: serde::Deserialize<'de>"
)))]
pub enum DiffAction<V, I: IntervalLike> {
    /// A record exists in the new state at a key the old state did not have.
    Create(ValidData<V, I>),
    /// The record at this key differs between the states.
    Update(ValidData<V, I>),
    /// The old state had a record at this key, the new state does not.
    Delete(I::Domain),
}

impl<V: Debug, I: IntervalLike> DiffAction<V, I> {
    /// Constructor-style rendering, e.g.
    /// `DiffAction.Create((interval(1, 2) x interval_from(3)) -> "hi")`.
    pub fn to_code_like_string(&self) -> String {
        match self {
            DiffAction::Create(data) => {
                format!("DiffAction.Create({})", data.to_code_like_string())
            }
            DiffAction::Update(data) => {
                format!("DiffAction.Update({})", data.to_code_like_string())
            }
            DiffAction::Delete(key) => {
                format!("DiffAction.Delete({})", key.to_code_like_string())
            }
        }
    }
}

impl<V: Debug, I: IntervalLike> Display for DiffAction<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code_like_string())
    }
}
