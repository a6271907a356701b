// SPDX-License-Identifier: MPL-2.0

//! Handling intervalidus errors.

use thiserror::Error;

/// Errors surfaced by interval construction, store lookups, and version
/// arithmetic.
///
/// Invariant violations inside the store are not represented here: they are
/// programming errors, and the store's state is undefined once one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalidusError {
    /// A lookup at a domain no stored interval covers.
    #[error("not defined at {0}")]
    NotDefined(String),

    /// Interval construction with bounds no value fits between.
    #[error("invalid interval bounds: {0}")]
    InvalidBounds(String),

    /// A current-version assignment at or past the unapproved marker.
    #[error("version too large")]
    VersionTooLarge,

    /// A current-version assignment below the initial version.
    #[error("version too small")]
    VersionTooSmall,

    /// An increment past the last usable version.
    #[error("ran out of versions")]
    RanOutOfVersions,

    /// An approval for which no matching unapproved record exists.
    #[error("approval conflict: {0}")]
    ApprovalConflict(String),
}
