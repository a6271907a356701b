// SPDX-License-Identifier: MPL-2.0

//! Intervalidus manages values that are valid over intervals along one or
//! more ordered dimensions: "what value was (or will be) valid at this
//! point in space × time × version?".
//!
//! # Domains, intervals, and valid data
//!
//! A dimension's coordinates are any type implementing [`DomainValueLike`]:
//! integers, dates, enum sequences (discrete), or floats and date-times
//! (continuous, with open endpoints). A bound along one dimension is a
//! [`Domain1D`], an extent between two bounds an [`Interval1D`], and
//! products of those ([`Interval2D`], [`Interval3D`]) cover multiple
//! dimensions. A value paired with the interval it is valid over is a
//! [`ValidData`] record.
//!
//! # The dimensional store
//!
//! A [`DataStore`] keeps a set of records that is always disjoint and
//! value-wise compressed, and rewrites overlapped regions on every
//! mutation:
//!
//! ```
//! use intervalidus::{interval, DataStore, ValidData};
//!
//! let mut schedule: DataStore<&str, _> = DataStore::new();
//! schedule.set(ValidData::new(interval(1, 5), "rehearsal"));
//! schedule.set(ValidData::new(interval(3, 4), "recording"));
//!
//! assert_eq!(schedule.get_at(&2.into()), Some(&"rehearsal"));
//! assert_eq!(schedule.get_at(&4.into()), Some(&"recording"));
//! assert_eq!(schedule.get_at(&5.into()), Some(&"rehearsal"));
//! ```
//!
//! Composition operators build on the same rewrite engine:
//! [`fill`](DataStore::fill) writes only where nothing is valid yet,
//! [`merge`](DataStore::merge) folds one store into another, and
//! [`zip`](DataStore::zip)/[`zip_all`](DataStore::zip_all) pair two stores
//! up region by region. [`ImmutableStore`] offers the same semantics with
//! copy-on-write calls, and [`MultiValueStore`] keeps *sets* of values with
//! per-element updates.
//!
//! # Synchronization
//!
//! [`diff_actions_from`](DataStore::diff_actions_from) computes the
//! [`DiffAction`] stream that carries one store's state to another's, and
//! [`apply_diff_actions`](DataStore::apply_diff_actions) interprets such a
//! stream. This is the intended way to move state between threads or
//! processes; stores themselves are single-threaded.
//!
//! # Versioning
//!
//! A [`VersionedStore`] layers an integer version history on top of any
//! store: writes supersede rather than destroy, staged ("unapproved") data
//! becomes visible only on [`approve`](VersionedStore::approve), and
//! [`reset_to_version`](VersionedStore::reset_to_version) rolls the whole
//! history back. Every operation takes a [`VersionSelection`] choosing the
//! slice it observes.
//!
//! ```
//! use intervalidus::{interval, ValidData, Versioned1D, VersionSelection};
//!
//! let mut prices: Versioned1D<u32, i32> = Versioned1D::new();
//! prices.set(ValidData::new(interval(1, 31), 100), VersionSelection::Current);
//! prices.increment_current_version()?;
//! prices.set(ValidData::new(interval(15, 31), 120), VersionSelection::Current);
//!
//! assert_eq!(prices.get_at(&20.into(), VersionSelection::Current), Some(&120));
//! assert_eq!(prices.get_at(&20.into(), VersionSelection::Specific(0)), Some(&100));
//! # Ok::<(), intervalidus::IntervalidusError>(())
//! ```

#![warn(missing_docs)]

mod diff;
mod domain;
mod domain_value;
mod error;
mod immutable;
mod interval;
mod interval2d;
mod interval3d;
mod multi;
mod spatial;
mod store;
mod type_aliases;
mod valid_data;
mod versioned;

pub use diff::DiffAction;
pub use domain::{Domain1D, Domain2D, Domain3D, DomainLike};
pub use domain_value::{
    ContinuousValue, DiscreteValue, DomainValueLike, SeqValue, ValueSequence,
};
pub use error::IntervalidusError;
pub use immutable::ImmutableStore;
pub use interval::{
    interval, interval_at, interval_from, interval_to, Interval1D, IntervalLike, Remainder,
};
pub use interval2d::Interval2D;
pub use interval3d::Interval3D;
pub use multi::{ElementLike, MultiValueStore, ValueSet};
pub use store::{DataStore, ValueLike};
pub use type_aliases::{Map, Set};
pub use valid_data::ValidData;
pub use versioned::{
    ImmutableVersionedStore, Versioned1D, Versioned2D, VersionedStore, VersionSelection,
    WithVersion, UNAPPROVED_START_VERSION,
};
