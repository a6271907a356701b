// SPDX-License-Identifier: MPL-2.0

//! Traits and implementations for values usable as interval dimension
//! coordinates.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;

/// Capability of a value type to serve as the coordinate of one interval
/// dimension.
///
/// A domain value has a total order, finite extremes, and a monotone hash
/// into `f64` used to approximate intervals as bounding boxes for the
/// spatial index. Hash collisions are allowed; they only degrade index
/// selectivity, never correctness.
///
/// Two flavors exist:
///  - *Discrete* types (the default) have well-defined neighbors:
///    [successor](DomainValueLike::successor) and
///    [predecessor](DomainValueLike::predecessor) return the adjacent value,
///    or `None` exactly on the corresponding extreme.
///  - *Continuous* types set [`CONTINUOUS`](DomainValueLike::CONTINUOUS),
///    return `None` from both neighbor methods, and instead support open
///    points ([`Domain1D::open`](crate::Domain1D::open)).
pub trait DomainValueLike: Clone + Ord + Hash + Debug + Display {
    /// True for continuous types, where adjacency flips a bound between open
    /// and closed at the same value instead of stepping to a neighbor.
    const CONTINUOUS: bool;

    /// Separator rendered between interval endpoints: `".."` for discrete
    /// types, `", "` for continuous ones.
    const PUNCTUATION: &'static str;

    /// The smallest representable value.
    fn min_value() -> Self;

    /// The largest representable value.
    fn max_value() -> Self;

    /// Monotone map into `f64`: `a <= b` implies
    /// `a.ordered_hash() <= b.ordered_hash()`. Ties are allowed.
    fn ordered_hash(&self) -> f64;

    /// The next value up, `None` iff this is [max_value](Self::max_value).
    /// Continuous types always return `None`.
    fn successor(&self) -> Option<Self>;

    /// The next value down, `None` iff this is [min_value](Self::min_value).
    /// Continuous types always return `None`.
    fn predecessor(&self) -> Option<Self>;
}

/// Marker for discrete domain values (`i32`, dates, enum sequences, ...).
pub trait DiscreteValue: DomainValueLike {}

/// Marker for continuous domain values. Only these admit open points.
pub trait ContinuousValue: DomainValueLike {}

macro_rules! discrete_int_impl {
    ($($t:ty),*) => {$(
        impl DomainValueLike for $t {
            const CONTINUOUS: bool = false;
            const PUNCTUATION: &'static str = "..";

            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn ordered_hash(&self) -> f64 {
                *self as f64
            }

            fn successor(&self) -> Option<Self> {
                self.checked_add(1)
            }

            fn predecessor(&self) -> Option<Self> {
                self.checked_sub(1)
            }
        }

        impl DiscreteValue for $t {}
    )*};
}

discrete_int_impl!(i32, i64, u32, u64, usize);

#[cfg(feature = "chrono")]
mod chrono_impls {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    impl DomainValueLike for NaiveDate {
        const CONTINUOUS: bool = false;
        const PUNCTUATION: &'static str = "..";

        fn min_value() -> Self {
            NaiveDate::MIN
        }

        fn max_value() -> Self {
            NaiveDate::MAX
        }

        fn ordered_hash(&self) -> f64 {
            chrono::Datelike::num_days_from_ce(self) as f64
        }

        fn successor(&self) -> Option<Self> {
            self.succ_opt()
        }

        fn predecessor(&self) -> Option<Self> {
            self.pred_opt()
        }
    }

    impl DiscreteValue for NaiveDate {}

    impl DomainValueLike for NaiveDateTime {
        const CONTINUOUS: bool = true;
        const PUNCTUATION: &'static str = ", ";

        fn min_value() -> Self {
            NaiveDateTime::MIN
        }

        fn max_value() -> Self {
            NaiveDateTime::MAX
        }

        fn ordered_hash(&self) -> f64 {
            self.and_utc().timestamp_millis() as f64
        }

        fn successor(&self) -> Option<Self> {
            None
        }

        fn predecessor(&self) -> Option<Self> {
            None
        }
    }

    impl ContinuousValue for NaiveDateTime {}
}

#[cfg(feature = "float")]
mod float_impls {
    use super::*;
    use ordered_float::OrderedFloat;

    impl DomainValueLike for OrderedFloat<f64> {
        const CONTINUOUS: bool = true;
        const PUNCTUATION: &'static str = ", ";

        // Finite extremes keep bounding boxes splittable; values beyond them
        // are not representable as interval endpoints.
        fn min_value() -> Self {
            OrderedFloat(f64::MIN)
        }

        fn max_value() -> Self {
            OrderedFloat(f64::MAX)
        }

        fn ordered_hash(&self) -> f64 {
            self.0
        }

        fn successor(&self) -> Option<Self> {
            None
        }

        fn predecessor(&self) -> Option<Self> {
            None
        }
    }

    impl ContinuousValue for OrderedFloat<f64> {}
}

#[cfg(feature = "bigint")]
mod bigint_impls {
    use super::*;
    use num_bigint::BigInt;
    use num_traits::ToPrimitive;

    /// `BigInt` is mathematically unbounded; the adapter bounds it at
    /// `±2^256`, far past anything a hash into `f64` can still separate.
    fn extreme() -> BigInt {
        BigInt::from(1u8) << 256usize
    }

    impl DomainValueLike for BigInt {
        const CONTINUOUS: bool = false;
        const PUNCTUATION: &'static str = "..";

        fn min_value() -> Self {
            -extreme()
        }

        fn max_value() -> Self {
            extreme()
        }

        fn ordered_hash(&self) -> f64 {
            self.to_f64().unwrap_or(if self.sign() == num_bigint::Sign::Minus {
                f64::MIN
            } else {
                f64::MAX
            })
        }

        fn successor(&self) -> Option<Self> {
            if *self >= Self::max_value() {
                None
            } else {
                Some(self.clone() + 1)
            }
        }

        fn predecessor(&self) -> Option<Self> {
            if *self <= Self::min_value() {
                None
            } else {
                Some(self.clone() - 1)
            }
        }
    }

    impl DiscreteValue for BigInt {}
}

/// A fixed, ordered sequence of values backing a [`SeqValue`] domain.
///
/// Implement this on a marker type to turn any enumeration into a discrete
/// domain value ordered by sequence position:
///
/// ```
/// # use intervalidus::{SeqValue, ValueSequence};
/// struct Weekday;
/// impl ValueSequence for Weekday {
///     type Item = &'static str;
///     fn values() -> &'static [&'static str] {
///         &["mon", "tue", "wed", "thu", "fri"]
///     }
/// }
///
/// let mon = SeqValue::<Weekday>::of("mon").unwrap();
/// let tue = SeqValue::<Weekday>::of("tue").unwrap();
/// assert!(mon < tue);
/// ```
pub trait ValueSequence: 'static {
    /// Element type of the sequence.
    type Item: Clone + Eq + Debug + Display;

    /// The ordered sequence. Must be non-empty and free of duplicates.
    fn values() -> &'static [Self::Item];
}

/// A member of a [`ValueSequence`], ordered by its position.
pub struct SeqValue<S: ValueSequence> {
    index: usize,
    _sequence: PhantomData<fn() -> S>,
}

impl<S: ValueSequence> SeqValue<S> {
    /// The sequence member equal to `value`, or `None` if the sequence does
    /// not contain it.
    pub fn of(value: impl PartialEq<S::Item>) -> Option<Self> {
        S::values()
            .iter()
            .position(|candidate| value == *candidate)
            .map(Self::at)
    }

    fn at(index: usize) -> Self {
        debug_assert!(index < S::values().len());
        Self {
            index,
            _sequence: PhantomData,
        }
    }

    /// The underlying sequence element.
    pub fn value(&self) -> &'static S::Item {
        &S::values()[self.index]
    }
}

impl<S: ValueSequence> Clone for SeqValue<S> {
    fn clone(&self) -> Self {
        Self::at(self.index)
    }
}

impl<S: ValueSequence> PartialEq for SeqValue<S> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<S: ValueSequence> Eq for SeqValue<S> {}

impl<S: ValueSequence> PartialOrd for SeqValue<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: ValueSequence> Ord for SeqValue<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<S: ValueSequence> Hash for SeqValue<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}

impl<S: ValueSequence> Debug for SeqValue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqValue({:?})", self.value())
    }
}

impl<S: ValueSequence> Display for SeqValue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.value(), f)
    }
}

impl<S: ValueSequence> DomainValueLike for SeqValue<S> {
    const CONTINUOUS: bool = false;
    const PUNCTUATION: &'static str = "..";

    fn min_value() -> Self {
        Self::at(0)
    }

    fn max_value() -> Self {
        Self::at(S::values().len() - 1)
    }

    fn ordered_hash(&self) -> f64 {
        self.index as f64
    }

    fn successor(&self) -> Option<Self> {
        if self.index + 1 < S::values().len() {
            Some(Self::at(self.index + 1))
        } else {
            None
        }
    }

    fn predecessor(&self) -> Option<Self> {
        self.index.checked_sub(1).map(Self::at)
    }
}

impl<S: ValueSequence> DiscreteValue for SeqValue<S> {}
