// SPDX-License-Identifier: MPL-2.0

//! Store behavior over each built-in domain value adapter. The date, float,
//! and big-integer cases run under `--all-features`.

use intervalidus::{
    interval, interval_at, DataStore, Interval1D, SeqValue, ValidData, ValueSequence,
};

#[test]
fn long_valued_dimension() {
    let mut store: DataStore<&str, Interval1D<i64>> = DataStore::new();
    store.set(ValidData::new(interval(1i64 << 40, 1i64 << 41), "wide"));
    store.remove(&interval_at(1i64 << 40));

    assert_eq!(store.get_at(&(1i64 << 40).into()), None);
    assert_eq!(store.get_at(&((1i64 << 40) + 1).into()), Some(&"wide"));
}

#[test]
fn unsigned_dimension_merges_adjacent_spans() {
    let mut store: DataStore<&str, Interval1D<u32>> = DataStore::new();
    store.set(ValidData::new(interval(0u32, 5), "low"));
    store.set(ValidData::new(interval(6u32, 9), "low"));
    // adjacency at the type's boundary behaves like anywhere else
    assert_eq!(store.get_all().count(), 1);
}

struct Severity;

impl ValueSequence for Severity {
    type Item = &'static str;
    fn values() -> &'static [&'static str] {
        &["low", "medium", "high", "critical"]
    }
}

#[test]
fn enum_sequence_dimension() {
    let low = SeqValue::<Severity>::of("low").unwrap();
    let medium = SeqValue::<Severity>::of("medium").unwrap();
    let critical = SeqValue::<Severity>::of("critical").unwrap();

    let mut store: DataStore<u8, Interval1D<SeqValue<Severity>>> = DataStore::new();
    store.set(ValidData::new(interval(low, medium.clone()), 1u8));
    store.set(ValidData::new(interval(critical.clone(), critical), 2u8));

    assert_eq!(store.get_at(&medium.into()), Some(&1));
    assert_eq!(
        store.get_at(&SeqValue::<Severity>::of("high").unwrap().into()),
        None
    );
}

#[cfg(feature = "chrono")]
mod dates {
    use super::*;
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).unwrap()
    }

    #[test]
    fn date_intervals_compress_across_month_boundaries() {
        let mut store: DataStore<&str, Interval1D<NaiveDate>> = DataStore::new();
        store.set(ValidData::new(
            interval(day(2024, 1, 1), day(2024, 1, 31)),
            "q1",
        ));
        store.set(ValidData::new(
            interval(day(2024, 2, 1), day(2024, 3, 31)),
            "q1",
        ));

        assert_eq!(store.get_all().count(), 1);
        assert_eq!(store.get_at(&day(2024, 2, 15).into()), Some(&"q1"));
        assert_eq!(store.get_at(&day(2024, 4, 1).into()), None);
    }
}

#[cfg(feature = "chrono")]
mod date_times {
    use super::*;
    use chrono::NaiveDate;
    use intervalidus::Domain1D;

    #[test]
    fn removing_to_a_timestamp_leaves_an_open_boundary() {
        let noon = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();

        let mut store = DataStore::from_data([ValidData::new(
            Interval1D::new(Domain1D::Bottom, Domain1D::at(later)),
            "open",
        )]);
        store.remove(&Interval1D::new(Domain1D::Bottom, Domain1D::at(noon)));

        // the remainder starts just after noon, so noon itself is gone
        assert_eq!(store.get_at(&noon.into()), None);
        assert_eq!(store.get_at(&later.into()), Some(&"open"));
        let remainder = store.get_all().next().unwrap();
        assert_eq!(remainder.interval.start(), &Domain1D::open(noon));
    }
}

#[cfg(feature = "float")]
mod floats {
    use super::*;
    use intervalidus::Domain1D;
    use ordered_float::OrderedFloat;

    fn of(v: f64) -> OrderedFloat<f64> {
        OrderedFloat(v)
    }

    #[test]
    fn continuous_removal_keeps_the_cut_points_out() {
        let mut store = DataStore::from_data([ValidData::new(interval(of(0.0), of(10.0)), "x")]);
        store.remove(&interval(of(2.5), of(7.5)));

        assert_eq!(store.get_at(&of(2.5).into()), None);
        assert_eq!(store.get_at(&of(7.5).into()), None);
        assert_eq!(store.get_at(&of(2.4).into()), Some(&"x"));
        assert_eq!(store.get_at(&of(7.6).into()), Some(&"x"));

        let bounds: Vec<_> = store
            .get_all()
            .map(|data| (data.interval.start().clone(), data.interval.end().clone()))
            .collect();
        assert_eq!(
            bounds,
            vec![
                (Domain1D::at(of(0.0)), Domain1D::open(of(2.5))),
                (Domain1D::open(of(7.5)), Domain1D::at(of(10.0))),
            ]
        );
    }

    #[test]
    fn open_point_probes_are_never_contained() {
        let store = DataStore::from_data([ValidData::new(interval(of(0.0), of(1.0)), "x")]);
        assert_eq!(store.get_at(&Domain1D::open(of(0.5))), None);
        assert_eq!(store.get_at(&Domain1D::at(of(0.5))), Some(&"x"));
    }
}

#[cfg(feature = "bigint")]
mod bigints {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn bigint_dimension_behaves_like_any_discrete_one() {
        let huge = BigInt::from(1u8) << 333usize;
        let mut store: DataStore<&str, Interval1D<BigInt>> = DataStore::new();
        store.set(ValidData::new(
            interval(huge.clone(), huge.clone() + 10),
            "vast",
        ));
        store.set(ValidData::new(
            interval(huge.clone() + 11, huge.clone() + 20),
            "vast",
        ));

        assert_eq!(store.get_all().count(), 1);
        assert_eq!(store.get_at(&(huge + 15i32).into()), Some(&"vast"));
    }
}
