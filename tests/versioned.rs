// SPDX-License-Identifier: MPL-2.0

use intervalidus::{
    interval, Interval1D, IntervalidusError, ValidData, Versioned1D, Versioned2D,
    VersionSelection, UNAPPROVED_START_VERSION,
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type Store = Versioned1D<&'static str, i32>;

fn slice(store: &Store, selection: VersionSelection) -> Vec<(Interval1D<i32>, &'static str)> {
    store
        .get_all(selection)
        .into_iter()
        .map(|data| (data.interval, data.value))
        .collect()
}

#[test]
fn rollback_restores_the_earlier_slice() {
    init_log();
    let mut store = Store::new();
    store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
    let v0 = store.current_version();

    store.increment_current_version().unwrap();
    store.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);
    assert_eq!(
        slice(&store, VersionSelection::Current),
        vec![
            (interval(1, 4), "a"),
            (interval(5, 8), "b"),
            (interval(9, 10), "a"),
        ]
    );

    store.reset_to_version(v0).unwrap();
    assert_eq!(store.current_version(), v0);
    assert_eq!(
        slice(&store, VersionSelection::Current),
        vec![(interval(1, 10), "a")]
    );
}

#[test]
fn incrementing_does_not_change_the_current_view() {
    init_log();
    let mut store = Store::new();
    store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
    let before = slice(&store, VersionSelection::Current);

    store.increment_current_version().unwrap();
    assert_eq!(slice(&store, VersionSelection::Current), before);

    // and the pre-increment version stays readable after the next write
    store.set(ValidData::new(interval(1, 4), "b"), VersionSelection::Current);
    assert_eq!(
        slice(&store, VersionSelection::Specific(0)),
        vec![(interval(1, 10), "a")]
    );
    assert_eq!(
        slice(&store, VersionSelection::Current),
        vec![(interval(1, 4), "b"), (interval(5, 10), "a")]
    );
}

#[test]
fn earlier_slices_match_what_was_observed() {
    init_log();
    let mut store = Store::new();
    let writes = [((1, 10), "a"), ((3, 6), "b"), ((8, 12), "c")];

    let mut observed = Vec::new();
    for ((from, to), value) in writes {
        store.set(ValidData::new(interval(from, to), value), VersionSelection::Current);
        observed.push((
            store.current_version(),
            slice(&store, VersionSelection::Current),
        ));
        store.increment_current_version().unwrap();
    }

    for (version, snapshot) in observed {
        assert_eq!(
            slice(&store, VersionSelection::Specific(version)),
            snapshot,
            "slice at version {version}"
        );
    }
}

#[test]
fn staged_data_round_trip() {
    init_log();
    let mut store = Store::new();
    store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
    store.set(
        ValidData::new(interval(4, 6), "b"),
        VersionSelection::Unapproved,
    );

    // staging is invisible to the current slice, visible to the unapproved one
    assert_eq!(
        slice(&store, VersionSelection::Current),
        vec![(interval(1, 10), "a")]
    );
    assert_eq!(
        slice(&store, VersionSelection::Unapproved),
        vec![
            (interval(1, 3), "a"),
            (interval(4, 6), "b"),
            (interval(7, 10), "a"),
        ]
    );

    store
        .approve(ValidData::new(interval(4, 6), "b"))
        .expect("staged record exists");
    assert_eq!(
        slice(&store, VersionSelection::Current),
        vec![
            (interval(1, 3), "a"),
            (interval(4, 6), "b"),
            (interval(7, 10), "a"),
        ]
    );

    // approving again conflicts: nothing is staged anymore
    assert!(matches!(
        store.approve(ValidData::new(interval(4, 6), "b")),
        Err(IntervalidusError::ApprovalConflict(_))
    ));
}

#[test]
fn collapse_then_sync_between_stores() {
    init_log();
    let mut source = Store::new();
    source.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
    source.increment_current_version().unwrap();
    source.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);
    source.collapse_version_history();

    let mut replica = Store::new();
    replica.sync_with(&source);
    assert_eq!(replica, source);
    assert_eq!(
        slice(&replica, VersionSelection::Current),
        vec![
            (interval(1, 4), "a"),
            (interval(5, 8), "b"),
            (interval(9, 10), "a"),
        ]
    );
}

#[test]
fn version_bounds_are_enforced() {
    init_log();
    let mut store = Store::with_initial_version(5);
    assert_eq!(
        store.set_current_version(4),
        Err(IntervalidusError::VersionTooSmall)
    );
    assert_eq!(
        store.set_current_version(UNAPPROVED_START_VERSION),
        Err(IntervalidusError::VersionTooLarge)
    );
    assert_eq!(
        store.reset_to_version(UNAPPROVED_START_VERSION),
        Err(IntervalidusError::VersionTooLarge)
    );
    store
        .set_current_version(UNAPPROVED_START_VERSION - 1)
        .unwrap();
    assert_eq!(
        store.increment_current_version(),
        Err(IntervalidusError::RanOutOfVersions)
    );
}

#[test]
fn two_dimensional_data_can_be_versioned_too() {
    init_log();
    use intervalidus::{Domain2D, Interval2D};

    let mut store: Versioned2D<&str, i32, i32> = Versioned2D::new();
    let square = Interval2D::new(interval(1, 10), interval(1, 10));
    store.set(ValidData::new(square, "a"), VersionSelection::Current);
    store.increment_current_version().unwrap();
    store.set(
        ValidData::new(Interval2D::new(interval(3, 5), interval(3, 5)), "b"),
        VersionSelection::Current,
    );

    let probe = Domain2D::from((4, 4));
    assert_eq!(store.get_at(&probe, VersionSelection::Current), Some(&"b"));
    assert_eq!(
        store.get_at(&probe, VersionSelection::Specific(0)),
        Some(&"a")
    );
    let outside = Domain2D::from((9, 9));
    assert_eq!(store.get_at(&outside, VersionSelection::Current), Some(&"a"));
}
