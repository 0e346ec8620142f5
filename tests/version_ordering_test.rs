/// Property tests for version ordering and the minimum-version accumulator
use depscope::prelude::*;
use depscope::dependency_analysis::domain::MinimumVersions;
use proptest::prelude::*;
use std::cmp::Ordering;

fn version() -> impl Strategy<Value = String> {
    "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}([.-](rc|RC|snapshot|final|ga|sp|dev|alpha|beta|M)[0-9]?)?"
}

fn numeric_version() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1000, 1..5)
}

fn dotted(parts: &[i64]) -> String {
    parts
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

proptest! {
    #[test]
    fn test_compare_is_reflexive(a in version()) {
        prop_assert_eq!(VersionComparator::new().compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_compare_is_antisymmetric(a in version(), b in version()) {
        let comparator = VersionComparator::new();
        prop_assert_eq!(comparator.compare(&a, &b), comparator.compare(&b, &a).reverse());
    }

    #[test]
    fn test_compare_is_transitive(a in version(), b in version(), c in version()) {
        let comparator = VersionComparator::new();
        let mut sorted = [a, b, c];
        sorted.sort_by(|x, y| comparator.compare(x, y));
        prop_assert_ne!(comparator.compare(&sorted[0], &sorted[1]), Ordering::Greater);
        prop_assert_ne!(comparator.compare(&sorted[1], &sorted[2]), Ordering::Greater);
        prop_assert_ne!(comparator.compare(&sorted[0], &sorted[2]), Ordering::Greater);
    }

    #[test]
    fn test_dotted_numbers_compare_like_integer_lists(a in numeric_version(), b in numeric_version()) {
        let comparator = VersionComparator::new();
        prop_assert_eq!(comparator.compare(&dotted(&a), &dotted(&b)), a.cmp(&b));
    }

    #[test]
    fn test_minimum_merge_is_order_independent(versions in prop::collection::vec(version(), 1..12), split in 0usize..12) {
        let split = split.min(versions.len());
        let offer_all = |slice: &[String]| {
            let mut minimums = MinimumVersions::new(VersionComparator::new());
            for v in slice {
                minimums.offer(&ResolvedCoordinate::new("org.example", "lib", v));
            }
            minimums
        };

        let mut left_first = offer_all(&versions[..split]);
        left_first.merge(offer_all(&versions[split..]));
        let mut right_first = offer_all(&versions[split..]);
        right_first.merge(offer_all(&versions[..split]));

        prop_assert_eq!(&left_first, &right_first);
        prop_assert_eq!(left_first, offer_all(&versions));
    }
}

#[test]
fn test_known_orderings() {
    let comparator = VersionComparator::new();
    let ascending = [
        "1.0-dev",
        "1.0-alpha",
        "1.0-rc1",
        "1.0-SNAPSHOT",
        "1.0",
        "1.0.1",
        "1.10",
    ];
    for pair in ascending.windows(2) {
        assert_eq!(
            comparator.compare(pair[0], pair[1]),
            Ordering::Less,
            "{} should sort before {}",
            pair[0],
            pair[1]
        );
    }
    assert!(comparator.is_newer("2.0.9", "1.7.36"));
    assert!(!comparator.is_newer("2.0.9", "2.0.9"));
}
