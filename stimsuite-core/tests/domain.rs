//! Tests for the attribute domain model and transition derivation.

use std::collections::HashSet;

use proptest::prelude::*;
use rstest::rstest;
use stimsuite_core::{Attribute, Domain, DomainSet};

fn numeric_domain(size: usize) -> Domain {
    let values = (0..size).map(|v| f64::from(v as u32).into()).collect();
    Domain::new(Attribute::Irregularity, values)
}

#[rstest]
#[case(2, 1)]
#[case(3, 3)]
#[case(4, 6)]
#[case(5, 10)]
fn canonical_transition_count_is_pairs(#[case] size: usize, #[case] expected: usize) {
    let domain = numeric_domain(size);
    let canonical = domain.canonical_transitions();
    assert_eq!(canonical.len(), expected);
    assert_eq!(domain.pair_count(), expected);
}

#[rstest]
fn canonical_transitions_have_no_self_pairs_or_duplicates() {
    let domain = numeric_domain(5);
    let canonical = domain.canonical_transitions();
    let mut unordered = HashSet::new();
    for transition in canonical {
        assert_ne!(transition.start, transition.end);
        assert!(transition.start < transition.end, "canonical direction is forward");
        assert!(
            unordered.insert(transition.unordered()),
            "unordered pair repeated"
        );
    }
}

#[rstest]
#[case(2, 2)]
#[case(3, 6)]
#[case(4, 12)]
fn all_transitions_count_is_ordered_pairs(#[case] size: usize, #[case] expected: usize) {
    let domain = numeric_domain(size);
    assert_eq!(domain.all_transitions().len(), expected);
}

#[rstest]
fn default_domains_match_the_experiment_configuration() {
    let domains = DomainSet::default();
    assert_eq!(
        domains.get(Attribute::Irregularity).values(),
        &[0.0.into(), 0.4.into(), 1.0.into()]
    );
    assert_eq!(
        domains.get(Attribute::AspectRatio).values(),
        &[0.2.into(), 0.5.into(), 1.0.into()]
    );
    assert_eq!(
        domains.get(Attribute::Color).values(),
        &["red".into(), "green".into(), "blue".into()]
    );
    assert_eq!(domains.combination_count(), 27);
    assert_eq!(domains.animations_per_suite(), 9);
}

proptest! {
    /// Any window of `pair_count` consecutive entries in the full transition
    /// pool, taken cyclically from any start offset, covers every unordered
    /// pair exactly once. The cyclic strategy depends on this layout.
    #[test]
    fn rotating_window_covers_every_unordered_pair(size in 2usize..7, start in 0usize..64) {
        let domain = numeric_domain(size);
        let pool = domain.all_transitions();
        let window = domain.pair_count();
        let start = start % pool.len();

        let covered: HashSet<(usize, usize)> = (0..window)
            .map(|offset| pool[(start + offset) % pool.len()].unordered())
            .collect();

        let expected: HashSet<(usize, usize)> = domain
            .canonical_transitions()
            .into_iter()
            .map(|t| t.unordered())
            .collect();
        prop_assert_eq!(covered, expected);
    }
}
