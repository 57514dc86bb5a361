//! Mutation tests for the independent verifier.
//!
//! Each case starts from a known-good suite fixture, applies a targeted
//! corruption, and asserts the verifier reports the corresponding violation
//! without panicking or stopping early.

use rstest::{fixture, rstest};
use stimsuite_core::{
    AttrValue, Attribute, DomainSet, Suite, Violation, verify_batch, verify_suite,
};
use stimsuite_test_support::fixtures;

#[fixture]
fn domains() -> DomainSet {
    fixtures::scenario_domains()
}

#[fixture]
fn suite() -> Suite {
    fixtures::valid_suite()
}

#[rstest]
fn valid_suite_passes_and_derives_its_defaults(domains: DomainSet, suite: Suite) {
    let report = verify_suite(&domains, &suite);
    assert!(report.passed(), "violations: {:?}", report.violations());
    assert_eq!(
        report.defaults(),
        Some(&[
            AttrValue::from(0.0),
            AttrValue::from(0.2),
            AttrValue::from("red"),
        ])
    );
}

#[rstest]
fn duplicated_direction_reports_missing_and_duplicated_pairs(
    domains: DomainSet,
    suite: Suite,
) {
    let corrupted = fixtures::with_duplicated_direction(&suite);
    let report = verify_suite(&domains, &corrupted);
    assert!(report.violations().contains(&Violation::MissingPair {
        attribute: Attribute::Irregularity,
        a: 0.0.into(),
        b: 0.4.into(),
    }));
    assert!(report.violations().contains(&Violation::DuplicatedPair {
        attribute: Attribute::Irregularity,
        a: 0.4.into(),
        b: 1.0.into(),
        count: 2,
    }));
}

#[rstest]
fn double_change_reports_the_animation_and_the_count_shortfall(
    domains: DomainSet,
    suite: Suite,
) {
    let corrupted = fixtures::with_double_change(&suite);
    let report = verify_suite(&domains, &corrupted);
    assert!(report.violations().contains(&Violation::ChangingAttributeCount {
        index: 0,
        attributes: vec![Attribute::Irregularity, Attribute::AspectRatio],
    }));
    // The double-changing animation counts for neither attribute.
    assert!(report.violations().contains(&Violation::PerAttributeCount {
        attribute: Attribute::Irregularity,
        expected: 3,
        got: 2,
    }));
}

#[rstest]
fn stalled_animation_reports_zero_changing_attributes(domains: DomainSet, suite: Suite) {
    let corrupted = fixtures::with_stalled_transition(&suite);
    let report = verify_suite(&domains, &corrupted);
    assert!(report.violations().contains(&Violation::ChangingAttributeCount {
        index: 0,
        attributes: Vec::new(),
    }));
    assert!(report.violations().contains(&Violation::PerAttributeCount {
        attribute: Attribute::Irregularity,
        expected: 3,
        got: 2,
    }));
}

#[rstest]
fn inconsistent_default_is_reported_and_blocks_default_derivation(
    domains: DomainSet,
    suite: Suite,
) {
    let corrupted = fixtures::with_inconsistent_default(&suite);
    let report = verify_suite(&domains, &corrupted);
    assert!(report.violations().contains(&Violation::InconsistentDefault {
        index: 1,
        attribute: Attribute::Color,
        expected: "red".into(),
        found: "blue".into(),
    }));
    assert_eq!(report.defaults(), None);
}

#[rstest]
fn foreign_value_is_reported_against_the_domain(domains: DomainSet, suite: Suite) {
    let corrupted = fixtures::with_foreign_value(&suite);
    let report = verify_suite(&domains, &corrupted);
    assert!(report.violations().contains(&Violation::ValueOutsideDomain {
        attribute: Attribute::Irregularity,
        value: 0.7.into(),
    }));
    assert!(report.violations().contains(&Violation::MissingPair {
        attribute: Attribute::Irregularity,
        a: 0.0.into(),
        b: 0.4.into(),
    }));
}

#[rstest]
fn truncated_suite_reports_the_animation_count(domains: DomainSet, suite: Suite) {
    let truncated = Suite::new(suite.animations()[..7].to_vec());
    let report = verify_suite(&domains, &truncated);
    assert!(report.violations().contains(&Violation::AnimationCount {
        expected: 9,
        got: 7,
    }));
}

#[rstest]
fn empty_suite_is_handled_without_panicking(domains: DomainSet) {
    let report = verify_suite(&domains, &Suite::new(Vec::new()));
    assert!(!report.passed());
    assert!(report.violations().contains(&Violation::AnimationCount {
        expected: 9,
        got: 0,
    }));
    assert_eq!(report.defaults(), None);
}

#[rstest]
fn verifier_accumulates_violations_across_independent_corruptions(
    domains: DomainSet,
    suite: Suite,
) {
    // Corrupt two unrelated animations and expect findings for both.
    let corrupted = fixtures::with_inconsistent_default(&fixtures::with_foreign_value(&suite));
    let report = verify_suite(&domains, &corrupted);
    assert!(report
        .violations()
        .iter()
        .any(|v| matches!(v, Violation::ValueOutsideDomain { .. })));
    assert!(report
        .violations()
        .iter()
        .any(|v| matches!(v, Violation::InconsistentDefault { .. })));
}

#[rstest]
fn batch_verification_flags_duplicate_default_combinations(domains: DomainSet) {
    let named = vec![
        ("A".to_owned(), fixtures::valid_suite()),
        ("B".to_owned(), fixtures::valid_suite_with_defaults(0.4, 0.5, "green")),
        ("C".to_owned(), fixtures::valid_suite()),
    ];
    let report = verify_batch(&domains, &named);
    assert!(!report.passed());
    assert_eq!(
        report.batch_violations(),
        &[Violation::DuplicateDefaults {
            suite: "C".to_owned(),
            other: "A".to_owned(),
        }]
    );
    assert_eq!(report.violation_count(), 1);
}

#[rstest]
fn batch_with_distinct_defaults_passes(domains: DomainSet) {
    let named = vec![
        ("A".to_owned(), fixtures::valid_suite()),
        ("B".to_owned(), fixtures::valid_suite_with_defaults(0.4, 0.5, "green")),
        ("C".to_owned(), fixtures::valid_suite_with_defaults(1.0, 1.0, "blue")),
    ];
    let report = verify_batch(&domains, &named);
    assert!(report.passed());
    assert_eq!(report.violation_count(), 0);
}

#[rstest]
fn suites_failing_default_derivation_do_not_join_the_duplicate_scan(domains: DomainSet) {
    // Both suites are corrupted the same way; neither derives defaults, so
    // the batch check cannot claim they collide.
    let corrupted = fixtures::with_inconsistent_default(&fixtures::valid_suite());
    let named = vec![
        ("A".to_owned(), corrupted.clone()),
        ("B".to_owned(), corrupted),
    ];
    let report = verify_batch(&domains, &named);
    assert!(report.batch_violations().is_empty());
    assert!(!report.passed());
}

#[rstest]
fn persisted_suites_verify_after_a_json_round_trip(domains: DomainSet, suite: Suite) {
    let json = serde_json::to_string(&suite).expect("suite serialises");
    let parsed: Suite = serde_json::from_str(&json).expect("suite parses");
    let report = verify_suite(&domains, &parsed);
    assert!(report.passed(), "violations: {:?}", report.violations());
}
