//! Tests for the generation strategies and their cross-suite guarantees.

use std::collections::HashSet;

use rstest::{fixture, rstest};
use stimsuite_core::{
    AttrValue, Attribute, Batch, Domain, DomainSet, GenerateError, GenerationStrategy,
    GeneratorBuilder, Suite, verify_batch,
};

#[fixture]
fn domains() -> DomainSet {
    DomainSet::default()
}

fn generate(strategy: GenerationStrategy, count: Option<usize>, seed: u64) -> Batch {
    let mut builder = GeneratorBuilder::new().with_strategy(strategy).with_seed(seed);
    if let Some(count) = count {
        builder = builder.with_suite_count(count);
    }
    builder
        .build()
        .expect("configuration must be valid")
        .run()
        .expect("generation must succeed")
}

/// Collects the unordered value pairs a suite animates for `attribute`.
fn unordered_pairs(suite: &Suite, attribute: Attribute) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = suite
        .animations()
        .iter()
        .filter(|animation| animation.changed_attributes() == [attribute])
        .map(|animation| {
            let start = animation.start_state.value(attribute).to_string();
            let end = animation.end_state.value(attribute).to_string();
            if start <= end { (start, end) } else { (end, start) }
        })
        .collect();
    pairs.sort();
    pairs
}

fn expected_pairs(domains: &DomainSet, attribute: Attribute) -> Vec<(String, String)> {
    let domain = domains.get(attribute);
    let mut pairs: Vec<(String, String)> = domain
        .canonical_transitions()
        .into_iter()
        .map(|t| {
            let start = domain.value(t.start).map(ToString::to_string).unwrap_or_default();
            let end = domain.value(t.end).map(ToString::to_string).unwrap_or_default();
            if start <= end { (start, end) } else { (end, start) }
        })
        .collect();
    pairs.sort();
    pairs
}

#[rstest]
fn random_flip_generates_one_suite_per_default_combination(domains: DomainSet) {
    let batch = generate(GenerationStrategy::RandomFlip, None, 7);
    assert_eq!(batch.len(), 8);

    let mut seen_defaults = HashSet::new();
    for entry in batch.entries() {
        assert_eq!(entry.suite.len(), domains.animations_per_suite());
        let rendered: Vec<String> = entry.defaults.iter().map(ToString::to_string).collect();
        assert!(seen_defaults.insert(rendered.join("/")));
    }
}

#[rstest]
#[case(1)]
#[case(42)]
#[case(u64::MAX)]
fn random_flip_covers_every_pair_regardless_of_flips(#[case] seed: u64, domains: DomainSet) {
    let batch = generate(GenerationStrategy::RandomFlip, None, seed);
    for entry in batch.entries() {
        for attribute in Attribute::ALL {
            assert_eq!(
                unordered_pairs(&entry.suite, attribute),
                expected_pairs(&domains, attribute),
                "attribute {attribute} must cover its canonical pair set"
            );
        }
    }
}

#[rstest]
fn random_flip_holds_defaults_in_every_animation() {
    let batch = generate(GenerationStrategy::RandomFlip, None, 3);
    for entry in batch.entries() {
        for animation in entry.suite.animations() {
            let changed = animation.changed_attributes();
            for attribute in Attribute::ALL {
                if changed.contains(&attribute) {
                    continue;
                }
                let expected = &entry.defaults[attribute.index()];
                assert_eq!(&animation.start_state.value(attribute), expected);
                assert_eq!(&animation.end_state.value(attribute), expected);
            }
        }
    }
    // The scenario default pools pin the first combination to (0, 0.2, red).
    assert_eq!(
        batch.entries()[0].defaults,
        [
            AttrValue::from(0.0),
            AttrValue::from(0.2),
            AttrValue::from("red"),
        ]
    );
}

#[rstest]
fn random_flip_is_reproducible_under_a_fixed_seed() {
    let first = generate(GenerationStrategy::RandomFlip, None, 99);
    let second = generate(GenerationStrategy::RandomFlip, None, 99);
    assert_eq!(first.entries(), second.entries());
}

#[rstest]
fn cyclic_covers_all_default_combinations_exactly_once(domains: DomainSet) {
    let batch = generate(GenerationStrategy::CyclicAssignment, Some(27), 0);
    assert_eq!(batch.len(), 27);

    let defaults: HashSet<Vec<String>> = batch
        .entries()
        .iter()
        .map(|entry| entry.defaults.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(defaults.len(), domains.combination_count());

    let coverage = batch.coverage();
    assert_eq!(coverage.suites, 27);
    assert_eq!(coverage.defaults_used, 27);
}

#[rstest]
fn cyclic_never_emits_two_structurally_identical_suites() {
    let batch = generate(GenerationStrategy::CyclicAssignment, Some(27), 0);
    let distinct: HashSet<String> = batch
        .entries()
        .iter()
        .map(|entry| serde_json::to_string(&entry.suite).expect("suite serialises"))
        .collect();
    assert_eq!(distinct.len(), batch.len());
}

#[rstest]
fn cyclic_reuses_defaults_only_past_the_combination_space(domains: DomainSet) {
    let batch = generate(GenerationStrategy::CyclicAssignment, Some(30), 0);
    assert_eq!(batch.len(), 30);

    let first_pass: HashSet<Vec<String>> = batch.entries()[..27]
        .iter()
        .map(|entry| entry.defaults.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(first_pass.len(), domains.combination_count());

    // Still no two structurally identical suites across the whole batch.
    let distinct: HashSet<String> = batch
        .entries()
        .iter()
        .map(|entry| serde_json::to_string(&entry.suite).expect("suite serialises"))
        .collect();
    assert_eq!(distinct.len(), 30);
}

#[rstest]
fn cyclic_rejects_counts_below_the_combination_space() {
    let err = GeneratorBuilder::new()
        .with_strategy(GenerationStrategy::CyclicAssignment)
        .with_suite_count(9)
        .build()
        .expect_err("9 suites cannot cover 27 default combinations");
    assert_eq!(
        err,
        GenerateError::CoverageInfeasible {
            requested: 9,
            required: 27,
        }
    );
}

#[rstest]
fn cyclic_fails_once_the_reachable_signature_space_runs_out() {
    // With two values per attribute the cursors move in lockstep over
    // two-entry pools, so only 16 distinct suites are reachable: 8 default
    // combinations times 2 cursor positions. The 17th request can only
    // collide until the reuse budget runs out.
    let domains = DomainSet::new(
        Domain::new(Attribute::Irregularity, vec![0.0.into(), 1.0.into()]),
        Domain::new(Attribute::AspectRatio, vec![0.2.into(), 1.0.into()]),
        Domain::new(Attribute::Color, vec!["red".into(), "blue".into()]),
    );
    let err = GeneratorBuilder::new()
        .with_domains(domains)
        .with_strategy(GenerationStrategy::CyclicAssignment)
        .with_suite_count(17)
        .build()
        .expect("configuration must be valid")
        .run()
        .expect_err("17 suites exceed the reachable signature space");
    let GenerateError::Exhausted { emitted, .. } = err else {
        panic!("expected an exhaustion failure, got {err:?}");
    };
    assert_eq!(emitted, 16);
}

#[rstest]
fn cyclic_exercises_every_ordered_transition_in_a_large_batch() {
    let batch = generate(GenerationStrategy::CyclicAssignment, Some(27), 0);
    for coverage in &batch.coverage().attributes {
        assert_eq!(
            coverage.transitions_exercised, coverage.transition_pool,
            "attribute {} must exercise its full ordered pool",
            coverage.attribute
        );
    }
}

#[rstest]
#[case(GenerationStrategy::RandomFlip, None)]
#[case(GenerationStrategy::CyclicAssignment, Some(27))]
fn generator_output_is_always_verifier_valid(
    #[case] strategy: GenerationStrategy,
    #[case] count: Option<usize>,
    domains: DomainSet,
) {
    let batch = generate(strategy, count, 11);
    let named: Vec<(String, Suite)> = batch
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| (format!("suite-{index}"), entry.suite.clone()))
        .collect();
    let report = verify_batch(&domains, &named);
    assert!(
        report.passed(),
        "generated batch must verify cleanly: {:?}",
        report
            .suites()
            .iter()
            .flat_map(|(_, r)| r.violations())
            .collect::<Vec<_>>()
    );
}

#[rstest]
fn anim_length_propagates_to_every_animation() {
    let batch = GeneratorBuilder::new()
        .with_anim_length(1500)
        .with_seed(5)
        .build()
        .expect("configuration must be valid")
        .run()
        .expect("generation must succeed");
    for entry in batch.entries() {
        assert!(entry
            .suite
            .animations()
            .iter()
            .all(|animation| animation.anim_length == 1500));
    }
}
