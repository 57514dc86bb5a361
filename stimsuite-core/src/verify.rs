//! Independent suite verification.
//!
//! The verifier trusts nothing from the generator. Given persisted
//! animations it re-derives, per suite, the changing attribute of each
//! animation, the implied default values, and the per-attribute transition
//! sets, then checks every invariant from scratch. All violations are
//! accumulated; the verifier never stops at the first finding and never
//! panics on malformed input.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    domain::{AttrValue, Attribute, DomainSet},
    suite::Suite,
};

/// A single invariant violation found by the verifier.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Violation {
    /// The suite holds the wrong number of animations.
    #[error("suite has {got} animations, expected {expected}")]
    AnimationCount {
        /// Expected animation count for the domains.
        expected: usize,
        /// Observed animation count.
        got: usize,
    },
    /// An animation changes a number of attributes other than one.
    #[error(
        "animation {index} changes {} attribute(s) [{}], expected exactly 1",
        .attributes.len(),
        .attributes.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", "),
    )]
    ChangingAttributeCount {
        /// Position of the offending animation within the suite.
        index: usize,
        /// The attributes whose values differ between start and end state.
        attributes: Vec<Attribute>,
    },
    /// An attribute is varied by the wrong number of animations.
    #[error("{attribute} is varied by {got} animation(s), expected {expected}")]
    PerAttributeCount {
        /// Attribute whose animation count is off.
        attribute: Attribute,
        /// Expected count, the attribute's unordered pair count.
        expected: usize,
        /// Observed count.
        got: usize,
    },
    /// A state referenced a value outside the attribute's expected domain.
    #[error("{attribute} value {value} is outside the expected domain")]
    ValueOutsideDomain {
        /// Attribute whose value is unexpected.
        attribute: Attribute,
        /// The offending value as persisted.
        value: AttrValue,
    },
    /// A recorded transition does not change its value. Unreachable when
    /// transitions are derived by diffing states, but checked regardless: a
    /// changing attribute with no actual change is a contradiction to flag,
    /// not ignore.
    #[error("{attribute} transition {value} -> {value} does not change the value")]
    StalledTransition {
        /// Attribute whose transition is degenerate.
        attribute: Attribute,
        /// The repeated value.
        value: AttrValue,
    },
    /// An unordered value pair is never animated for an attribute.
    #[error("{attribute} pair ({a}, {b}) is missing")]
    MissingPair {
        /// Attribute whose coverage is incomplete.
        attribute: Attribute,
        /// Lower-ordered value of the missing pair.
        a: AttrValue,
        /// Higher-ordered value of the missing pair.
        b: AttrValue,
    },
    /// An unordered value pair is animated more than once.
    #[error("{attribute} pair ({a}, {b}) appears {count} times, expected once")]
    DuplicatedPair {
        /// Attribute whose coverage is duplicated.
        attribute: Attribute,
        /// Lower-ordered value of the duplicated pair.
        a: AttrValue,
        /// Higher-ordered value of the duplicated pair.
        b: AttrValue,
        /// Number of animations realising the pair.
        count: usize,
    },
    /// A non-changing attribute disagrees with the default derived from
    /// earlier animations in the same suite.
    #[error("animation {index} holds {attribute}={found} but the suite default is {expected}")]
    InconsistentDefault {
        /// Position of the disagreeing animation.
        index: usize,
        /// Attribute whose default is inconsistent.
        attribute: Attribute,
        /// Default derived from earlier animations.
        expected: AttrValue,
        /// Conflicting value observed.
        found: AttrValue,
    },
    /// Two suites in a batch derive the same default combination.
    #[error("suite `{suite}` duplicates the default combination of suite `{other}`")]
    DuplicateDefaults {
        /// Name of the later suite.
        suite: String,
        /// Name of the suite that used the combination first.
        other: String,
    },
}

/// The verifier's findings for one suite.
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    violations: Vec<Violation>,
    defaults: Option<[AttrValue; 3]>,
}

impl SuiteReport {
    /// Returns `true` when no violations were found.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns every violation found, in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the default combination derived from the suite's
    /// non-changing attributes, when one could be derived consistently.
    #[must_use]
    pub const fn defaults(&self) -> Option<&[AttrValue; 3]> {
        self.defaults.as_ref()
    }
}

/// The verifier's findings for a whole batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    suites: Vec<(String, SuiteReport)>,
    batch_violations: Vec<Violation>,
}

impl BatchReport {
    /// Returns `true` when no suite-level or batch-level violations were
    /// found.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.batch_violations.is_empty()
            && self.suites.iter().all(|(_, report)| report.passed())
    }

    /// Returns the per-suite reports in input order.
    #[must_use]
    pub fn suites(&self) -> &[(String, SuiteReport)] {
        &self.suites
    }

    /// Returns the cross-suite violations (duplicate default combinations).
    #[must_use]
    pub fn batch_violations(&self) -> &[Violation] {
        &self.batch_violations
    }

    /// Returns the total number of violations across all suites and the
    /// batch-level checks.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.batch_violations.len()
            + self
                .suites
                .iter()
                .map(|(_, report)| report.violations().len())
                .sum::<usize>()
    }
}

/// Verifies one suite against the expected domains, re-deriving everything
/// from the raw animation data.
#[must_use]
pub fn verify_suite(domains: &DomainSet, suite: &Suite) -> SuiteReport {
    let mut violations = Vec::new();

    let expected_animations = domains.animations_per_suite();
    if suite.len() != expected_animations {
        violations.push(Violation::AnimationCount {
            expected: expected_animations,
            got: suite.len(),
        });
    }

    // First pass: classify each animation and derive the suite defaults
    // from whatever each animation leaves unchanged.
    let mut per_attribute: [Vec<(AttrValue, AttrValue)>; 3] =
        [Vec::new(), Vec::new(), Vec::new()];
    let mut defaults: [Option<AttrValue>; 3] = [None, None, None];
    let mut defaults_consistent = true;

    for (index, animation) in suite.animations().iter().enumerate() {
        let changed = animation.changed_attributes();
        if changed.len() != 1 {
            violations.push(Violation::ChangingAttributeCount {
                index,
                attributes: changed.clone(),
            });
        }

        for attribute in Attribute::ALL {
            if changed.contains(&attribute) {
                if changed.len() == 1 {
                    per_attribute[attribute.index()].push((
                        animation.start_state.value(attribute),
                        animation.end_state.value(attribute),
                    ));
                }
            } else {
                let found = animation.start_state.value(attribute);
                match &defaults[attribute.index()] {
                    None => defaults[attribute.index()] = Some(found),
                    Some(expected) if *expected != found => {
                        defaults_consistent = false;
                        violations.push(Violation::InconsistentDefault {
                            index,
                            attribute,
                            expected: expected.clone(),
                            found,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    // Second pass: per-attribute coverage, checked against the domain.
    for attribute in Attribute::ALL {
        let domain = domains.get(attribute);
        let recorded = &per_attribute[attribute.index()];
        if recorded.len() != domain.pair_count() {
            violations.push(Violation::PerAttributeCount {
                attribute,
                expected: domain.pair_count(),
                got: recorded.len(),
            });
            continue;
        }

        let mut pair_counts: HashMap<(usize, usize), usize> = HashMap::new();
        for (start, end) in recorded {
            if start == end {
                violations.push(Violation::StalledTransition {
                    attribute,
                    value: start.clone(),
                });
                continue;
            }
            let start_index = domain.index_of(start);
            let end_index = domain.index_of(end);
            for (value, mapped) in [(start, start_index), (end, end_index)] {
                if mapped.is_none() {
                    violations.push(Violation::ValueOutsideDomain {
                        attribute,
                        value: value.clone(),
                    });
                }
            }
            if let (Some(s), Some(e)) = (start_index, end_index) {
                let pair = if s <= e { (s, e) } else { (e, s) };
                *pair_counts.entry(pair).or_insert(0) += 1;
            }
        }

        let values = domain.values();
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate().skip(i + 1) {
                match pair_counts.get(&(i, j)).copied().unwrap_or(0) {
                    0 => violations.push(Violation::MissingPair {
                        attribute,
                        a: a.clone(),
                        b: b.clone(),
                    }),
                    1 => {}
                    count => violations.push(Violation::DuplicatedPair {
                        attribute,
                        a: a.clone(),
                        b: b.clone(),
                        count,
                    }),
                }
            }
        }
    }

    let derived = if defaults_consistent {
        match defaults {
            [Some(irregularity), Some(aspect_ratio), Some(color)] => {
                Some([irregularity, aspect_ratio, color])
            }
            _ => None,
        }
    } else {
        None
    };

    SuiteReport {
        violations,
        defaults: derived,
    }
}

/// Verifies a named batch of suites: every per-suite invariant plus
/// cross-suite uniqueness of derived default combinations.
///
/// # Examples
/// ```
/// use stimsuite_core::{DomainSet, GenerationStrategy, GeneratorBuilder, verify_batch};
///
/// let batch = GeneratorBuilder::new()
///     .with_strategy(GenerationStrategy::CyclicAssignment)
///     .build()
///     .expect("builder must succeed")
///     .run()
///     .expect("run must succeed");
/// let named: Vec<(String, _)> = batch
///     .entries()
///     .iter()
///     .enumerate()
///     .map(|(i, entry)| (format!("suite-{i}"), entry.suite.clone()))
///     .collect();
/// let report = verify_batch(&DomainSet::default(), &named);
/// assert!(report.passed());
/// ```
#[instrument(name = "core.verify", skip(domains, suites), fields(suites = suites.len()))]
#[must_use]
pub fn verify_batch(domains: &DomainSet, suites: &[(String, Suite)]) -> BatchReport {
    let mut reports = Vec::with_capacity(suites.len());
    let mut batch_violations = Vec::new();
    let mut seen_defaults: Vec<(String, [AttrValue; 3])> = Vec::new();

    for (name, suite) in suites {
        let report = verify_suite(domains, suite);
        if let Some(defaults) = report.defaults() {
            if let Some((other, _)) = seen_defaults
                .iter()
                .find(|(_, existing)| existing == defaults)
            {
                batch_violations.push(Violation::DuplicateDefaults {
                    suite: name.clone(),
                    other: other.clone(),
                });
            } else {
                seen_defaults.push((name.clone(), defaults.clone()));
            }
        }
        reports.push((name.clone(), report));
    }

    let report = BatchReport {
        suites: reports,
        batch_violations,
    };
    info!(
        passed = report.passed(),
        violations = report.violation_count(),
        "batch verification completed"
    );
    report
}
