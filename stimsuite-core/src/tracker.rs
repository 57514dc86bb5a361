//! Run-scoped coverage and uniqueness bookkeeping.
//!
//! The tracker is an explicit context object constructed per generation run
//! and discarded with it. It records consumed default combinations, seen
//! suite signatures, and per-attribute transition tallies. The verifier
//! never consults this state; it re-derives everything from persisted
//! animations.

use std::collections::{HashMap, HashSet};

use crate::{
    Result,
    domain::{Attribute, DomainSet, Transition},
    error::GenerateError,
    suite::Signature,
};

/// Tracks coverage and uniqueness across one generation run.
///
/// Duplicate default combinations are an error unless explicitly allowed,
/// which only happens in the cyclic strategy's post-exhaustion reuse phase.
///
/// # Examples
/// ```
/// use stimsuite_core::{CoverageTracker, DomainSet};
///
/// let mut tracker = CoverageTracker::new(DomainSet::default());
/// tracker.claim_defaults([0, 0, 0], false).expect("first use");
/// tracker
///     .claim_defaults([0, 0, 0], false)
///     .expect_err("duplicate default combination is rejected");
/// ```
#[derive(Clone, Debug)]
pub struct CoverageTracker {
    domains: DomainSet,
    consumed_defaults: HashSet<[usize; 3]>,
    seen_signatures: HashSet<Signature>,
    tallies: [HashMap<Transition, usize>; 3],
    suites: usize,
}

impl CoverageTracker {
    /// Creates an empty tracker for a run over `domains`.
    #[must_use]
    pub fn new(domains: DomainSet) -> Self {
        Self {
            domains,
            consumed_defaults: HashSet::new(),
            seen_signatures: HashSet::new(),
            tallies: [HashMap::new(), HashMap::new(), HashMap::new()],
            suites: 0,
        }
    }

    /// Records consumption of a default combination.
    ///
    /// # Errors
    /// Returns [`GenerateError::DuplicateDefaults`] when the combination has
    /// already been consumed and `allow_reuse` is `false`.
    pub fn claim_defaults(&mut self, defaults: [usize; 3], allow_reuse: bool) -> Result<()> {
        if !self.consumed_defaults.insert(defaults) && !allow_reuse {
            return Err(GenerateError::DuplicateDefaults {
                defaults: self.domains.describe_combination(defaults),
            });
        }
        Ok(())
    }

    /// Returns `true` when `defaults` has already been consumed this run.
    #[must_use]
    pub fn defaults_consumed(&self, defaults: [usize; 3]) -> bool {
        self.consumed_defaults.contains(&defaults)
    }

    /// Returns `true` when a structurally identical suite has already been
    /// accepted.
    #[must_use]
    pub fn signature_seen(&self, signature: &Signature) -> bool {
        self.seen_signatures.contains(signature)
    }

    /// Records an accepted suite: its signature and the ordered transitions
    /// it exercises.
    pub fn record_suite(&mut self, signature: &Signature) {
        for attribute in Attribute::ALL {
            let tally = &mut self.tallies[attribute.index()];
            for transition in signature.transitions(attribute) {
                *tally.entry(*transition).or_insert(0) += 1;
            }
        }
        self.seen_signatures.insert(signature.clone());
        self.suites += 1;
    }

    /// Summarises the run's coverage so far.
    #[must_use]
    pub fn report(&self) -> CoverageReport {
        let attributes = Attribute::ALL
            .into_iter()
            .map(|attribute| {
                let domain = self.domains.get(attribute);
                AttributeCoverage {
                    attribute,
                    transitions_exercised: self.tallies[attribute.index()].len(),
                    transition_pool: domain.len() * domain.len().saturating_sub(1),
                }
            })
            .collect();
        CoverageReport {
            suites: self.suites,
            defaults_used: self.consumed_defaults.len(),
            default_combinations: self.domains.combination_count(),
            attributes,
        }
    }
}

/// End-of-run coverage statistics. Informational only; correctness gating
/// happens through [`CoverageTracker::claim_defaults`] and the signature
/// check during generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageReport {
    /// Number of suites accepted.
    pub suites: usize,
    /// Number of distinct default combinations consumed.
    pub defaults_used: usize,
    /// Size of the full default combination space.
    pub default_combinations: usize,
    /// Per-attribute ordered-transition coverage.
    pub attributes: Vec<AttributeCoverage>,
}

/// Ordered-transition coverage for one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeCoverage {
    /// The attribute described.
    pub attribute: Attribute,
    /// Distinct ordered transitions that appeared in at least one accepted
    /// suite.
    pub transitions_exercised: usize,
    /// Total ordered transitions available, `n·(n−1)`.
    pub transition_pool: usize,
}
