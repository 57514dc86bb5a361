//! Deterministic cyclic-assignment suite generation.
//!
//! One rotating cursor per attribute walks the full ordered-transition pool.
//! Because the pool lays out the canonical list followed by its reversals
//! (see [`crate::Domain::all_transitions`]), every window of `pair_count`
//! consecutive entries covers each unordered pair exactly once, so any
//! cursor position yields a coverage-complete suite. The rotation spreads
//! usage of all `n·(n−1)` ordered transitions roughly evenly across the
//! batch; the signature check prevents emitting two structurally identical
//! suites.
//!
//! The retry policy is deliberately shallow (shift all cursors by one, try
//! once more, then fail). A deeper search might satisfy batches this policy
//! rejects, but the shallow bound is the specified behaviour and is kept
//! as-is.

use tracing::{debug, warn};

use crate::{
    Result,
    domain::{Attribute, Transition},
    error::GenerateError,
    generator::Generator,
    strategy::{assemble_entry, cartesian_combinations},
    suite::{BatchEntry, Signature},
    tracker::CoverageTracker,
};

pub(crate) fn generate(
    cfg: &Generator,
    tracker: &mut CoverageTracker,
) -> Result<Vec<BatchEntry>> {
    let domains = cfg.domains();
    let pools: [Vec<Transition>; 3] =
        Attribute::ALL.map(|attribute| domains.get(attribute).all_transitions());
    let windows: [usize; 3] =
        Attribute::ALL.map(|attribute| domains.get(attribute).pair_count());

    let index_ranges: [Vec<usize>; 3] =
        Attribute::ALL.map(|attribute| (0..domains.get(attribute).len()).collect());
    let combinations =
        cartesian_combinations([&index_ranges[0], &index_ranges[1], &index_ranges[2]]);

    let mut cursors = [0usize; 3];
    let mut entries = Vec::with_capacity(cfg.suite_count());

    // First pass: exactly one suite per default combination, in fixed
    // Cartesian order.
    for &defaults in &combinations {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let transitions = slice_windows(&pools, windows, cursors);
            let signature = Signature::new(defaults, transitions.clone());
            if tracker.signature_seen(&signature) {
                // Different cursor positions can coincidentally select the
                // same window subsets; shift by one and try once more.
                if attempts >= 2 {
                    return Err(GenerateError::Exhausted {
                        defaults: domains.describe_combination(defaults),
                        attempts,
                        emitted: entries.len(),
                    });
                }
                warn!(
                    defaults = %domains.describe_combination(defaults),
                    "signature collision, shifting cursors"
                );
                advance(&mut cursors, &pools, [1, 1, 1]);
                continue;
            }

            tracker.claim_defaults(defaults, false)?;
            tracker.record_suite(&signature);
            advance(&mut cursors, &pools, windows);
            entries.push(assemble_entry(
                domains,
                cfg.anim_length(),
                defaults,
                &transitions,
            )?);
            break;
        }
    }

    // Reuse phase: once every combination has one suite, additional suites
    // may repeat default combinations, bounded by a global retry budget.
    let remaining = cfg.suite_count().saturating_sub(entries.len());
    if remaining > 0 {
        debug!(remaining, "default combinations exhausted, entering reuse phase");
        let mut budget = 3 * remaining;
        let mut next_combination = 0usize;
        while entries.len() < cfg.suite_count() {
            let defaults = combinations[next_combination % combinations.len()];
            next_combination += 1;

            let mut attempts = 0usize;
            loop {
                attempts += 1;
                let transitions = slice_windows(&pools, windows, cursors);
                let signature = Signature::new(defaults, transitions.clone());
                if tracker.signature_seen(&signature) {
                    if budget == 0 {
                        return Err(GenerateError::Exhausted {
                            defaults: domains.describe_combination(defaults),
                            attempts,
                            emitted: entries.len(),
                        });
                    }
                    budget -= 1;
                    advance(&mut cursors, &pools, [1, 1, 1]);
                    continue;
                }

                tracker.claim_defaults(defaults, true)?;
                tracker.record_suite(&signature);
                advance(&mut cursors, &pools, windows);
                entries.push(assemble_entry(
                    domains,
                    cfg.anim_length(),
                    defaults,
                    &transitions,
                )?);
                break;
            }
        }
    }

    Ok(entries)
}

/// Slices one window of consecutive transitions (mod pool length) per
/// attribute, starting at that attribute's cursor.
fn slice_windows(
    pools: &[Vec<Transition>; 3],
    windows: [usize; 3],
    cursors: [usize; 3],
) -> [Vec<Transition>; 3] {
    let mut sliced: [Vec<Transition>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (index, pool) in pools.iter().enumerate() {
        sliced[index] = (0..windows[index])
            .map(|offset| pool[(cursors[index] + offset) % pool.len()])
            .collect();
    }
    sliced
}

fn advance(cursors: &mut [usize; 3], pools: &[Vec<Transition>; 3], steps: [usize; 3]) {
    for (index, cursor) in cursors.iter_mut().enumerate() {
        *cursor = (*cursor + steps[index]) % pools[index].len();
    }
}
