//! Randomised single-flip suite generation.
//!
//! For each attribute the canonical transition list already realises every
//! unordered value pair exactly once; flipping the direction of one
//! uniformly random entry therefore changes *which* direction a pair uses
//! without ever duplicating or omitting a pair. Each suite's flips are
//! independent; this strategy makes no cross-suite coverage promises.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::debug;

use crate::{
    Result,
    domain::{Attribute, Transition},
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
    let mut rng = cfg
        .seed()
        .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);

    let canonical: [Vec<Transition>; 3] =
        Attribute::ALL.map(|attribute| domains.get(attribute).canonical_transitions());
    let pools = cfg.default_pool_indices();
    let combinations = cartesian_combinations([&pools[0], &pools[1], &pools[2]]);

    let mut entries = Vec::with_capacity(cfg.suite_count());
    for index in 0..cfg.suite_count() {
        // Past the pool product the combination cycle restarts; random-flip
        // places no uniqueness constraint on defaults.
        let defaults = combinations[index % combinations.len()];

        let mut transitions = canonical.clone();
        for list in &mut transitions {
            let flip = rng.gen_range(0..list.len());
            list[flip] = list[flip].reversed();
        }

        let signature = Signature::new(defaults, transitions.clone());
        tracker.claim_defaults(defaults, true)?;
        tracker.record_suite(&signature);

        let entry = assemble_entry(domains, cfg.anim_length(), defaults, &transitions)?;
        debug!(
            suite = index,
            defaults = %domains.describe_combination(defaults),
            "suite assembled"
        );
        entries.push(entry);
    }
    Ok(entries)
}
