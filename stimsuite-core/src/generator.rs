//! Suite generation entry point.
//!
//! A [`Generator`] is a validated, immutable configuration. Each
//! [`Generator::run`] call constructs a fresh [`CoverageTracker`] so repeated
//! runs are independent and reproducible (given a seed for random-flip).

use tracing::{info, instrument};

use crate::{
    Result,
    builder::GenerationStrategy,
    domain::DomainSet,
    strategy::{cyclic, random_flip},
    suite::Batch,
    tracker::CoverageTracker,
};

/// Executes one generation run per the configured strategy.
///
/// Construct via [`crate::GeneratorBuilder`].
///
/// # Examples
/// ```
/// use stimsuite_core::{GenerationStrategy, GeneratorBuilder};
///
/// let generator = GeneratorBuilder::new()
///     .with_strategy(GenerationStrategy::CyclicAssignment)
///     .build()
///     .expect("builder must succeed");
/// let batch = generator.run().expect("run must succeed");
/// assert_eq!(batch.len(), 27);
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    domains: DomainSet,
    strategy: GenerationStrategy,
    suite_count: usize,
    anim_length: u32,
    seed: Option<u64>,
    default_pool_indices: [Vec<usize>; 3],
}

impl Generator {
    pub(crate) const fn new(
        domains: DomainSet,
        strategy: GenerationStrategy,
        suite_count: usize,
        anim_length: u32,
        seed: Option<u64>,
        default_pool_indices: [Vec<usize>; 3],
    ) -> Self {
        Self {
            domains,
            strategy,
            suite_count,
            anim_length,
            seed,
            default_pool_indices,
        }
    }

    /// Returns the attribute domains this generator draws from.
    #[must_use]
    pub const fn domains(&self) -> &DomainSet {
        &self.domains
    }

    /// Returns the configured generation strategy.
    #[must_use]
    pub const fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    /// Returns the number of suites a run will produce.
    #[must_use]
    pub const fn suite_count(&self) -> usize {
        self.suite_count
    }

    /// Returns the animation duration in milliseconds.
    #[must_use]
    pub const fn anim_length(&self) -> u32 {
        self.anim_length
    }

    /// Returns the RNG seed, when one was configured.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(crate) const fn default_pool_indices(&self) -> &[Vec<usize>; 3] {
        &self.default_pool_indices
    }

    /// Runs the configured strategy and returns the generated batch.
    ///
    /// Generation is sequential by design: the cyclic strategy's cursors are
    /// shared mutable state that must advance in generation order.
    ///
    /// # Errors
    /// Returns [`crate::GenerateError::Exhausted`] when the cyclic strategy
    /// cannot find a unique suite signature within its retry budget, and
    /// [`crate::GenerateError::DuplicateDefaults`] when a default
    /// combination would be consumed twice outside the allowed reuse phase.
    /// Suites assembled before the failure are discarded with the run; no
    /// partial batch is returned.
    #[instrument(
        name = "core.generate",
        err,
        skip(self),
        fields(
            strategy = ?self.strategy,
            suites = self.suite_count,
            seed = self.seed,
        ),
    )]
    pub fn run(&self) -> Result<Batch> {
        let mut tracker = CoverageTracker::new(self.domains.clone());
        let entries = match self.strategy {
            GenerationStrategy::RandomFlip => random_flip::generate(self, &mut tracker)?,
            GenerationStrategy::CyclicAssignment => cyclic::generate(self, &mut tracker)?,
        };
        let coverage = tracker.report();
        info!(
            suites = entries.len(),
            defaults_used = coverage.defaults_used,
            "generation completed"
        );
        Ok(Batch::new(entries, coverage))
    }
}
