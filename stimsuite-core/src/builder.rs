//! Builder utilities for configuring suite generation.
//!
//! Exposes the generation strategy selection surface and the configuration
//! validation performed before constructing [`Generator`] instances. All
//! configuration errors are caught here, before any generation begins.

use crate::{
    Result,
    domain::{AttrValue, Attribute, DefaultPools, DomainSet},
    error::GenerateError,
    generator::Generator,
};

/// Selects how [`Generator::run`] assigns transitions to suites.
///
/// Both strategies satisfy the same per-suite invariants (every unordered
/// value pair of every attribute covered exactly once); they differ in their
/// cross-suite guarantees. `RandomFlip` randomises transition directions
/// independently per suite. `CyclicAssignment` walks a rotating window over
/// the full ordered-transition pool, guaranteeing globally unique suite
/// signatures and exactly one suite per default combination until the
/// combination space is exhausted.
///
/// # Examples
/// ```
/// use stimsuite_core::GenerationStrategy;
///
/// let strategy = GenerationStrategy::CyclicAssignment;
/// assert!(matches!(strategy, GenerationStrategy::CyclicAssignment));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    /// Invert the direction of one random canonical transition per
    /// attribute, independently per suite.
    RandomFlip,
    /// Deterministically rotate through the full transition pool with
    /// collision detection and bounded retry.
    CyclicAssignment,
}

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use stimsuite_core::{GenerationStrategy, GeneratorBuilder};
///
/// let generator = GeneratorBuilder::new()
///     .with_strategy(GenerationStrategy::CyclicAssignment)
///     .with_suite_count(27)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.suite_count(), 27);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    domains: DomainSet,
    strategy: GenerationStrategy,
    suite_count: Option<usize>,
    anim_length: u32,
    seed: Option<u64>,
    default_pools: DefaultPools,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            domains: DomainSet::default(),
            strategy: GenerationStrategy::RandomFlip,
            suite_count: None,
            anim_length: crate::suite::DEFAULT_ANIM_LENGTH,
            seed: None,
            default_pools: DefaultPools::default(),
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with the canonical experiment
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the attribute domains.
    #[must_use]
    pub fn with_domains(mut self, domains: DomainSet) -> Self {
        self.domains = domains;
        self
    }

    /// Returns the configured attribute domains.
    #[must_use]
    pub const fn domains(&self) -> &DomainSet {
        &self.domains
    }

    /// Sets the generation strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured generation strategy.
    #[must_use]
    pub const fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    /// Sets the number of suites to generate.
    ///
    /// When unset, random-flip generates one suite per default-pool
    /// combination and cyclic assignment one suite per domain combination.
    #[must_use]
    pub const fn with_suite_count(mut self, count: usize) -> Self {
        self.suite_count = Some(count);
        self
    }

    /// Sets the animation duration in milliseconds.
    #[must_use]
    pub const fn with_anim_length(mut self, anim_length: u32) -> Self {
        self.anim_length = anim_length;
        self
    }

    /// Seeds the random number generator so random-flip runs reproduce.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the per-attribute default value pools used by the
    /// random-flip strategy.
    #[must_use]
    pub fn with_default_pools(mut self, pools: DefaultPools) -> Self {
        self.default_pools = pools;
        self
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns [`GenerateError::DegenerateDomain`] when a domain has fewer
    /// than two values, [`GenerateError::MistypedDomainValue`] when a domain
    /// mixes value kinds the wire format cannot carry,
    /// [`GenerateError::EmptyDefaultPool`] or
    /// [`GenerateError::PoolValueOutsideDomain`] when random-flip default
    /// pools are unusable, and [`GenerateError::CoverageInfeasible`] when
    /// the requested cyclic suite count cannot cover every default
    /// combination.
    pub fn build(self) -> Result<Generator> {
        for domain in self.domains.iter() {
            if domain.len() < 2 {
                return Err(GenerateError::DegenerateDomain {
                    attribute: domain.attribute(),
                    values: domain.len(),
                });
            }
            for value in domain.values() {
                if !value_fits_attribute(domain.attribute(), value) {
                    return Err(GenerateError::MistypedDomainValue {
                        attribute: domain.attribute(),
                        value: value.to_string(),
                    });
                }
            }
        }

        let suite_count = match self.strategy {
            GenerationStrategy::RandomFlip => {
                let pool_indices = self.resolve_default_pools()?;
                let combinations: usize = pool_indices.iter().map(Vec::len).product();
                return Ok(Generator::new(
                    self.domains,
                    self.strategy,
                    self.suite_count.unwrap_or(combinations),
                    self.anim_length,
                    self.seed,
                    pool_indices,
                ));
            }
            GenerationStrategy::CyclicAssignment => {
                let required = self.domains.combination_count();
                let requested = self.suite_count.unwrap_or(required);
                if requested < required {
                    return Err(GenerateError::CoverageInfeasible {
                        requested,
                        required,
                    });
                }
                requested
            }
        };

        Ok(Generator::new(
            self.domains,
            self.strategy,
            suite_count,
            self.anim_length,
            self.seed,
            [Vec::new(), Vec::new(), Vec::new()],
        ))
    }

    /// Maps each default-pool value to its domain index.
    fn resolve_default_pools(&self) -> Result<[Vec<usize>; 3]> {
        let mut resolved: [Vec<usize>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for attribute in Attribute::ALL {
            let pool = self.default_pools.get(attribute);
            if pool.is_empty() {
                return Err(GenerateError::EmptyDefaultPool { attribute });
            }
            let domain = self.domains.get(attribute);
            let indices = &mut resolved[attribute.index()];
            for value in pool {
                let index = domain.index_of(value).ok_or_else(|| {
                    GenerateError::PoolValueOutsideDomain {
                        attribute,
                        value: value.to_string(),
                    }
                })?;
                indices.push(index);
            }
        }
        Ok(resolved)
    }
}

/// Checks that a domain value has the kind the wire format expects for its
/// attribute: numbers for irregularity and aspect ratio, labels for colour.
fn value_fits_attribute(attribute: Attribute, value: &AttrValue) -> bool {
    match attribute {
        Attribute::Irregularity | Attribute::AspectRatio => {
            matches!(value, AttrValue::Number(_))
        }
        Attribute::Color => matches!(value, AttrValue::Label(_)),
    }
}
