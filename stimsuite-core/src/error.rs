//! Error types for suite generation.
//!
//! Generation failures are fatal for the run: suites already handed to the
//! caller are not rolled back. Callers needing atomicity should generate into
//! a staging area and move the whole batch on success. Verification findings
//! are not errors; the verifier returns a report instead (see
//! [`crate::verify`]).

use std::fmt;

use thiserror::Error;

use crate::domain::Attribute;

/// An error produced while configuring or running a [`crate::Generator`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    /// A domain held fewer than two values, so no transitions exist.
    /// Detected before any generation begins and never retried.
    #[error("domain for {attribute} has {values} value(s); at least 2 are required")]
    DegenerateDomain {
        /// Attribute whose domain is unusable.
        attribute: Attribute,
        /// Number of values the domain held.
        values: usize,
    },
    /// A domain held a value of the wrong kind for its attribute (the wire
    /// format carries numbers for irregularity and aspect ratio, strings for
    /// colour).
    #[error("domain value {value} for {attribute} has the wrong kind for the wire format")]
    MistypedDomainValue {
        /// Attribute whose domain is mistyped.
        attribute: Attribute,
        /// Rendered offending value.
        value: String,
    },
    /// A random-flip default pool was empty.
    #[error("default pool for {attribute} is empty")]
    EmptyDefaultPool {
        /// Attribute whose pool held no values.
        attribute: Attribute,
    },
    /// A random-flip default pool named a value outside its domain.
    #[error("default pool value {value} for {attribute} is not in the domain")]
    PoolValueOutsideDomain {
        /// Attribute whose pool is invalid.
        attribute: Attribute,
        /// Rendered offending value.
        value: String,
    },
    /// The requested suite count cannot cover every default combination.
    #[error(
        "requested {requested} suite(s) but covering every default combination requires {required}"
    )]
    CoverageInfeasible {
        /// Suite count the caller asked for.
        requested: usize,
        /// Minimum suite count needed for full default coverage.
        required: usize,
    },
    /// A default combination was about to be consumed twice outside the
    /// explicitly allowed post-exhaustion reuse phase.
    #[error("default combination ({defaults}) has already been used in this run")]
    DuplicateDefaults {
        /// Rendered default combination.
        defaults: String,
    },
    /// The cyclic strategy could not find a unique suite signature within
    /// its retry budget.
    #[error(
        "no unique suite found for default combination ({defaults}) after {attempts} attempt(s); \
         {emitted} suite(s) were emitted before the failure and are not rolled back"
    )]
    Exhausted {
        /// Rendered default combination being assigned when the search gave
        /// up.
        defaults: String,
        /// Number of candidate suites tried.
        attempts: usize,
        /// Suites successfully emitted before the failure.
        emitted: usize,
    },
}

/// Stable machine-readable codes describing [`GenerateError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GenerateErrorCode {
    /// A domain held fewer than two values.
    DegenerateDomain,
    /// A domain value had the wrong kind for its attribute.
    MistypedDomainValue,
    /// A default pool was empty.
    EmptyDefaultPool,
    /// A default pool value fell outside its domain.
    PoolValueOutsideDomain,
    /// The requested suite count was below the coverage minimum.
    CoverageInfeasible,
    /// A default combination would have been consumed twice.
    DuplicateDefaults,
    /// The retry budget ran out before a unique signature was found.
    Exhausted,
}

impl GenerateErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DegenerateDomain => "STIMSUITE_DEGENERATE_DOMAIN",
            Self::MistypedDomainValue => "STIMSUITE_MISTYPED_DOMAIN_VALUE",
            Self::EmptyDefaultPool => "STIMSUITE_EMPTY_DEFAULT_POOL",
            Self::PoolValueOutsideDomain => "STIMSUITE_POOL_VALUE_OUTSIDE_DOMAIN",
            Self::CoverageInfeasible => "STIMSUITE_COVERAGE_INFEASIBLE",
            Self::DuplicateDefaults => "STIMSUITE_DUPLICATE_DEFAULTS",
            Self::Exhausted => "STIMSUITE_EXHAUSTED",
        }
    }
}

impl fmt::Display for GenerateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GenerateError {
    /// Retrieves the stable [`GenerateErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GenerateErrorCode {
        match self {
            Self::DegenerateDomain { .. } => GenerateErrorCode::DegenerateDomain,
            Self::MistypedDomainValue { .. } => GenerateErrorCode::MistypedDomainValue,
            Self::EmptyDefaultPool { .. } => GenerateErrorCode::EmptyDefaultPool,
            Self::PoolValueOutsideDomain { .. } => GenerateErrorCode::PoolValueOutsideDomain,
            Self::CoverageInfeasible { .. } => GenerateErrorCode::CoverageInfeasible,
            Self::DuplicateDefaults { .. } => GenerateErrorCode::DuplicateDefaults,
            Self::Exhausted { .. } => GenerateErrorCode::Exhausted,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GenerateError>;
