//! Tests for error rendering and the stable error-code surface.

use rstest::rstest;
use stimsuite_core::{Attribute, GenerateError, GenerateErrorCode};

#[rstest]
#[case(
    GenerateError::DegenerateDomain { attribute: Attribute::Irregularity, values: 1 },
    GenerateErrorCode::DegenerateDomain,
    "STIMSUITE_DEGENERATE_DOMAIN"
)]
#[case(
    GenerateError::MistypedDomainValue {
        attribute: Attribute::Color,
        value: "0.4".to_owned(),
    },
    GenerateErrorCode::MistypedDomainValue,
    "STIMSUITE_MISTYPED_DOMAIN_VALUE"
)]
#[case(
    GenerateError::EmptyDefaultPool { attribute: Attribute::AspectRatio },
    GenerateErrorCode::EmptyDefaultPool,
    "STIMSUITE_EMPTY_DEFAULT_POOL"
)]
#[case(
    GenerateError::PoolValueOutsideDomain {
        attribute: Attribute::Color,
        value: "magenta".to_owned(),
    },
    GenerateErrorCode::PoolValueOutsideDomain,
    "STIMSUITE_POOL_VALUE_OUTSIDE_DOMAIN"
)]
#[case(
    GenerateError::CoverageInfeasible { requested: 9, required: 27 },
    GenerateErrorCode::CoverageInfeasible,
    "STIMSUITE_COVERAGE_INFEASIBLE"
)]
#[case(
    GenerateError::DuplicateDefaults {
        defaults: "irregularity=0, aspect_ratio=0.2, color=red".to_owned(),
    },
    GenerateErrorCode::DuplicateDefaults,
    "STIMSUITE_DUPLICATE_DEFAULTS"
)]
#[case(
    GenerateError::Exhausted {
        defaults: "irregularity=0, aspect_ratio=0.2, color=red".to_owned(),
        attempts: 2,
        emitted: 5,
    },
    GenerateErrorCode::Exhausted,
    "STIMSUITE_EXHAUSTED"
)]
fn every_error_maps_to_a_stable_code(
    #[case] error: GenerateError,
    #[case] code: GenerateErrorCode,
    #[case] rendered: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(code.as_str(), rendered);
    assert_eq!(code.to_string(), rendered);
}

#[rstest]
fn messages_carry_enough_context_to_act_on() {
    let error = GenerateError::CoverageInfeasible {
        requested: 9,
        required: 27,
    };
    assert_eq!(
        error.to_string(),
        "requested 9 suite(s) but covering every default combination requires 27"
    );

    let error = GenerateError::Exhausted {
        defaults: "irregularity=0, aspect_ratio=0.2, color=red".to_owned(),
        attempts: 2,
        emitted: 5,
    };
    let rendered = error.to_string();
    assert!(rendered.contains("after 2 attempt(s)"));
    assert!(rendered.contains("5 suite(s) were emitted"));
}
