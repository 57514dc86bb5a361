//! Stimsuite core library.
//!
//! Generates and verifies suites of perceptual-experiment animation stimuli.
//! Each suite animates a shape between two states that differ in exactly one
//! attribute (irregularity, aspect ratio, or colour), covering every
//! unordered value pair of every attribute exactly once while holding the
//! other attributes at the suite's default values.
//!
//! Generation offers two strategies behind one surface (see
//! [`GenerationStrategy`]); verification is a fully independent code path
//! that re-derives defaults and transitions from raw animation data and
//! reports every violation it finds (see [`verify_batch`]). File and
//! directory handling lives with callers; this crate only defines the wire
//! types.

mod builder;
mod domain;
mod error;
mod generator;
mod strategy;
mod suite;
mod tracker;
mod verify;

pub use crate::{
    builder::{GenerationStrategy, GeneratorBuilder},
    domain::{AttrValue, Attribute, DefaultPools, Domain, DomainSet, Transition},
    error::{GenerateError, GenerateErrorCode, Result},
    generator::Generator,
    suite::{Animation, Batch, BatchEntry, DEFAULT_ANIM_LENGTH, ShapeState, Signature, Suite},
    tracker::{AttributeCoverage, CoverageReport, CoverageTracker},
    verify::{BatchReport, SuiteReport, Violation, verify_batch, verify_suite},
};
