//! Data model for animation suites.
//!
//! A suite is an ordered sequence of single-attribute-change animations.
//! Suites are constructed in one pass, immutable once emitted, and serialise
//! to the wire format consumed by the experiment front end: a bare JSON array
//! of `{anim_length, start_state, end_state}` objects.

use serde::{Deserialize, Serialize};

use crate::domain::{AttrValue, Attribute, Transition};
use crate::tracker::CoverageReport;

/// Animation duration applied to every generated animation, in milliseconds.
pub const DEFAULT_ANIM_LENGTH: u32 = 3000;

/// A complete description of the shape at one instant.
///
/// Field names and value shapes are part of the persisted wire format:
/// numbers for `irregularity` and `aspect_ratio`, a string for `color`.
///
/// # Examples
/// ```
/// use stimsuite_core::{Attribute, AttrValue, ShapeState};
///
/// let state = ShapeState::new(0.0, 0.2, "red");
/// assert_eq!(state.value(Attribute::Color), AttrValue::from("red"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeState {
    /// Boundary irregularity, one of the irregularity domain values.
    pub irregularity: f64,
    /// Aspect ratio, one of the aspect-ratio domain values.
    pub aspect_ratio: f64,
    /// Colour name, one of the colour domain values.
    pub color: String,
}

impl ShapeState {
    /// Creates a state from explicit attribute values.
    #[must_use]
    pub fn new(irregularity: f64, aspect_ratio: f64, color: impl Into<String>) -> Self {
        Self {
            irregularity,
            aspect_ratio,
            color: color.into(),
        }
    }

    /// Returns the value this state holds for `attribute`.
    #[must_use]
    pub fn value(&self, attribute: Attribute) -> AttrValue {
        match attribute {
            Attribute::Irregularity => AttrValue::Number(self.irregularity),
            Attribute::AspectRatio => AttrValue::Number(self.aspect_ratio),
            Attribute::Color => AttrValue::Label(self.color.clone()),
        }
    }
}

/// One animated transition between two states differing in exactly one
/// attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Duration of the animation in milliseconds.
    pub anim_length: u32,
    /// State the animation starts from.
    pub start_state: ShapeState,
    /// State the animation ends at.
    pub end_state: ShapeState,
}

impl Animation {
    /// Creates an animation between two states.
    #[must_use]
    pub const fn new(anim_length: u32, start_state: ShapeState, end_state: ShapeState) -> Self {
        Self {
            anim_length,
            start_state,
            end_state,
        }
    }

    /// Returns the attributes whose value differs between start and end
    /// state, compared exactly.
    #[must_use]
    pub fn changed_attributes(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|&attribute| {
                self.start_state.value(attribute) != self.end_state.value(attribute)
            })
            .collect()
    }
}

/// An ordered sequence of animations forming one coverage-complete suite.
///
/// Serialises as a bare JSON array of animations.
///
/// # Examples
/// ```
/// use stimsuite_core::{Animation, ShapeState, Suite};
///
/// let suite = Suite::new(vec![Animation::new(
///     3000,
///     ShapeState::new(0.0, 0.2, "red"),
///     ShapeState::new(1.0, 0.2, "red"),
/// )]);
/// let json = serde_json::to_string(&suite).expect("suite serialises");
/// assert!(json.starts_with('['));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suite {
    animations: Vec<Animation>,
}

impl Suite {
    /// Creates a suite from an ordered animation list.
    #[must_use]
    pub const fn new(animations: Vec<Animation>) -> Self {
        Self { animations }
    }

    /// Returns the animations in suite order.
    #[must_use]
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Returns the number of animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Returns `true` when the suite holds no animations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// A canonicalised summary of a suite used to detect structural duplicates:
/// the default-value indices plus the per-attribute transition lists in
/// sorted order.
///
/// Two suites with equal signatures present the same stimuli, regardless of
/// the order their animations were assembled in.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
    defaults: [usize; 3],
    transitions: [Vec<Transition>; 3],
}

impl Signature {
    /// Builds a signature from default-value indices and per-attribute
    /// transitions, both in [`Attribute::ALL`] order. Transition order is
    /// canonicalised by sorting.
    #[must_use]
    pub fn new(defaults: [usize; 3], mut transitions: [Vec<Transition>; 3]) -> Self {
        for list in &mut transitions {
            list.sort_unstable();
        }
        Self {
            defaults,
            transitions,
        }
    }

    /// Returns the default-value indices in [`Attribute::ALL`] order.
    #[must_use]
    pub const fn defaults(&self) -> [usize; 3] {
        self.defaults
    }

    /// Returns the sorted transitions recorded for `attribute`.
    #[must_use]
    pub fn transitions(&self, attribute: Attribute) -> &[Transition] {
        &self.transitions[attribute.index()]
    }
}

/// One generated suite together with the default values it holds fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry {
    /// Default values in [`Attribute::ALL`] order.
    pub defaults: [AttrValue; 3],
    /// The generated suite.
    pub suite: Suite,
}

/// The ordered result of one generation run.
///
/// The coverage report describes the run that produced the suites; it is
/// informational only and is never consulted by the verifier, which re-derives
/// everything from the persisted animations.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    entries: Vec<BatchEntry>,
    coverage: CoverageReport,
}

impl Batch {
    pub(crate) const fn new(entries: Vec<BatchEntry>, coverage: CoverageReport) -> Self {
        Self { entries, coverage }
    }

    /// Returns the generated suites in generation order.
    #[must_use]
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Returns the number of suites in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the batch holds no suites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the coverage statistics recorded during generation.
    #[must_use]
    pub const fn coverage(&self) -> &CoverageReport {
        &self.coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(start: ShapeState, end: ShapeState) -> Animation {
        Animation::new(DEFAULT_ANIM_LENGTH, start, end)
    }

    #[test]
    fn changed_attributes_reports_each_differing_attribute() {
        let anim = animation(
            ShapeState::new(0.0, 0.2, "red"),
            ShapeState::new(1.0, 0.2, "blue"),
        );
        assert_eq!(
            anim.changed_attributes(),
            vec![Attribute::Irregularity, Attribute::Color]
        );
    }

    #[test]
    fn changed_attributes_is_empty_for_identical_states() {
        let state = ShapeState::new(0.4, 0.5, "green");
        let anim = animation(state.clone(), state);
        assert!(anim.changed_attributes().is_empty());
    }

    #[test]
    fn signature_ignores_transition_order() {
        let a = Signature::new(
            [0, 0, 0],
            [
                vec![Transition::new(0, 1), Transition::new(1, 2)],
                vec![],
                vec![],
            ],
        );
        let b = Signature::new(
            [0, 0, 0],
            [
                vec![Transition::new(1, 2), Transition::new(0, 1)],
                vec![],
                vec![],
            ],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn signature_distinguishes_direction() {
        let forward = Signature::new([0, 0, 0], [vec![Transition::new(0, 1)], vec![], vec![]]);
        let backward = Signature::new([0, 0, 0], [vec![Transition::new(1, 0)], vec![], vec![]]);
        assert_ne!(forward, backward);
    }

    #[test]
    fn suite_serialises_as_bare_array() {
        let suite = Suite::new(vec![animation(
            ShapeState::new(0.0, 0.2, "red"),
            ShapeState::new(0.4, 0.2, "red"),
        )]);
        let json = serde_json::to_value(&suite).expect("suite serialises");
        let array = json.as_array().expect("top level is an array");
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["anim_length"], 3000);
        assert_eq!(array[0]["start_state"]["color"], "red");
    }
}
