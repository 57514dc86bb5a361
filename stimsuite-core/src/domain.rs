//! Attribute domain model for animated shape stimuli.
//!
//! Defines the three perceptual attributes, their finite value domains, and
//! the derivation of ordered transitions between domain values. Domains and
//! transition lists are fixed for the duration of a generation run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three perceptual dimensions a stimulus animation can vary.
///
/// # Examples
/// ```
/// use stimsuite_core::Attribute;
///
/// assert_eq!(Attribute::ALL.len(), 3);
/// assert_eq!(Attribute::Color.as_str(), "color");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Attribute {
    /// Boundary irregularity of the shape outline.
    Irregularity,
    /// Width-to-height aspect ratio.
    AspectRatio,
    /// Fill colour.
    Color,
}

impl Attribute {
    /// All attributes in canonical animation order.
    pub const ALL: [Self; 3] = [Self::Irregularity, Self::AspectRatio, Self::Color];

    /// Returns the wire-format key for this attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Irregularity => "irregularity",
            Self::AspectRatio => "aspect_ratio",
            Self::Color => "color",
        }
    }

    /// Returns this attribute's position in [`Attribute::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Irregularity => 0,
            Self::AspectRatio => 1,
            Self::Color => 2,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute value: numeric for irregularity and aspect ratio,
/// categorical for colour.
///
/// Values compare exactly; no floating-point tolerance is applied anywhere.
/// Downstream matchers rely on the same literal constants recurring across
/// files, so the generator and verifier must never round or normalise.
///
/// # Examples
/// ```
/// use stimsuite_core::AttrValue;
///
/// assert_eq!(AttrValue::from(0.4), AttrValue::Number(0.4));
/// assert_ne!(AttrValue::from("red"), AttrValue::from("green"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A numeric value (irregularity, aspect ratio).
    Number(f64),
    /// A categorical value (colour name).
    Label(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(label: &str) -> Self {
        Self::Label(label.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

/// An ordered transition between two domain values, stored as indices into
/// the owning [`Domain`]'s value list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Transition {
    /// Index of the start value.
    pub start: usize,
    /// Index of the end value.
    pub end: usize,
}

impl Transition {
    /// Creates a transition from start and end value indices.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the transition with start and end swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Returns the unordered pair this transition realises, lower index
    /// first.
    #[must_use]
    pub const fn unordered(self) -> (usize, usize) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// The ordered value list for one attribute.
///
/// # Examples
/// ```
/// use stimsuite_core::{Attribute, Domain};
///
/// let domain = Domain::new(
///     Attribute::Irregularity,
///     vec![0.0.into(), 0.4.into(), 1.0.into()],
/// );
/// assert_eq!(domain.canonical_transitions().len(), 3);
/// assert_eq!(domain.all_transitions().len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    attribute: Attribute,
    values: Vec<AttrValue>,
}

impl Domain {
    /// Creates a domain from an ordered value list.
    ///
    /// Degenerate domains (fewer than two values) are representable but are
    /// rejected by [`crate::GeneratorBuilder::build`] before any generation
    /// begins.
    #[must_use]
    pub const fn new(attribute: Attribute, values: Vec<AttrValue>) -> Self {
        Self { attribute, values }
    }

    /// Returns the attribute this domain describes.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Returns the ordered value list.
    #[must_use]
    pub fn values(&self) -> &[AttrValue] {
        &self.values
    }

    /// Returns the number of values in the domain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the domain holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&AttrValue> {
        self.values.get(index)
    }

    /// Finds the index of `value` by exact comparison.
    #[must_use]
    pub fn index_of(&self, value: &AttrValue) -> Option<usize> {
        self.values.iter().position(|candidate| candidate == value)
    }

    /// Returns the number of unordered value pairs, `n·(n−1)/2`.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        let n = self.values.len();
        n * n.saturating_sub(1) / 2
    }

    /// Returns one canonical "forward" transition per unordered value pair:
    /// every `(i, j)` with `i < j` in the domain's fixed value ordering.
    #[must_use]
    pub fn canonical_transitions(&self) -> Vec<Transition> {
        let n = self.values.len();
        let mut transitions = Vec::with_capacity(self.pair_count());
        for start in 0..n {
            for end in (start + 1)..n {
                transitions.push(Transition::new(start, end));
            }
        }
        transitions
    }

    /// Returns all `n·(n−1)` ordered transitions: the canonical list followed
    /// by the reversed canonical list.
    ///
    /// That layout makes the unordered pair of entry `k` depend only on
    /// `k mod pair_count()`, so any window of `pair_count()` consecutive
    /// entries (taken cyclically) covers every unordered pair exactly once.
    /// The cyclic assignment strategy relies on this.
    #[must_use]
    pub fn all_transitions(&self) -> Vec<Transition> {
        let canonical = self.canonical_transitions();
        let mut transitions = Vec::with_capacity(canonical.len() * 2);
        transitions.extend(canonical.iter().copied());
        transitions.extend(canonical.iter().map(|t| t.reversed()));
        transitions
    }
}

/// One domain per attribute.
///
/// The default set is the canonical configuration used by the original
/// experiments: irregularity `{0, 0.4, 1}`, aspect ratio `{0.2, 0.5, 1}`,
/// colour `{red, green, blue}`.
///
/// # Examples
/// ```
/// use stimsuite_core::{Attribute, DomainSet};
///
/// let domains = DomainSet::default();
/// assert_eq!(domains.get(Attribute::Color).len(), 3);
/// assert_eq!(domains.combination_count(), 27);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DomainSet {
    domains: [Domain; 3],
}

impl DomainSet {
    /// Creates a domain set from one domain per attribute, in
    /// [`Attribute::ALL`] order.
    #[must_use]
    pub const fn new(irregularity: Domain, aspect_ratio: Domain, color: Domain) -> Self {
        Self {
            domains: [irregularity, aspect_ratio, color],
        }
    }

    /// Returns the domain for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> &Domain {
        &self.domains[attribute.index()]
    }

    /// Iterates over the domains in [`Attribute::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.iter()
    }

    /// Returns the size of the Cartesian product of all three domains, i.e.
    /// the number of distinct default combinations.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.domains.iter().map(Domain::len).product()
    }

    /// Returns the number of animations in a coverage-complete suite: the
    /// sum of each attribute's unordered pair count.
    #[must_use]
    pub fn animations_per_suite(&self) -> usize {
        self.domains.iter().map(Domain::pair_count).sum()
    }

    /// Renders a default combination (given as per-attribute value indices)
    /// for diagnostics, e.g. `irregularity=0, aspect_ratio=0.2, color=red`.
    #[must_use]
    pub fn describe_combination(&self, defaults: [usize; 3]) -> String {
        let mut parts = Vec::with_capacity(defaults.len());
        for attribute in Attribute::ALL {
            let rendered = self
                .get(attribute)
                .value(defaults[attribute.index()])
                .map_or_else(|| "?".to_owned(), ToString::to_string);
            parts.push(format!("{attribute}={rendered}"));
        }
        parts.join(", ")
    }
}

impl Default for DomainSet {
    fn default() -> Self {
        Self::new(
            Domain::new(
                Attribute::Irregularity,
                vec![0.0.into(), 0.4.into(), 1.0.into()],
            ),
            Domain::new(
                Attribute::AspectRatio,
                vec![0.2.into(), 0.5.into(), 1.0.into()],
            ),
            Domain::new(
                Attribute::Color,
                vec!["red".into(), "green".into(), "blue".into()],
            ),
        )
    }
}

/// Per-attribute pools of permitted default values for the random-flip
/// strategy.
///
/// The defaults of successive suites are drawn from the Cartesian product of
/// these pools. The default pools mirror the original generator: two values
/// per attribute, giving eight default combinations.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultPools {
    pools: [Vec<AttrValue>; 3],
}

impl DefaultPools {
    /// Creates default pools from one value list per attribute, in
    /// [`Attribute::ALL`] order.
    #[must_use]
    pub const fn new(
        irregularity: Vec<AttrValue>,
        aspect_ratio: Vec<AttrValue>,
        color: Vec<AttrValue>,
    ) -> Self {
        Self {
            pools: [irregularity, aspect_ratio, color],
        }
    }

    /// Returns the pool for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> &[AttrValue] {
        &self.pools[attribute.index()]
    }

    /// Returns the size of the Cartesian product of the pools.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.pools.iter().map(Vec::len).product()
    }
}

impl Default for DefaultPools {
    fn default() -> Self {
        Self::new(
            vec![0.0.into(), 0.4.into()],
            vec![0.2.into(), 0.5.into()],
            vec!["red".into(), "green".into()],
        )
    }
}
