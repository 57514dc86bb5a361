//! Shared test utilities used across stimsuite crates.

pub mod fixtures {
    //! Hand-built suites and targeted corruptions for verifier tests.
    //!
    //! The fixtures use the canonical experiment scenario: irregularity
    //! `{0, 0.4, 1}`, aspect ratio `{0.2, 0.5, 1}`, colour
    //! `{red, green, blue}`, defaults `(0, 0.2, red)` unless overridden.

    use stimsuite_core::{Animation, DEFAULT_ANIM_LENGTH, DomainSet, ShapeState, Suite};

    /// Returns the canonical scenario domains.
    #[must_use]
    pub fn scenario_domains() -> DomainSet {
        DomainSet::default()
    }

    /// Builds a valid nine-animation suite with defaults `(0, 0.2, red)`:
    /// every unordered pair of every attribute animated once, canonical
    /// directions throughout.
    #[must_use]
    pub fn valid_suite() -> Suite {
        valid_suite_with_defaults(0.0, 0.2, "red")
    }

    /// Builds a valid suite holding the given default values.
    #[must_use]
    pub fn valid_suite_with_defaults(irregularity: f64, aspect_ratio: f64, color: &str) -> Suite {
        let irregularity_pairs = [(0.0, 0.4), (0.0, 1.0), (0.4, 1.0)];
        let aspect_pairs = [(0.2, 0.5), (0.2, 1.0), (0.5, 1.0)];
        let color_pairs = [("red", "green"), ("red", "blue"), ("green", "blue")];

        let mut animations = Vec::with_capacity(9);
        for (start, end) in irregularity_pairs {
            animations.push(animation(
                ShapeState::new(start, aspect_ratio, color),
                ShapeState::new(end, aspect_ratio, color),
            ));
        }
        for (start, end) in aspect_pairs {
            animations.push(animation(
                ShapeState::new(irregularity, start, color),
                ShapeState::new(irregularity, end, color),
            ));
        }
        for (start, end) in color_pairs {
            animations.push(animation(
                ShapeState::new(irregularity, aspect_ratio, start),
                ShapeState::new(irregularity, aspect_ratio, end),
            ));
        }
        Suite::new(animations)
    }

    /// Corrupts a suite by replacing the first irregularity animation's
    /// transition with a second realisation of the `(0.4, 1)` pair, leaving
    /// the `(0, 0.4)` pair missing and `(0.4, 1)` duplicated.
    #[must_use]
    pub fn with_duplicated_direction(suite: &Suite) -> Suite {
        rebuild(suite, |animations| {
            animations[0].start_state.irregularity = 1.0;
            animations[0].end_state.irregularity = 0.4;
        })
    }

    /// Corrupts a suite so its first animation changes two attributes at
    /// once (irregularity and aspect ratio).
    #[must_use]
    pub fn with_double_change(suite: &Suite) -> Suite {
        rebuild(suite, |animations| {
            animations[0].end_state.aspect_ratio = 0.5;
        })
    }

    /// Corrupts a suite so its first animation changes nothing: the end
    /// state's irregularity is forced back to the start value.
    #[must_use]
    pub fn with_stalled_transition(suite: &Suite) -> Suite {
        rebuild(suite, |animations| {
            animations[0].end_state.irregularity = animations[0].start_state.irregularity;
        })
    }

    /// Corrupts a suite by moving one irregularity animation's fixed colour
    /// off the suite default.
    #[must_use]
    pub fn with_inconsistent_default(suite: &Suite) -> Suite {
        rebuild(suite, |animations| {
            animations[1].start_state.color = "blue".to_owned();
            animations[1].end_state.color = "blue".to_owned();
        })
    }

    /// Corrupts a suite by replacing one irregularity value with a number
    /// outside the domain.
    #[must_use]
    pub fn with_foreign_value(suite: &Suite) -> Suite {
        rebuild(suite, |animations| {
            animations[0].end_state.irregularity = 0.7;
        })
    }

    fn animation(start: ShapeState, end: ShapeState) -> Animation {
        Animation::new(DEFAULT_ANIM_LENGTH, start, end)
    }

    fn rebuild(suite: &Suite, mutate: impl FnOnce(&mut Vec<Animation>)) -> Suite {
        let mut animations = suite.animations().to_vec();
        mutate(&mut animations);
        Suite::new(animations)
    }
}
