//! Generation strategies and the suite assembly they share.
//!
//! Both strategies produce per-attribute transition lists plus a default
//! combination; [`assemble_entry`] turns those into concrete animations in
//! canonical attribute order (all irregularity animations, then aspect
//! ratio, then colour), holding the non-changing attributes at the suite's
//! defaults.

pub(crate) mod cyclic;
pub(crate) mod random_flip;

use crate::{
    Result,
    domain::{AttrValue, Attribute, DomainSet, Transition},
    error::GenerateError,
    suite::{Animation, BatchEntry, ShapeState, Suite},
};

/// Enumerates the Cartesian product of three index lists in fixed order:
/// first attribute slowest, third fastest.
pub(crate) fn cartesian_combinations(lists: [&[usize]; 3]) -> Vec<[usize; 3]> {
    let mut combinations =
        Vec::with_capacity(lists.iter().map(|list| list.len()).product::<usize>());
    for &a in lists[0] {
        for &b in lists[1] {
            for &c in lists[2] {
                combinations.push([a, b, c]);
            }
        }
    }
    combinations
}

/// Builds the state holding `indices` (one value index per attribute).
pub(crate) fn state_from_indices(domains: &DomainSet, indices: [usize; 3]) -> Result<ShapeState> {
    Ok(ShapeState::new(
        numeric_value(domains, Attribute::Irregularity, indices[0])?,
        numeric_value(domains, Attribute::AspectRatio, indices[1])?,
        label_value(domains, Attribute::Color, indices[2])?,
    ))
}

/// Assembles one suite from a default combination and per-attribute
/// transition lists, both indexed into `domains`.
pub(crate) fn assemble_entry(
    domains: &DomainSet,
    anim_length: u32,
    defaults: [usize; 3],
    transitions: &[Vec<Transition>; 3],
) -> Result<BatchEntry> {
    let mut animations = Vec::with_capacity(domains.animations_per_suite());
    for attribute in Attribute::ALL {
        for transition in &transitions[attribute.index()] {
            let mut start_indices = defaults;
            let mut end_indices = defaults;
            start_indices[attribute.index()] = transition.start;
            end_indices[attribute.index()] = transition.end;
            animations.push(Animation::new(
                anim_length,
                state_from_indices(domains, start_indices)?,
                state_from_indices(domains, end_indices)?,
            ));
        }
    }

    let default_state = state_from_indices(domains, defaults)?;
    let defaults_values: [AttrValue; 3] =
        Attribute::ALL.map(|attribute| default_state.value(attribute));
    Ok(BatchEntry {
        defaults: defaults_values,
        suite: Suite::new(animations),
    })
}

fn numeric_value(domains: &DomainSet, attribute: Attribute, index: usize) -> Result<f64> {
    match domains.get(attribute).value(index) {
        Some(AttrValue::Number(value)) => Ok(*value),
        other => Err(mistyped(attribute, other)),
    }
}

fn label_value(domains: &DomainSet, attribute: Attribute, index: usize) -> Result<String> {
    match domains.get(attribute).value(index) {
        Some(AttrValue::Label(label)) => Ok(label.clone()),
        other => Err(mistyped(attribute, other)),
    }
}

// Builder validation makes this unreachable in practice; kept as an error
// path rather than a panic so a future domain refactor fails loudly but
// cleanly.
fn mistyped(attribute: Attribute, value: Option<&AttrValue>) -> GenerateError {
    GenerateError::MistypedDomainValue {
        attribute,
        value: value.map_or_else(|| "<missing>".to_owned(), ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_order_is_first_attribute_slowest() {
        let combos = cartesian_combinations([&[0, 1], &[0], &[0, 1]]);
        assert_eq!(
            combos,
            vec![[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]
        );
    }

    #[test]
    fn assemble_orders_animations_by_attribute() {
        let domains = DomainSet::default();
        let transitions = [
            vec![Transition::new(0, 1)],
            vec![Transition::new(1, 2)],
            vec![Transition::new(2, 0)],
        ];
        let entry = assemble_entry(&domains, 3000, [0, 0, 0], &transitions)
            .expect("assembly must succeed");
        let animations = entry.suite.animations();
        assert_eq!(animations.len(), 3);
        // Irregularity animation first, holding the other defaults.
        assert_eq!(animations[0].start_state.irregularity, 0.0);
        assert_eq!(animations[0].end_state.irregularity, 0.4);
        assert_eq!(animations[0].start_state.aspect_ratio, 0.2);
        assert_eq!(animations[0].start_state.color, "red");
        // Colour animation last.
        assert_eq!(animations[2].start_state.color, "blue");
        assert_eq!(animations[2].end_state.color, "red");
        assert_eq!(animations[2].start_state.irregularity, 0.0);
    }
}
