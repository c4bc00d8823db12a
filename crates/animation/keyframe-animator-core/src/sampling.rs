//! Keyframe sampling: evaluate every parameter of the bracketing keyframe at a time.
//!
//! Model:
//! - `current` is the last keyframe at or before the query time; `previous`,
//!   `next` and `later` are its neighbours, clamped to the sequence ends.
//! - Local `t = (time - current.time) / (next.time - current.time)`, or `1`
//!   when both keyframes share a time. Outside `[start, end]` this
//!   extrapolates from the edge segment.
//! - Only parameters present in `current` are emitted.

use hashbrown::HashMap;

use crate::keyframe::KeyframeStore;
use crate::registry::ParameterRegistry;
use crate::snapshot::ParamValues;
use crate::value::Value;
use crate::AnimatorError;

/// Interpolate all parameters of `store` at `time`.
pub fn sample(
    store: &KeyframeStore,
    registry: &ParameterRegistry,
    time: f64,
) -> Result<ParamValues, AnimatorError> {
    let bracket = store.bracket(time);
    let t = store.local_t(&bracket, time);

    let previous = store.at(bracket.previous);
    let current = store.at(bracket.current);
    let next = store.at(bracket.next);
    let later = store.at(bracket.later);

    let mut values = HashMap::with_capacity(current.values().len());
    for (name, current_value) in current.values() {
        let descriptor =
            registry
                .get(name)
                .ok_or_else(|| AnimatorError::UnknownParameter {
                    name: name.clone(),
                    line: 0,
                })?;

        // A neighbour lacking the parameter duplicates the nearest inner value.
        let next_value = next.get(name).unwrap_or(current_value);
        let later_value = later.get(name).unwrap_or(next_value);
        let previous_value = previous.get(name).unwrap_or(current_value);

        let value: Value =
            descriptor.interpolate(previous_value, current_value, next_value, later_value, t)?;
        values.insert(name.clone(), value);
    }

    Ok(ParamValues::new(time, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimatorConfig;
    use crate::descriptor::ParameterDescriptor;
    use crate::script::parse_script;
    use crate::value::Vector3;
    use approx::assert_relative_eq;

    fn registry() -> ParameterRegistry {
        let mut r = ParameterRegistry::new();
        r.register([
            ParameterDescriptor::vector3("position").required(),
            ParameterDescriptor::scalar("angle"),
        ]);
        r
    }

    fn store(text: &str) -> KeyframeStore {
        parse_script(text, &registry(), &AnimatorConfig::default()).unwrap()
    }

    #[test]
    fn keyframe_times_reproduce_keyframe_values() {
        let s = store("0\nposition:0,0,0\n10\nposition:10,0,0\n20\nposition:10,10,0\n");
        let r = registry();
        for (time, expected) in [
            (0.0, Vector3::zero()),
            (10.0, Vector3::new(10.0, 0.0, 0.0)),
            (20.0, Vector3::new(10.0, 10.0, 0.0)),
        ] {
            let p = sample(&s, &r, time).unwrap();
            let got = p.require::<Vector3>("position").unwrap();
            assert_relative_eq!(got.x, expected.x, epsilon = 1e-12);
            assert_relative_eq!(got.y, expected.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn scalar_is_linear_between_keyframes() {
        let s = store("0\nposition:0,0,0\nangle:0\n4\nangle:40\n");
        let p = sample(&s, &registry(), 1.0).unwrap();
        assert_relative_eq!(p.require::<f64>("angle").unwrap(), 10.0, epsilon = 1e-12);
        assert_eq!(p.time(), 1.0);
    }

    #[test]
    fn only_parameters_known_at_current_keyframe_are_emitted() {
        let s = store("0\nposition:0,0,0\n1\nangle:5\n");
        let early = sample(&s, &registry(), 0.5).unwrap();
        assert!(early.contains("position"));
        assert!(!early.contains("angle"));

        let late = sample(&s, &registry(), 1.0).unwrap();
        assert_eq!(late.get_as::<f64>("angle").unwrap(), Some(5.0));
    }

    #[test]
    fn constant_value_stays_constant() {
        let s = store("0\nposition:1,2,3\n5\n10\nangle:1\n");
        for time in [-3.0, 0.0, 2.5, 7.0, 12.0] {
            let p = sample(&s, &registry(), time).unwrap();
            let v = p.require::<Vector3>("position").unwrap();
            assert_relative_eq!(v.x, 1.0, epsilon = 1e-12);
            assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);
            assert_relative_eq!(v.z, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn unregistered_parameter_in_store_is_reported() {
        let s = store("0\nposition:0,0,0\n");
        let empty = ParameterRegistry::new();
        assert!(matches!(
            sample(&s, &empty, 0.0),
            Err(AnimatorError::UnknownParameter { .. })
        ));
    }
}
