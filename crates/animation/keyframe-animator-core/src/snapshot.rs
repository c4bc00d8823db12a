//! Interpolated parameter values for one point in time.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::{FromValue, Value};
use crate::AnimatorError;

/// Snapshot handed to consumers by `Animator::set_time` and on-demand queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValues {
    time: f64,
    values: HashMap<String, Value>,
}

impl ParamValues {
    pub fn new(time: f64, values: HashMap<String, Value>) -> Self {
        Self { time, values }
    }

    pub fn empty(time: f64) -> Self {
        Self::new(time, HashMap::new())
    }

    /// Time this snapshot was interpolated for
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn into_values(self) -> HashMap<String, Value> {
        self.values
    }

    /// Typed lookup: `Ok(None)` when absent, `TypeMismatch` when present with another kind.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<Option<T>, AnimatorError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                AnimatorError::TypeMismatch {
                    parameter: name.to_string(),
                    expected: T::KIND,
                    actual: value.kind(),
                }
            }),
        }
    }

    /// Typed lookup of a parameter a consumer cannot do without.
    ///
    /// Absence is an `InvalidConfiguration` error.
    pub fn require<T: FromValue>(&self, name: &str) -> Result<T, AnimatorError> {
        self.get_as(name)?.ok_or_else(|| {
            AnimatorError::invalid_configuration(format!(
                "required parameter '{}' missing at time {}",
                name, self.time
            ))
        })
    }

    /// Overwrite `out` when `name` is present with the right kind.
    ///
    /// Returns whether `out` was written.
    pub fn try_get_into<T: FromValue>(&self, name: &str, out: &mut T) -> bool {
        match self.values.get(name).and_then(T::from_value) {
            Some(v) => {
                *out = v;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ValueKind, Vector3};

    fn snapshot() -> ParamValues {
        let mut values = HashMap::new();
        values.insert("angle".to_string(), Value::Scalar(45.0));
        values.insert(
            "position".to_string(),
            Value::Vector3(Vector3::new(1.0, 2.0, 3.0)),
        );
        ParamValues::new(2.0, values)
    }

    #[test]
    fn typed_lookups() {
        let s = snapshot();
        assert_eq!(s.get_as::<f64>("angle").unwrap(), Some(45.0));
        assert_eq!(s.get_as::<f64>("focus").unwrap(), None);
        assert_eq!(
            s.require::<Vector3>("position").unwrap(),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn wrong_kind_is_a_type_mismatch() {
        let err = snapshot().get_as::<Vector3>("angle").unwrap_err();
        assert_eq!(
            err,
            AnimatorError::TypeMismatch {
                parameter: "angle".to_string(),
                expected: ValueKind::Vector3,
                actual: ValueKind::Scalar,
            }
        );
    }

    #[test]
    fn missing_required_is_invalid_configuration() {
        let err = snapshot().require::<Vector3>("direction").unwrap_err();
        assert!(matches!(err, AnimatorError::InvalidConfiguration { .. }));
    }

    #[test]
    fn try_get_into_keeps_default_when_absent() {
        let s = snapshot();
        let mut direction = Vector3::new(0.0, 0.0, 1.0);
        assert!(!s.try_get_into("direction", &mut direction));
        assert_eq!(direction, Vector3::new(0.0, 0.0, 1.0));

        let mut position = Vector3::zero();
        assert!(s.try_get_into("position", &mut position));
        assert_eq!(position, Vector3::new(1.0, 2.0, 3.0));
    }
}
