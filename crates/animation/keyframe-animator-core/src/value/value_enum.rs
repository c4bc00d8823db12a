use crate::value::vector3::Vector3;
use crate::value::vector4::Vector4;
use crate::AnimatorError;
use serde::{Deserialize, Serialize};

/// Enum representing the kind of a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Scalar,
    Vector3,
    Vector4,
    Array,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Scalar => "double",
            ValueKind::Vector3 => "Vector3",
            ValueKind::Vector4 => "Vector4",
            ValueKind::Array => "double array",
        }
    }
}

/// A parameter value bound in a keyframe or produced by interpolation.
///
/// The set is closed: interpolators dispatch on the variant, and a parameter
/// keeps the kind of the first value bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// 64-bit floating point number
    Scalar(f64),
    /// 3D vector
    Vector3(Vector3),
    /// 4D vector
    Vector4(Vector4),
    /// Variable-length list of doubles (e.g. a color)
    Array(Vec<f64>),
}

impl Value {
    /// Get the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vector3(_) => ValueKind::Vector3,
            Value::Vector4(_) => ValueKind::Vector4,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Check if this value can be interpolated with another value
    pub fn same_kind(&self, other: &Value) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// Number of numeric components (1, 3, 4 or the array length)
    pub fn len(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Vector3(_) => 3,
            Value::Vector4(_) => 4,
            Value::Array(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into numeric components
    pub fn components(&self) -> Vec<f64> {
        match self {
            Value::Scalar(f) => vec![*f],
            Value::Vector3(v) => v.to_array().to_vec(),
            Value::Vector4(v) => v.to_array().to_vec(),
            Value::Array(a) => a.clone(),
        }
    }

    /// Create a value from numeric components
    pub fn from_components(kind: ValueKind, components: &[f64]) -> Result<Value, AnimatorError> {
        let expect = |n: usize| {
            if components.len() == n {
                Ok(())
            } else {
                Err(AnimatorError::invalid_configuration(format!(
                    "{} requires {} components, got {}",
                    kind.name(),
                    n,
                    components.len()
                )))
            }
        };
        match kind {
            ValueKind::Scalar => {
                expect(1)?;
                Ok(Value::Scalar(components[0]))
            }
            ValueKind::Vector3 => {
                expect(3)?;
                Ok(Value::Vector3(Vector3::new(
                    components[0],
                    components[1],
                    components[2],
                )))
            }
            ValueKind::Vector4 => {
                expect(4)?;
                Ok(Value::Vector4(Vector4::new(
                    components[0],
                    components[1],
                    components[2],
                    components[3],
                )))
            }
            ValueKind::Array => Ok(Value::Array(components.to_vec())),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        if let Self::Scalar(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_vector3(&self) -> Option<Vector3> {
        if let Self::Vector3(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_vector4(&self) -> Option<Vector4> {
        if let Self::Vector4(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[f64]> {
        if let Self::Array(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vector3> for Value {
    fn from(value: Vector3) -> Self {
        Value::Vector3(value)
    }
}

impl From<Vector4> for Value {
    fn from(value: Vector4) -> Self {
        Value::Vector4(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::Array(value)
    }
}

/// Extraction of a concrete Rust type from a [`Value`], used by typed lookups.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_scalar()
    }
}

impl FromValue for Vector3 {
    const KIND: ValueKind = ValueKind::Vector3;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_vector3()
    }
}

impl FromValue for Vector4 {
    const KIND: ValueKind = ValueKind::Vector4;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_vector4()
    }
}

impl FromValue for Vec<f64> {
    const KIND: ValueKind = ValueKind::Array;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().map(<[f64]>::to_vec)
    }
}
