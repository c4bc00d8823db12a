use crate::interp::functions::{catmull_rom_f64, catmull_rom_weights, lerp_f64};
use crate::value::{Value, Vector3, Vector4};
use crate::AnimatorError;

/// Trait for interpolation functions.
///
/// `previous` and `later` are the neighbours of the `current`..`next` segment;
/// interpolators that only need the segment ignore them. All four values must
/// share one kind.
pub trait Interpolator: Send + Sync {
    /// Get the name of this interpolation function
    fn name(&self) -> &str;

    /// Interpolate the `current`..`next` segment at local parameter `t`
    fn interpolate(
        &self,
        previous: &Value,
        current: &Value,
        next: &Value,
        later: &Value,
        t: f64,
    ) -> Result<Value, AnimatorError>;
}

/// Verify all four control values share `previous`'s kind, and for arrays its length.
fn check_control_points(points: [&Value; 4]) -> Result<(), AnimatorError> {
    let first = points[0];
    for p in &points[1..] {
        if !first.same_kind(p) {
            return Err(AnimatorError::TypeMismatch {
                parameter: String::new(),
                expected: first.kind(),
                actual: p.kind(),
            });
        }
        if let (Value::Array(a), Value::Array(b)) = (first, p) {
            if a.len() != b.len() {
                return Err(AnimatorError::ArrayLengthMismatch {
                    parameter: String::new(),
                    expected: a.len(),
                    actual: b.len(),
                });
            }
        }
    }
    Ok(())
}

/// Apply `f` component-wise over four same-kind values.
fn map_components(
    points: [&Value; 4],
    f: impl Fn([f64; 4]) -> f64,
) -> Result<Value, AnimatorError> {
    check_control_points(points)?;
    let [p0, p1, p2, p3] = points;
    Ok(match (p0, p1, p2, p3) {
        (Value::Scalar(a), Value::Scalar(b), Value::Scalar(c), Value::Scalar(d)) => {
            Value::Scalar(f([*a, *b, *c, *d]))
        }
        (Value::Vector3(a), Value::Vector3(b), Value::Vector3(c), Value::Vector3(d)) => {
            Value::Vector3(Vector3::new(
                f([a.x, b.x, c.x, d.x]),
                f([a.y, b.y, c.y, d.y]),
                f([a.z, b.z, c.z, d.z]),
            ))
        }
        (Value::Vector4(a), Value::Vector4(b), Value::Vector4(c), Value::Vector4(d)) => {
            Value::Vector4(Vector4::new(
                f([a.x, b.x, c.x, d.x]),
                f([a.y, b.y, c.y, d.y]),
                f([a.z, b.z, c.z, d.z]),
                f([a.w, b.w, c.w, d.w]),
            ))
        }
        (Value::Array(a), Value::Array(b), Value::Array(c), Value::Array(d)) => Value::Array(
            (0..a.len())
                .map(|i| f([a[i], b[i], c[i], d[i]]))
                .collect(),
        ),
        // check_control_points guarantees matching variants
        _ => unreachable!("control points of mixed kinds"),
    })
}

/// Linear interpolation: `(1 - t) * current + t * next`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl Interpolator for LinearInterpolation {
    fn name(&self) -> &str {
        "linear"
    }

    fn interpolate(
        &self,
        previous: &Value,
        current: &Value,
        next: &Value,
        later: &Value,
        t: f64,
    ) -> Result<Value, AnimatorError> {
        map_components([previous, current, next, later], |p| {
            lerp_f64(p[1], p[2], t)
        })
    }
}

/// Uniform Catmull-Rom spline through `previous`, `current`, `next`, `later`
#[derive(Debug, Clone, Copy, Default)]
pub struct CatmullRomInterpolation;

impl Interpolator for CatmullRomInterpolation {
    fn name(&self) -> &str {
        "catmull_rom"
    }

    fn interpolate(
        &self,
        previous: &Value,
        current: &Value,
        next: &Value,
        later: &Value,
        t: f64,
    ) -> Result<Value, AnimatorError> {
        let weights = catmull_rom_weights(t);
        map_components([previous, current, next, later], |p| {
            catmull_rom_f64(&weights, p)
        })
    }
}
