//! Pinhole camera whose pose and field of view follow keyframes.

use std::any::Any;
use std::sync::Arc;

use nalgebra::Vector3 as NVector3;
use serde::{Deserialize, Serialize};

use crate::animatable::Animatable;
use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::value::Vector3;
use crate::AnimatorError;

/// Parameter names read by a [`KeyframedCamera`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraParamNames {
    pub position: String,
    pub direction: String,
    /// Horizontal field of view in degrees.
    pub angle: String,
}

impl Default for CameraParamNames {
    fn default() -> Self {
        Self {
            position: "position".to_string(),
            direction: "direction".to_string(),
            angle: "angle".to_string(),
        }
    }
}

/// Camera state that composite cameras may adjust after the keyframed values
/// have been applied.
pub trait AdjustableCamera {
    fn position(&self) -> Vector3;
    fn direction(&self) -> Vector3;
    fn set_direction(&mut self, direction: Vector3);
    /// Horizontal field of view in radians
    fn angle(&self) -> f64;
    fn set_angle(&mut self, radians: f64);
}

/// Camera driven by `position`, `direction` (both required, Catmull-Rom) and
/// an optional linear `angle` given in degrees.
#[derive(Clone, Debug)]
pub struct KeyframedCamera {
    names: Arc<CameraParamNames>,
    position: Vector3,
    direction: Vector3,
    up: Vector3,
    angle: f64,
    aspect_ratio: f64,
}

impl Default for KeyframedCamera {
    fn default() -> Self {
        Self::with_names(CameraParamNames::default())
    }
}

impl KeyframedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(names: CameraParamNames) -> Self {
        Self {
            names: Arc::new(names),
            position: Vector3::zero(),
            direction: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            angle: 60f64.to_radians(),
            aspect_ratio: 4.0 / 3.0,
        }
    }

    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up.normalize();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn names(&self) -> &CameraParamNames {
        &self.names
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Orthonormal `(right, up, forward)` frame of the camera.
    fn frame(&self) -> (NVector3<f64>, NVector3<f64>, NVector3<f64>) {
        let forward = NVector3::from(self.direction).normalize();
        let mut up = NVector3::from(self.up);
        if forward.cross(&up).norm() < 1e-12 {
            // up parallel to the view direction; pick any other axis
            up = if forward.x.abs() < 0.9 {
                NVector3::x()
            } else {
                NVector3::y()
            };
        }
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// Primary ray through normalized image coordinates `x, y` in `[0, 1]`,
    /// `(0, 0)` being the top-left corner. Returns `(origin, unit direction)`.
    pub fn ray(&self, x: f64, y: f64) -> (Vector3, Vector3) {
        let (right, up, forward) = self.frame();
        let half_width = (self.angle * 0.5).tan();
        let half_height = half_width / self.aspect_ratio;
        let dir = forward
            + right * ((2.0 * x - 1.0) * half_width)
            + up * ((1.0 - 2.0 * y) * half_height);
        (self.position, Vector3::from(dir.normalize()))
    }
}

/// Anything that can cast primary rays.
pub trait RayCamera {
    /// `(origin, unit direction)` through normalized image coordinates.
    fn ray(&self, x: f64, y: f64) -> (Vector3, Vector3);
}

impl RayCamera for KeyframedCamera {
    fn ray(&self, x: f64, y: f64) -> (Vector3, Vector3) {
        KeyframedCamera::ray(self, x, y)
    }
}

impl AdjustableCamera for KeyframedCamera {
    #[inline]
    fn position(&self) -> Vector3 {
        self.position
    }

    #[inline]
    fn direction(&self) -> Vector3 {
        self.direction
    }

    fn set_direction(&mut self, direction: Vector3) {
        self.direction = direction.normalize();
    }

    #[inline]
    fn angle(&self) -> f64 {
        self.angle
    }

    fn set_angle(&mut self, radians: f64) {
        self.angle = radians;
    }
}

impl Animatable for KeyframedCamera {
    fn params(&self) -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::vector3(self.names.position.as_str()).required(),
            ParameterDescriptor::vector3(self.names.direction.as_str()).required(),
            ParameterDescriptor::scalar(self.names.angle.as_str()),
        ]
    }

    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError> {
        self.position = values.require(&self.names.position)?;
        let direction: Vector3 = values.require(&self.names.direction)?;
        self.direction = direction.normalize();
        if let Some(degrees) = values.get_as::<f64>(&self.names.angle)? {
            self.angle = degrees.to_radians();
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Animatable> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use approx::assert_relative_eq;
    use hashbrown::HashMap;

    fn values(pairs: &[(&str, Value)]) -> ParamValues {
        let map: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        ParamValues::new(0.0, map)
    }

    #[test]
    fn declares_required_pose_and_optional_angle() {
        let params = KeyframedCamera::new().params();
        let required: Vec<_> = params
            .iter()
            .filter(|d| d.is_required())
            .map(|d| d.name())
            .collect();
        assert_eq!(required, ["position", "direction"]);
        assert_eq!(params[2].name(), "angle");
        assert_eq!(params[2].interpolator().name(), "linear");
    }

    #[test]
    fn applies_pose_and_converts_degrees() {
        let mut cam = KeyframedCamera::new();
        cam.apply_params(&values(&[
            ("position", Value::Vector3(Vector3::new(1.0, 2.0, 3.0))),
            ("direction", Value::Vector3(Vector3::new(0.0, 0.0, 5.0))),
            ("angle", Value::Scalar(90.0)),
            ("unrelated", Value::Scalar(1.0)),
        ]))
        .unwrap();
        assert_eq!(cam.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.direction(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(cam.angle(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn missing_required_pose_is_invalid_configuration() {
        let mut cam = KeyframedCamera::new();
        let err = cam
            .apply_params(&values(&[("position", Value::Vector3(Vector3::zero()))]))
            .unwrap_err();
        assert!(matches!(err, AnimatorError::InvalidConfiguration { .. }));
    }

    #[test]
    fn custom_names_are_used() {
        let names = CameraParamNames {
            position: "eye".to_string(),
            ..CameraParamNames::default()
        };
        let cam = KeyframedCamera::with_names(names);
        assert_eq!(cam.params()[0].name(), "eye");
    }

    #[test]
    fn center_ray_follows_direction() {
        let mut cam = KeyframedCamera::new();
        cam.set_direction(Vector3::new(1.0, 0.0, 0.0));
        let (origin, dir) = cam.ray(0.5, 0.5);
        assert_eq!(origin, Vector3::zero());
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(dir.y, 0.0, epsilon = 1e-12);

        // top-left ray leans up
        let (_, corner) = cam.ray(0.0, 0.0);
        assert!(corner.y > 0.0);
        assert_relative_eq!(corner.length(), 1.0, epsilon = 1e-12);
    }
}
