//! Moves a fixed camera along keyframed poses without touching its optics.

use std::any::Any;
use std::sync::Arc;

use log::debug;
use nalgebra::{Rotation3, Vector3 as NVector3};

use crate::animatable::Animatable;
use crate::consumers::camera::{CameraParamNames, KeyframedCamera, RayCamera};
use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::value::Vector3;
use crate::AnimatorError;

/// Wraps a camera whose pose is baked in and re-aims its rays.
///
/// The pose of the inner camera's centre ray is captured on construction.
/// Each snapshot moves ray origins by the offset from that position and turns
/// ray directions from the captured direction to the keyframed one, keeping
/// `up` upright. A missing `position` or `direction` falls back to the
/// captured value. Only the position and direction names of
/// [`CameraParamNames`] are read.
#[derive(Clone, Debug)]
pub struct CameraProxy<C = KeyframedCamera> {
    inner: C,
    names: Arc<CameraParamNames>,
    up: Vector3,
    original_position: Vector3,
    original_direction: Vector3,
    offset: Vector3,
    rotation: Rotation3<f64>,
}

impl<C> CameraProxy<C>
where
    C: RayCamera + Clone + Send + 'static,
{
    /// Proxy whose up vector is taken from the inner camera's vertical field of view.
    pub fn new(inner: C) -> Self {
        let (original_position, original_direction) = inner.ray(0.5, 0.5);
        let (top_origin, top_dir) = inner.ray(0.5, 0.0);
        let (bottom_origin, bottom_dir) = inner.ray(0.5, 1.0);
        let up = ((top_origin + top_dir) - (bottom_origin + bottom_dir)).normalize();
        Self {
            inner,
            names: Arc::new(CameraParamNames::default()),
            up,
            original_position,
            original_direction,
            offset: Vector3::zero(),
            rotation: Rotation3::identity(),
        }
    }

    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up.normalize();
        self
    }

    pub fn with_names(mut self, names: CameraParamNames) -> Self {
        self.names = Arc::new(names);
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    #[inline]
    pub fn up(&self) -> Vector3 {
        self.up
    }

    fn aim(&self, direction: Vector3) -> Rotation3<f64> {
        let up = NVector3::from(self.up);
        let from = NVector3::from(self.original_direction);
        let to = NVector3::from(direction);
        if from.cross(&up).norm() < 1e-12 || to.cross(&up).norm() < 1e-12 {
            // looking along `up`; no level frame exists
            return Rotation3::rotation_between(&from, &to).unwrap_or_else(Rotation3::identity);
        }
        Rotation3::face_towards(&to, &up) * Rotation3::face_towards(&from, &up).inverse()
    }
}

impl<C> RayCamera for CameraProxy<C>
where
    C: RayCamera,
{
    fn ray(&self, x: f64, y: f64) -> (Vector3, Vector3) {
        let (origin, direction) = self.inner.ray(x, y);
        (
            origin + self.offset,
            Vector3::from(self.rotation * NVector3::from(direction)),
        )
    }
}

impl<C> Animatable for CameraProxy<C>
where
    C: RayCamera + Clone + Send + 'static,
{
    fn params(&self) -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::vector3(self.names.position.as_str()).required(),
            ParameterDescriptor::vector3(self.names.direction.as_str()).required(),
        ]
    }

    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError> {
        let mut position = self.original_position;
        let mut direction = self.original_direction;
        let has_position = values.try_get_into(&self.names.position, &mut position);
        let has_direction = values.try_get_into(&self.names.direction, &mut direction);
        if !has_position || !has_direction {
            debug!(
                "Camera proxy at time {}: position or direction not specified",
                values.time()
            );
        }

        self.offset = position - self.original_position;
        self.rotation = self.aim(direction.normalize());
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Animatable> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
