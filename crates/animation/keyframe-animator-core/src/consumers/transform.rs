//! Scene node with an animated local transform.

use std::any::Any;
use std::sync::Arc;

use nalgebra::{Matrix4, Point3, Rotation3, Vector3 as NVector3};

use crate::animatable::{merge_params, Animatable};
use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::value::Vector3;
use crate::AnimatorError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct TransformParamNames {
    translation: Option<String>,
    rotation: Option<String>,
    scale: Option<String>,
}

/// Node whose local transform is `translation * rotation * scale`.
///
/// Each component is read from a vector3 parameter only when a name was given
/// for it; named components are required. Rotation is XYZ Euler angles in
/// degrees. A wrapped child consumer receives every snapshot after the node
/// and contributes its parameters to the node's list.
#[derive(Clone)]
pub struct TransformNode {
    names: Arc<TransformParamNames>,
    translation: Vector3,
    rotation: Vector3,
    scale: Vector3,
    transform: Matrix4<f64>,
    inverse: Matrix4<f64>,
    child: Option<Box<dyn Animatable>>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self {
            names: Arc::new(TransformParamNames::default()),
            translation: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::one(),
            transform: Matrix4::identity(),
            inverse: Matrix4::identity(),
            child: None,
        }
    }
}

impl TransformNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.names).translation = Some(name.into());
        self
    }

    /// Read rotation from `name` as XYZ Euler angles in degrees.
    pub fn with_rotation(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.names).rotation = Some(name.into());
        self
    }

    pub fn with_scale(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.names).scale = Some(name.into());
        self
    }

    pub fn with_child<A: Animatable + 'static>(mut self, child: A) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn child(&self) -> Option<&dyn Animatable> {
        self.child.as_deref()
    }

    #[inline]
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Euler angles in degrees
    #[inline]
    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// Local-to-parent matrix
    pub fn transform(&self) -> &Matrix4<f64> {
        &self.transform
    }

    /// Parent-to-local matrix
    pub fn inverse(&self) -> &Matrix4<f64> {
        &self.inverse
    }

    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let p = self
            .transform
            .transform_point(&Point3::new(p.x, p.y, p.z));
        Vector3::new(p.x, p.y, p.z)
    }

    fn rebuild(&mut self) -> Result<(), AnimatorError> {
        let rotation = Rotation3::from_euler_angles(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        let transform = Matrix4::new_translation(&NVector3::from(self.translation))
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&NVector3::from(self.scale));
        let inverse = transform.try_inverse().ok_or_else(|| {
            AnimatorError::invalid_configuration(format!(
                "transform with scale ({}, {}, {}) is not invertible",
                self.scale.x, self.scale.y, self.scale.z
            ))
        })?;
        self.transform = transform;
        self.inverse = inverse;
        Ok(())
    }
}

impl Animatable for TransformNode {
    fn params(&self) -> Vec<ParameterDescriptor> {
        let own: Vec<ParameterDescriptor> = [
            &self.names.translation,
            &self.names.rotation,
            &self.names.scale,
        ]
        .into_iter()
        .flatten()
        .map(|name| ParameterDescriptor::vector3(name.as_str()).required())
        .collect();
        match &self.child {
            Some(child) => merge_params([own, child.params()]),
            None => own,
        }
    }

    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError> {
        if let Some(name) = &self.names.translation {
            self.translation = values.require(name)?;
        }
        if let Some(name) = &self.names.rotation {
            self.rotation = values.require(name)?;
        }
        if let Some(name) = &self.names.scale {
            self.scale = values.require(name)?;
        }
        self.rebuild()?;

        if let Some(child) = self.child.as_mut() {
            child.apply_params(values)?;
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
