//! Dolly-zoom ("vertigo") wrapper around an adjustable camera.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animatable::{merge_params, Animatable};
use crate::consumers::camera::{AdjustableCamera, KeyframedCamera};
use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::value::Vector3;
use crate::AnimatorError;

/// Parameter names read by a [`VertigoCamera`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertigoParamNames {
    /// Blend factor between the inner camera (`0`) and the effect (`1`).
    pub vertigo: String,
    pub target: String,
    pub target_width: String,
}

impl Default for VertigoParamNames {
    fn default() -> Self {
        Self {
            vertigo: "vertigo".to_string(),
            target: "target".to_string(),
            target_width: "target_width".to_string(),
        }
    }
}

/// Keeps a target at a constant apparent width by widening or narrowing the
/// inner camera's field of view as it moves, optionally turning it towards
/// the target as well.
///
/// The inner camera is applied first; the effect then overrides its angle and
/// direction, blended by the `vertigo` parameter (default `1`, skipped when
/// `vertigo <= 0`).
#[derive(Clone, Debug)]
pub struct VertigoCamera<C = KeyframedCamera> {
    inner: C,
    names: Arc<VertigoParamNames>,
    fixed_width: Option<f64>,
    update_angle: bool,
    update_direction: bool,
}

impl<C> VertigoCamera<C>
where
    C: AdjustableCamera + Animatable + Clone + 'static,
{
    /// Effect whose target width comes from the required `target_width` parameter.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            names: Arc::new(VertigoParamNames::default()),
            fixed_width: None,
            update_angle: true,
            update_direction: true,
        }
    }

    /// Effect with a constant target width; `target_width` becomes optional.
    pub fn with_target_width(inner: C, width: f64) -> Self {
        Self {
            fixed_width: Some(width),
            ..Self::new(inner)
        }
    }

    pub fn with_names(mut self, names: VertigoParamNames) -> Self {
        self.names = Arc::new(names);
        self
    }

    pub fn updating(mut self, angle: bool, direction: bool) -> Self {
        self.update_angle = angle;
        self.update_direction = direction;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn own_params(&self) -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::scalar(self.names.vertigo.as_str()),
            ParameterDescriptor::vector3(self.names.target.as_str()).required(),
            ParameterDescriptor::scalar(self.names.target_width.as_str())
                .with_required(self.fixed_width.is_none()),
        ]
    }
}

impl<C> Animatable for VertigoCamera<C>
where
    C: AdjustableCamera + Animatable + Clone + 'static,
{
    fn params(&self) -> Vec<ParameterDescriptor> {
        merge_params([self.inner.params(), self.own_params()])
    }

    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError> {
        self.inner.apply_params(values)?;

        let vertigo = values.get_as::<f64>(&self.names.vertigo)?.unwrap_or(1.0);
        if vertigo <= 0.0 {
            return Ok(());
        }

        let target: Vector3 = values.require(&self.names.target)?;
        let position = self.inner.position();

        if self.update_angle {
            let width = match values.get_as::<f64>(&self.names.target_width)? {
                Some(width) => width,
                None => self.fixed_width.ok_or_else(|| {
                    AnimatorError::invalid_configuration(format!(
                        "'{}' missing and no fixed target width set",
                        self.names.target_width
                    ))
                })?,
            };
            let distance = position.distance(&target);
            let angle = 2.0 * (width / (2.0 * distance)).atan();
            let current = self.inner.angle();
            self.inner
                .set_angle(vertigo * angle + (1.0 - vertigo) * current);
        }

        if self.update_direction {
            let towards = (target - position).normalize();
            let current = self.inner.direction();
            self.inner
                .set_direction((towards * vertigo + current * (1.0 - vertigo)).normalize());
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
