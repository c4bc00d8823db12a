//! Material colour driven by a double-array parameter.

use std::any::Any;
use std::sync::Arc;

use crate::animatable::Animatable;
use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::AnimatorError;

/// Material colour read from a required Catmull-Rom interpolated array.
///
/// The component count is whatever the script writes (RGB, RGBA, spectral
/// samples); interpolated components are not clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialColor {
    param: Arc<str>,
    color: Vec<f64>,
}

impl Default for MaterialColor {
    fn default() -> Self {
        Self::with_param("color")
    }
}

impl MaterialColor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(name: &str) -> Self {
        Self {
            param: Arc::from(name),
            color: vec![1.0, 1.0, 1.0],
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn color(&self) -> &[f64] {
        &self.color
    }
}

impl Animatable for MaterialColor {
    fn params(&self) -> Vec<ParameterDescriptor> {
        vec![ParameterDescriptor::array(&*self.param).required()]
    }

    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError> {
        self.color = values.require(&self.param)?;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Animatable> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
