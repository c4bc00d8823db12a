//! Parameter descriptors: a name bound to a literal parser and an interpolator.

use std::fmt;
use std::sync::Arc;

use crate::interp::{CatmullRomInterpolation, Interpolator, LinearInterpolation};
use crate::parse::{ArrayParser, ScalarParser, ValueParser, Vector3Parser, Vector4Parser};
use crate::value::{Value, ValueKind};
use crate::AnimatorError;

/// Immutable description of one animatable parameter.
///
/// Cloning is cheap: the parser and interpolator are shared.
#[derive(Clone)]
pub struct ParameterDescriptor {
    name: String,
    parser: Arc<dyn ValueParser>,
    interpolator: Arc<dyn Interpolator>,
    required: bool,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        parser: Arc<dyn ValueParser>,
        interpolator: Arc<dyn Interpolator>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            parser,
            interpolator,
            required,
        }
    }

    /// Scalar parameter, linearly interpolated, optional.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Arc::new(ScalarParser),
            Arc::new(LinearInterpolation),
            false,
        )
    }

    /// Vector3 parameter, Catmull-Rom interpolated, optional.
    pub fn vector3(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Arc::new(Vector3Parser),
            Arc::new(CatmullRomInterpolation),
            false,
        )
    }

    /// Vector4 parameter, Catmull-Rom interpolated, optional.
    pub fn vector4(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Arc::new(Vector4Parser),
            Arc::new(CatmullRomInterpolation),
            false,
        )
    }

    /// Double-array parameter, Catmull-Rom interpolated, optional.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Arc::new(ArrayParser),
            Arc::new(CatmullRomInterpolation),
            false,
        )
    }

    /// Mark the parameter as required in the first keyframe.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set whether the parameter is required in the first keyframe.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replace the interpolator.
    pub fn with_interpolator(mut self, interpolator: Arc<dyn Interpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Switch to linear interpolation.
    pub fn linear(self) -> Self {
        self.with_interpolator(Arc::new(LinearInterpolation))
    }

    /// Switch to Catmull-Rom interpolation.
    pub fn catmull_rom(self) -> Self {
        self.with_interpolator(Arc::new(CatmullRomInterpolation))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.parser.kind()
    }

    #[inline]
    pub fn interpolator(&self) -> &dyn Interpolator {
        self.interpolator.as_ref()
    }

    /// Convert one script literal with this parameter's parser.
    pub fn parse(&self, token: &str) -> Result<Value, AnimatorError> {
        self.parser.parse(token)
    }

    /// Interpolate with this parameter's interpolator, naming the parameter in errors.
    pub fn interpolate(
        &self,
        previous: &Value,
        current: &Value,
        next: &Value,
        later: &Value,
        t: f64,
    ) -> Result<Value, AnimatorError> {
        self.interpolator
            .interpolate(previous, current, next, later, t)
            .map_err(|e| e.for_parameter(&self.name))
    }
}

impl fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .field("parser", &self.parser.name())
            .field("interpolator", &self.interpolator.name())
            .field("required", &self.required)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pick_parser_and_interpolator() {
        let p = ParameterDescriptor::vector3("position").required();
        assert_eq!(p.name(), "position");
        assert!(p.is_required());
        assert_eq!(p.kind(), ValueKind::Vector3);
        assert_eq!(p.interpolator().name(), "catmull_rom");

        let a = ParameterDescriptor::scalar("angle");
        assert!(!a.is_required());
        assert_eq!(a.interpolator().name(), "linear");
        assert_eq!(a.catmull_rom().interpolator().name(), "catmull_rom");
    }

    #[test]
    fn interpolation_errors_carry_the_parameter_name() {
        let p = ParameterDescriptor::scalar("angle");
        let err = p
            .interpolate(
                &Value::Scalar(0.0),
                &Value::Scalar(0.0),
                &Value::Array(vec![0.0]),
                &Value::Scalar(0.0),
                0.5,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AnimatorError::TypeMismatch { ref parameter, .. } if parameter == "angle"
        ));
    }

    #[test]
    fn debug_names_components() {
        let p = ParameterDescriptor::array("color").required();
        let dbg = format!("{p:?}");
        assert!(dbg.contains("color"));
        assert!(dbg.contains("array"));
    }
}
