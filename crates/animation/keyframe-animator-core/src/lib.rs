//! Keyframe Animator Core
//!
//! Reads line-oriented keyframe scripts, interpolates named scene parameters
//! (scalars, 3/4-vectors and double arrays) with linear or Catmull-Rom
//! interpolators, and pushes the resulting snapshots to registered consumers.
//! Loaded keyframes are immutable and shared by reference between an
//! [`Animator`] and its clones, so each worker thread can own a private cursor.

pub mod animatable;
pub mod animator;
pub mod cache;
pub mod config;
pub mod consumers;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod interp;
pub mod keyframe;
pub mod parse;
pub mod registry;
pub mod sampling;
pub mod script;
pub mod snapshot;
pub mod value;

// Re-export common types for convenience
pub use animatable::{merge_params, Animatable};
pub use animator::{Animator, AnimatorState};
pub use cache::SnapshotCache;
pub use config::{AnimatorConfig, KeyframeOrder};
pub use consumers::{
    AdjustableCamera, CameraParamNames, CameraProxy, KeyframedCamera, MaterialColor, RayCamera,
    TransformNode, VertigoCamera, VertigoParamNames,
};
pub use descriptor::ParameterDescriptor;
pub use error::AnimatorError;
pub use ids::{AnimatorId, ConsumerId};
pub use interp::{CatmullRomInterpolation, Interpolator, LinearInterpolation};
pub use keyframe::{Bracket, Keyframe, KeyframeStore};
pub use parse::{
    parse_array, parse_scalar, parse_vector3, parse_vector4, ArrayParser, ScalarParser,
    ValueParser, Vector3Parser, Vector4Parser,
};
pub use registry::ParameterRegistry;
pub use sampling::sample;
pub use script::{load_script, parse_script, read_script};
pub use snapshot::ParamValues;
pub use value::{FromValue, Value, ValueKind, Vector3, Vector4};

/// Keyframe animator result type
pub type Result<T> = core::result::Result<T, AnimatorError>;
