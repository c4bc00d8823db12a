//! Ready-made consumers: cameras, camera proxy, transform nodes and material colour.

pub mod camera;
pub mod material;
pub mod proxy;
pub mod transform;
pub mod vertigo;

pub use camera::{AdjustableCamera, CameraParamNames, KeyframedCamera, RayCamera};
pub use material::MaterialColor;
pub use proxy::CameraProxy;
pub use transform::TransformNode;
pub use vertigo::{VertigoCamera, VertigoParamNames};
