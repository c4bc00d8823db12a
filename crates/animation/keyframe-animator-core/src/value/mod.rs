//! Value types carried by keyframes and snapshots

pub mod value_enum;
pub mod vector3;
pub mod vector4;

pub use value_enum::*;
pub use vector3::*;
pub use vector4::*;
