use nalgebra::Vector4 as NVector4;
use serde::{Deserialize, Serialize};

/// 4D vector type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<NVector4<f64>> for Vector4 {
    fn from(v: NVector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for NVector4<f64> {
    fn from(v: Vector4) -> Self {
        NVector4::new(v.x, v.y, v.z, v.w)
    }
}
