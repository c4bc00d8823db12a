//! Interpolation primitives:
//! - `lerp` (uses `current`/`next` only)
//! - `catmull_rom` (uniform cubic through four control points)
//! - `Interpolator` trait binding those to the closed `Value` set

pub mod functions;
pub mod interpolators;

pub use functions::{catmull_rom_weights, lerp_f64};
pub use interpolators::{CatmullRomInterpolation, Interpolator, LinearInterpolation};
