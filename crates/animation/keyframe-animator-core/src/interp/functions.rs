use nalgebra::{Matrix4, RowVector4};

/// Uniform Catmull-Rom basis, rows ordered for `[t^3, t^2, t, 1]`.
#[inline]
fn catmull_rom_basis() -> Matrix4<f64> {
    Matrix4::new(
        -1.0, 3.0, -3.0, 1.0, //
        2.0, -5.0, 4.0, -1.0, //
        -1.0, 0.0, 1.0, 0.0, //
        0.0, 2.0, 0.0, 0.0,
    )
}

/// Blend weights for `[previous, current, next, later]` at parameter `t`:
/// `0.5 * [t^3, t^2, t, 1] * M`.
///
/// At `t = 0` the weights are exactly `[0, 1, 0, 0]`, at `t = 1` exactly
/// `[0, 0, 1, 0]`, so the curve passes through `current` and `next`.
#[inline]
pub fn catmull_rom_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let powers = RowVector4::new(t2 * t, t2, t, 1.0);
    let w = powers * catmull_rom_basis() * 0.5;
    [w[0], w[1], w[2], w[3]]
}

/// Catmull-Rom on a single component with precomputed weights.
#[inline]
pub fn catmull_rom_f64(weights: &[f64; 4], p: [f64; 4]) -> f64 {
    weights[0] * p[0] + weights[1] * p[1] + weights[2] * p[2] + weights[3] * p[3]
}

/// Linear interpolation of scalars: `(1 - t) * a + t * b`.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}
