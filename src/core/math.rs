// Math utilities and helper functions

use std::f32::consts::TAU;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wrap a value onto a circular scale of `modulus` steps, always non-negative
pub fn wrap(value: i32, modulus: i32) -> i32 {
    value.rem_euclid(modulus)
}

/// Convert a step on a circular scale of `steps` into radians
pub fn steps_to_radians(step: i32, steps: i32) -> f32 {
    step as f32 * TAU / steps as f32
}

/// Move an integer one unit toward zero
pub fn step_toward_zero(value: i32) -> i32 {
    value - value.signum()
}
