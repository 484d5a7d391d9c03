//! Axis vector helpers
//!
//! Fixed-length vectors with one entry per machine axis, plus the small
//! pieces of vector math the planner side shares with the report layer.

use crate::constants::N_AXIS;

/// One floating-point value per machine axis, in millimeters
pub type AxisVector = [f32; N_AXIS];

/// One step count per machine axis
pub type StepVector = [i32; N_AXIS];

/// Convert absolute step counts to a machine position in millimeters
pub fn steps_to_mpos(steps: &StepVector, steps_per_mm: &AxisVector) -> AxisVector {
    let mut position = [0.0; N_AXIS];
    for (idx, pos) in position.iter_mut().enumerate() {
        *pos = steps[idx] as f32 / steps_per_mm[idx];
    }
    position
}

/// Length of the hypotenuse of a right triangle with legs `x` and `y`
pub fn hypot_f(x: f32, y: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// Normalize a delta vector in place and return its original magnitude
///
/// A zero vector is left with non-finite components, as there is no
/// direction to normalize to; callers filter zero-length moves first.
pub fn convert_delta_vector_to_unit_vector(vector: &mut AxisVector) -> f32 {
    let magnitude = vector
        .iter()
        .filter(|v| **v != 0.0)
        .map(|v| v * v)
        .sum::<f32>()
        .sqrt();
    let inv_magnitude = 1.0 / magnitude;
    for v in vector.iter_mut() {
        *v *= inv_magnitude;
    }
    magnitude
}

/// Largest scalar along `unit_vec` that keeps every axis under `max_value`
pub fn limit_value_by_axis_maximum(max_value: &AxisVector, unit_vec: &AxisVector) -> f32 {
    max_value
        .iter()
        .zip(unit_vec.iter())
        .filter(|(_, u)| **u != 0.0)
        .map(|(m, u)| (m / u).abs())
        .fold(f32::MAX, f32::min)
}
