//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Clamp a value symmetrically into `[-limit, +limit]`.
pub fn clamp_sym<T>(value: T, limit: T) -> T
where
    T: Float
{
    clamp(&value, &-limit, &limit)
}

/// Raise the magnitude of a value to at least `min_magn`, keeping its sign.
///
/// The sign is taken from the value's sign bit, so a negative zero is raised
/// to `-min_magn`.
pub fn floor_magn<T>(value: T, min_magn: T) -> T
where
    T: Float
{
    if value.abs() < min_magn {
        if value.is_sign_negative() {
            -min_magn
        }
        else {
            min_magn
        }
    }
    else {
        value
    }
}

/// Wrap an angle in degrees into the range `[-180, 180)`.
pub fn wrap_180_deg<T>(angle_deg: T) -> T
where
    T: Float
{
    let half: T = T::from(180.0).unwrap();
    let full: T = T::from(360.0).unwrap();

    rem_euclid(angle_deg + half, full) - half
}

/// Wrap an angle in radians into the range `[-pi, pi)`.
///
/// Angles already in range are returned untouched.
pub fn wrap_pi<T>(angle_rad: T) -> T
where
    T: Float
{
    let pi: T = T::from(std::f64::consts::PI).unwrap();

    if angle_rad >= -pi && angle_rad < pi {
        angle_rad
    }
    else {
        rem_euclid(angle_rad + pi, pi + pi) - pi
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}
