// Copyright @yucwang 2026

pub mod box3;
pub mod cylinder;
pub mod disk;
pub mod line_segment;
pub mod paraboloid;
pub mod rectangle;
pub mod sphere;

use crate::error::{GeometryError, Result};
use crate::math::angle::Angle;
use crate::math::constants::Real;

/// Azimuth of `(x, y)` in [0, 2 pi).
pub(crate) fn azimuth<T: Real>(x: T, y: T) -> T {
    let phi = y.atan2(x);
    if phi < T::zero() {
        phi + T::two_pi()
    } else {
        phi
    }
}

/// `numerator / extent`, or 0 for a flat extent, so degenerate shapes still get
/// finite texture coordinates.
pub(crate) fn fraction_of<T: Real>(numerator: T, extent: T) -> T {
    if extent > T::zero() {
        numerator / extent
    } else {
        T::zero()
    }
}

pub(crate) fn check_non_negative<T: Real>(name: &'static str, value: T) -> Result<T> {
    if value >= T::zero() && value.is_finite() {
        Ok(value)
    } else {
        log::warn!("rejected {} = {}", name, value);
        Err(GeometryError::OutOfRange { name, value: value.as_f64(), range: "[0, +inf)" })
    }
}

pub(crate) fn check_phi_max<T: Real>(phi_max: Angle<T>) -> Result<Angle<T>> {
    if phi_max.is_within_full_turn() {
        Ok(phi_max)
    } else {
        log::warn!("rejected phi_max = {} degrees", phi_max.degrees());
        Err(GeometryError::OutOfRange {
            name: "phi_max", value: phi_max.degrees().as_f64(), range: "[0, 360] degrees" })
    }
}
