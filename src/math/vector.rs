// Copyright @yucwang 2026

use super::constants::{Point3, Real, Vector3, NORMALIZATION_THRESHOLD};

pub fn direction<T: Real>(from: &Point3<T>, to: &Point3<T>) -> Vector3<T> {
    to - from
}

pub fn direction_normalized<T: Real>(from: &Point3<T>, to: &Point3<T>) -> Vector3<T> {
    (to - from).normalize()
}

/// Normalizes `v`, or returns `None` when its length is zero or not finite.
pub fn normalize_checked<T: Real>(v: &Vector3<T>) -> Option<Vector3<T>> {
    let length = v.norm();
    if length > T::zero() && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

pub fn is_unit<T: Real>(v: &Vector3<T>) -> bool {
    (v.norm_squared() - T::one()).abs() <= T::cast(NORMALIZATION_THRESHOLD)
}

/// The coordinate axis least aligned with `v`.
pub fn least_aligned_axis<T: Real>(v: &Vector3<T>) -> Vector3<T> {
    let x = v.x.abs();
    let y = v.y.abs();
    let z = v.z.abs();
    if x <= y && x <= z {
        Vector3::x()
    } else if y <= z {
        Vector3::y()
    } else {
        Vector3::z()
    }
}

pub fn distance<T: Real>(a: &Point3<T>, b: &Point3<T>) -> T {
    (b - a).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_checked() {
        let v = Vector3::new(3.0f64, 0.0, 4.0);
        let n = normalize_checked(&v).unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!(is_unit(&n));
        assert!(normalize_checked(&Vector3::<f64>::zeros()).is_none());
        assert!(normalize_checked(&Vector3::new(f64::INFINITY, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_least_aligned_axis() {
        assert_eq!(least_aligned_axis(&Vector3::new(0.0f32, 0.0, 1.0)), Vector3::x());
        assert_eq!(least_aligned_axis(&Vector3::new(1.0f32, 0.1, 0.5)), Vector3::y());
        assert_eq!(least_aligned_axis(&Vector3::new(1.0f32, 1.0, 0.0)), Vector3::z());
    }

    #[test]
    fn test_direction_and_distance() {
        let a = Point3::new(1.0f64, 2.0, 3.0);
        let b = Point3::new(4.0f64, 6.0, 3.0);
        assert_eq!(direction(&a, &b), Vector3::new(3.0, 4.0, 0.0));
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((direction_normalized(&a, &b).x - 0.6).abs() < 1e-12);
    }
}
