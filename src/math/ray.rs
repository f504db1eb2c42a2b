// Copyright 2020 @TwoCookingMice

use std::io::{Read, Write};

use super::constants::{Point3, Real, Vector3};
use super::transform::Transform;
use super::vector::{is_unit, normalize_checked};
use crate::error::{GeometryError, Result};
use crate::io::binary::{read_point3, read_vector3, write_point3, write_vector3};

/// A ray with a unit-length direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3<T: Real> {
    origin: Point3<T>,
    direction: Vector3<T>,
}

impl<T: Real> Ray3<T> {
    /// Normalizes `direction`. A zero direction yields NaN components.
    pub fn new(origin: Point3<T>, direction: Vector3<T>) -> Self {
        Self { origin, direction: direction.normalize() }
    }

    pub fn try_new(origin: Point3<T>, direction: Vector3<T>) -> Result<Self> {
        match normalize_checked(&direction) {
            Some(direction) => Ok(Self { origin, direction }),
            None => Err(GeometryError::InvalidArgument(format!(
                "ray direction {:?} cannot be normalized", direction))),
        }
    }

    pub fn origin(&self) -> Point3<T> {
        self.origin
    }

    pub fn direction(&self) -> Vector3<T> {
        self.direction
    }

    pub fn point_at(&self, t: T) -> Point3<T> {
        self.origin + self.direction * t
    }

    /// Under a projective transform the direction is taken between the images
    /// of two points of the ray, since the linear part alone no longer maps
    /// the line onto its image.
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        let origin = transform.apply_point_and_divide(&self.origin);
        let direction = if transform.is_affine() {
            transform.apply_vector(&self.direction)
        } else {
            transform.apply_point_and_divide(&self.point_at(T::one())) - origin
        };
        Ray3::new(origin, direction)
    }

    /// Re-expresses the distance `t` along `ray_old` as a distance along
    /// `ray_new`, where `ray_new` is `ray_old` carried by `transform`.
    ///
    /// Perspective transforms do not preserve parametric distance, so the
    /// point at `t` is transformed and measured from the new origin. NaN, zero
    /// and `T::MAX` are sentinels and pass through unchanged.
    pub fn transform_t(transform: &Transform<T>, ray_old: &Ray3<T>, ray_new: &Ray3<T>, t: T) -> T {
        if t.is_nan() || t == T::zero() || t >= T::MAX {
            return t;
        }

        let p = transform.apply_point_and_divide(&ray_old.point_at(t));
        (p - ray_new.origin).norm()
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        write_point3(out, &self.origin)?;
        write_vector3(out, &self.direction)
    }

    /// A direction already of unit length within `NORMALIZATION_THRESHOLD`
    /// is kept bit for bit; any other is normalized.
    pub fn read<R: Read + ?Sized>(input: &mut R) -> std::io::Result<Self> {
        let origin = read_point3(input)?;
        let direction = read_vector3(input)?;
        if is_unit(&direction) {
            Ok(Self { origin, direction })
        } else {
            Ok(Ray3::new(origin, direction))
        }
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angle::Angle;
    use std::io::Cursor;

    #[test]
    fn test_ray3() {
        let o = Point3::new(0.0f32, 0.0, 0.0);
        let d = Vector3::new(1.0f32, 0.0, 1.0);
        let ray = Ray3::new(o, d);
        assert_eq!(o, ray.origin());
        assert!((ray.direction().norm() - 1.0).abs() < 1e-6);

        let p = ray.point_at(2.0);
        assert!((p.x - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_try_new_rejects_zero_direction() {
        assert!(Ray3::try_new(Point3::<f64>::origin(), Vector3::zeros()).is_err());
        assert!(Ray3::new(Point3::<f64>::origin(), Vector3::zeros()).direction().x.is_nan());
        assert!(Ray3::try_new(Point3::<f64>::origin(), Vector3::z()).is_ok());
    }

    #[test]
    fn test_transform_t_scales_with_the_space() {
        let transform = Transform::scale(&Vector3::new(2.0f64, 2.0, 2.0))
            .compose(&Transform::rotate_y(Angle::from_degrees(45.0)));
        let ray_old = Ray3::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let ray_new = ray_old.transform(&transform);

        let t_new = Ray3::transform_t(&transform, &ray_old, &ray_new, 3.0);
        assert!((t_new - 6.0).abs() < 1e-9);
        let expected = transform.apply_point(&ray_old.point_at(3.0));
        assert!((ray_new.point_at(t_new) - expected).norm() < 1e-9);
    }

    #[test]
    fn test_transform_t_sentinels() {
        let transform = Transform::scale(&Vector3::new(3.0f64, 3.0, 3.0));
        let ray_old = Ray3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let ray_new = ray_old.transform(&transform);

        assert!(Ray3::transform_t(&transform, &ray_old, &ray_new, f64::NAN).is_nan());
        assert_eq!(Ray3::transform_t(&transform, &ray_old, &ray_new, 0.0), 0.0);
        assert_eq!(Ray3::transform_t(&transform, &ray_old, &ray_new, f64::MAX), f64::MAX);
        assert!((Ray3::transform_t(&transform, &ray_old, &ray_new, 1.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_t_under_perspective() {
        let transform = Transform::perspective(Angle::from_degrees(60.0f64), 1.5, 0.1, 100.0);
        // In front of the camera, so the whole ray keeps a positive w.
        let ray_old = Ray3::new(Point3::new(0.5, -0.25, -1.0), Vector3::new(0.2, 0.1, -1.0));
        let ray_new = ray_old.transform(&transform);

        for &t in [0.5, 2.0, 7.5].iter() {
            let t_new = Ray3::transform_t(&transform, &ray_old, &ray_new, t);
            let expected = transform.apply_point_and_divide(&ray_old.point_at(t));
            assert!((ray_new.point_at(t_new) - expected).norm() < 1e-6, "t {} -> {}", t, t_new);
        }

        // The projection squeezes depth, so equal steps along the old ray
        // are unequal along the new one.
        let near = Ray3::transform_t(&transform, &ray_old, &ray_new, 2.0);
        let far = Ray3::transform_t(&transform, &ray_old, &ray_new, 4.0);
        assert!((far - 2.0 * near).abs() > 1e-3);
    }

    #[test]
    fn test_write_then_read() {
        let ray = Ray3::new(Point3::new(1.0f64, -2.0, 0.5), Vector3::new(0.0, 3.0, 4.0));
        let mut bytes = Vec::new();
        ray.write(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 6 * 8);
        assert_eq!(Ray3::<f64>::read(&mut Cursor::new(bytes)).unwrap(), ray);

        let ray = Ray3::new(Point3::new(0.1f32, 0.2, 0.3), Vector3::new(-1.0, 2.0, -2.0));
        let mut bytes = Vec::new();
        ray.write(&mut bytes).unwrap();
        assert_eq!(Ray3::<f32>::read(&mut Cursor::new(bytes)).unwrap(), ray);
    }

    #[test]
    fn test_read_normalizes_foreign_direction() {
        let mut bytes = Vec::new();
        write_point3(&mut bytes, &Point3::new(0.0f64, 0.0, 0.0)).unwrap();
        write_vector3(&mut bytes, &Vector3::new(0.0f64, 0.0, 2.0)).unwrap();
        let ray = Ray3::<f64>::read(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(ray.direction(), Vector3::z());
    }
}
