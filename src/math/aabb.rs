// Copyright 2020 @TwoCookingMice

use std::fmt::Debug;
use std::io::{Read, Write};

use super::constants::{Point3, Real, Vector3};
use super::ray::Ray3;
use super::transform::Transform;
use crate::error::{GeometryError, Result};
use crate::io::binary::{expect_id, read_point3, write_id, write_point3};

pub const AXIS_ALIGNED_BOUNDING_BOX_ID: i32 = 1;
pub const BOUNDING_SPHERE_ID: i32 = 2;
pub const INFINITE_BOUNDING_VOLUME_ID: i32 = 3;

/// A volume used to cull queries before the exact shape test.
pub trait BoundingVolume3<T: Real>: Debug + Send + Sync {
    fn id(&self) -> i32;
    fn contains(&self, p: &Point3<T>) -> bool;
    /// Entry and exit distances clipped to `[t_min, t_max]`.
    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, T)>;
    fn transform(&self, transform: &Transform<T>) -> Box<dyn BoundingVolume3<T>>;
    fn minimum(&self) -> Point3<T>;
    fn maximum(&self) -> Point3<T>;
    fn surface_area(&self) -> T;
    fn volume(&self) -> T;
    fn write(&self, out: &mut dyn Write) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisAlignedBoundingBox3<T: Real> {
    pub p_min: Point3<T>,
    pub p_max: Point3<T>,
}

impl<T: Real> Default for AxisAlignedBoundingBox3<T> {
    /// An empty box that any point expands.
    fn default() -> Self {
        Self { p_min: Point3::new(T::MAX, T::MAX, T::MAX),
               p_max: Point3::new(-T::MAX, -T::MAX, -T::MAX) }
    }
}

impl<T: Real> AxisAlignedBoundingBox3<T> {
    pub fn new(a: Point3<T>, b: Point3<T>) -> Self {
        let mut p_min = a;
        let mut p_max = b;
        for idx in 0..3 {
            p_min[idx] = a[idx].min(b[idx]);
            p_max[idx] = a[idx].max(b[idx]);
        }
        Self { p_min, p_max }
    }

    pub fn from_points(points: &[Point3<T>]) -> Self {
        let mut bbox = Self::default();
        for p in points {
            bbox.expand_by_point(p);
        }
        bbox
    }

    pub fn center(&self) -> Point3<T> {
        Point3::from((self.p_min.coords + self.p_max.coords) * T::cast(0.5))
    }

    pub fn expand_by_point(&mut self, p: &Point3<T>) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        result.expand_by_point(&other.p_min);
        result.expand_by_point(&other.p_max);
        result
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let mut result = *self;
        for idx in 0..3 {
            result.p_min[idx] = self.p_min[idx].max(other.p_min[idx]);
            result.p_max[idx] = self.p_max[idx].min(other.p_max[idx]);
        }
        result
    }

    pub fn diagonal(&self) -> Vector3<T> {
        self.p_max - self.p_min
    }

    pub fn max_extent(&self) -> usize {
        let diagonal = self.diagonal();
        if diagonal[0] > diagonal[1] && diagonal[0] > diagonal[2] {
            0
        } else if diagonal[1] > diagonal[2] {
            1
        } else {
            2
        }
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= self.p_max[idx])
    }

    /// Slab test.
    pub fn ray_intersect_range(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, T)> {
        if !self.is_valid() {
            return None;
        }

        let o = ray.origin();
        let d = ray.direction();
        let mut t_min = t_min;
        let mut t_max = t_max;

        for idx in 0..3 {
            let dir = d[idx];
            if dir.abs() < T::cast(1e-8) {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return None;
                }
                continue;
            }

            let inv = T::one() / dir;
            let mut t0 = (self.p_min[idx] - o[idx]) * inv;
            let mut t1 = (self.p_max[idx] - o[idx]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some((t_min, t_max))
    }

    pub fn corners(&self) -> [Point3<T>; 8] {
        let (a, b) = (self.p_min, self.p_max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    pub fn transformed(&self, transform: &Transform<T>) -> Self {
        let corners: Vec<Point3<T>> = self.corners().iter()
            .map(|corner| transform.apply_point_and_divide(corner))
            .collect();
        Self::from_points(&corners)
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, AXIS_ALIGNED_BOUNDING_BOX_ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let p_min = read_point3(input)?;
        let p_max = read_point3(input)?;
        Ok(Self::new(p_min, p_max))
    }
}

impl<T: Real> BoundingVolume3<T> for AxisAlignedBoundingBox3<T> {
    fn id(&self) -> i32 {
        AXIS_ALIGNED_BOUNDING_BOX_ID
    }

    fn contains(&self, p: &Point3<T>) -> bool {
        (0..3).all(|idx| p[idx] >= self.p_min[idx] && p[idx] <= self.p_max[idx])
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, T)> {
        self.ray_intersect_range(ray, t_min, t_max)
    }

    fn transform(&self, transform: &Transform<T>) -> Box<dyn BoundingVolume3<T>> {
        Box::new(self.transformed(transform))
    }

    fn minimum(&self) -> Point3<T> {
        self.p_min
    }

    fn maximum(&self) -> Point3<T> {
        self.p_max
    }

    fn surface_area(&self) -> T {
        let d = self.diagonal();
        T::cast(2.0) * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    fn volume(&self) -> T {
        let d = self.diagonal();
        d.x * d.y * d.z
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, AXIS_ALIGNED_BOUNDING_BOX_ID)?;
        write_point3(out, &self.p_min)?;
        write_point3(out, &self.p_max)?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingSphere3<T: Real> {
    center: Point3<T>,
    radius: T,
}

impl<T: Real> BoundingSphere3<T> {
    pub fn new(center: Point3<T>, radius: T) -> Result<Self> {
        if !(radius >= T::zero()) {
            log::warn!("rejected bounding sphere radius {}", radius);
            return Err(GeometryError::OutOfRange {
                name: "radius", value: radius.as_f64(), range: "[0, +inf)" });
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3<T> {
        self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, BOUNDING_SPHERE_ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let center = read_point3(input)?;
        let radius = T::read_be(input)?;
        Self::new(center, radius)
    }
}

impl<T: Real> BoundingVolume3<T> for BoundingSphere3<T> {
    fn id(&self) -> i32 {
        BOUNDING_SPHERE_ID
    }

    fn contains(&self, p: &Point3<T>) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, T)> {
        let oc = ray.origin() - self.center;
        let d = ray.direction();
        let (t0, t1) = super::quadratic::solve_quadratic(
            d.norm_squared(), T::cast(2.0) * oc.dot(&d), oc.norm_squared() - self.radius * self.radius)?;
        let t0 = t0.max(t_min);
        let t1 = t1.min(t_max);
        if t0 > t1 {
            None
        } else {
            Some((t0, t1))
        }
    }

    /// The radius grows by the largest axis scale of the linear part.
    fn transform(&self, transform: &Transform<T>) -> Box<dyn BoundingVolume3<T>> {
        let scale = transform.apply_vector(&Vector3::x()).norm()
            .max(transform.apply_vector(&Vector3::y()).norm())
            .max(transform.apply_vector(&Vector3::z()).norm());
        Box::new(Self {
            center: transform.apply_point_and_divide(&self.center),
            radius: self.radius * scale,
        })
    }

    fn minimum(&self) -> Point3<T> {
        self.center - Vector3::repeat(self.radius)
    }

    fn maximum(&self) -> Point3<T> {
        self.center + Vector3::repeat(self.radius)
    }

    fn surface_area(&self) -> T {
        T::cast(2.0) * T::two_pi() * self.radius * self.radius
    }

    fn volume(&self) -> T {
        T::cast(4.0 / 3.0) * T::pi() * self.radius * self.radius * self.radius
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, BOUNDING_SPHERE_ID)?;
        write_point3(out, &self.center)?;
        self.radius.write_be(out)?;
        Ok(())
    }
}

/// Contains everything; used for unbounded geometry.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct InfiniteBoundingVolume3;

impl<T: Real> BoundingVolume3<T> for InfiniteBoundingVolume3 {
    fn id(&self) -> i32 {
        INFINITE_BOUNDING_VOLUME_ID
    }

    fn contains(&self, _p: &Point3<T>) -> bool {
        true
    }

    fn intersection(&self, _ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, T)> {
        Some((t_min, t_max))
    }

    fn transform(&self, _transform: &Transform<T>) -> Box<dyn BoundingVolume3<T>> {
        Box::new(InfiniteBoundingVolume3)
    }

    fn minimum(&self) -> Point3<T> {
        Point3::new(-T::MAX, -T::MAX, -T::MAX)
    }

    fn maximum(&self) -> Point3<T> {
        Point3::new(T::MAX, T::MAX, T::MAX)
    }

    fn surface_area(&self) -> T {
        T::INFINITY
    }

    fn volume(&self) -> T {
        T::INFINITY
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, INFINITE_BOUNDING_VOLUME_ID)?;
        Ok(())
    }
}

/* Test for bounding volumes */
