// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::core::shape::Shape3;
use crate::error::Result;
use crate::io::binary::{expect_id, read_point3, write_id, write_point3};
use crate::math::aabb::{AxisAlignedBoundingBox3, BoundingVolume3};
use crate::math::constants::{Point2, Point3, Real, Vector3};
use crate::math::frame::OrthonormalBasis;
use crate::math::quadratic::first_valid;
use crate::math::ray::Ray3;

pub const ID: i32 = 1;

/// A solid axis-aligned box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Box3<T: Real> {
    bounds: AxisAlignedBoundingBox3<T>,
}

impl<T: Real> Box3<T> {
    /// The box spanned by two opposite corners, in any order.
    pub fn new(a: Point3<T>, b: Point3<T>) -> Self {
        Self { bounds: AxisAlignedBoundingBox3::new(a, b) }
    }

    pub fn minimum(&self) -> Point3<T> {
        self.bounds.p_min
    }

    pub fn maximum(&self) -> Point3<T> {
        self.bounds.p_max
    }

    /// Areas of the faces facing +z, -z, +y, -y, +x, -x.
    fn face_areas(&self) -> [T; 6] {
        let d = self.bounds.diagonal();
        let (xy, xz, yz) = (d.x * d.y, d.x * d.z, d.y * d.z);
        [xy, xy, xz, xz, yz, yz]
    }

    /// Maps `p` into [-1, 1]^3; flat axes map to 0.
    fn to_local(&self, p: &Point3<T>) -> Vector3<T> {
        let center = self.bounds.center();
        let half = self.bounds.diagonal() * T::cast(0.5);
        Vector3::from_fn(|idx, _| {
            if half[idx] > T::zero() {
                (p[idx] - center[idx]) / half[idx]
            } else {
                T::zero()
            }
        })
    }

    fn from_local(&self, local: &Vector3<T>) -> Point3<T> {
        let half = self.bounds.diagonal() * T::cast(0.5);
        self.bounds.center() + local.component_mul(&half)
    }

    fn hit(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        let span = self.bounds.ray_intersect_range(ray, -T::MAX, T::MAX)?;
        first_valid(span, t_min, t_max, |_| true)
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let p_min = read_point3(input)?;
        let p_max = read_point3(input)?;
        Ok(Self::new(p_min, p_max))
    }
}

impl<T: Real> Shape3<T> for Box3<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Box3"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        self.bounds
    }

    fn surface_area(&self) -> T {
        BoundingVolume3::surface_area(&self.bounds)
    }

    fn contains(&self, p: &Point3<T>) -> bool {
        BoundingVolume3::contains(&self.bounds, p)
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        let t = self.hit(ray, t_min, t_max)?;
        let p = ray.point_at(t);
        let local = self.to_local(&p);
        let normal = cube_normal(&local);
        let uv = face_uv(&local, &normal);
        let basis = OrthonormalBasis::from_w(normal);

        Some(SurfaceIntersection::new(self, *ray, t, p, basis, basis, uv))
    }

    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        self.hit(ray, t_min, t_max)
    }

    /// Picks a face in proportion to its area with `u.x`, then reuses the
    /// remainder of `u.x` inside the face.
    fn sample(&self, u: &Point2<T>) -> Option<SurfaceSample<T>> {
        let area = self.surface_area();
        if !(area > T::zero()) {
            return None;
        }

        let face_areas = self.face_areas();
        let target = u.x * area;
        let mut previous = T::zero();
        let mut face = 5;
        for (idx, face_area) in face_areas.iter().enumerate() {
            if target < previous + *face_area {
                face = idx;
                break;
            }
            if idx < 5 {
                previous += *face_area;
            }
        }

        let local_u = if face_areas[face] > T::zero() {
            ((target - previous) / face_areas[face]).clamp(T::zero(), T::one())
        } else {
            T::cast(0.5)
        };

        let (local, normal) = sample_face(face, &Point2::new(local_u, u.y));
        Some(SurfaceSample::new(self.from_local(&local), normal, T::one() / area))
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, ID)?;
        write_point3(out, &self.bounds.p_min)?;
        write_point3(out, &self.bounds.p_max)?;
        Ok(())
    }
}

/// Outward normal of the face closest to `p` in [-1, 1]^3.
fn cube_normal<T: Real>(p: &Vector3<T>) -> Vector3<T> {
    let ax = p.x.abs();
    let ay = p.y.abs();
    let az = p.z.abs();
    let sign = |value: T| if value < T::zero() { -T::one() } else { T::one() };
    if ax >= ay && ax >= az {
        Vector3::new(sign(p.x), T::zero(), T::zero())
    } else if ay >= az {
        Vector3::new(T::zero(), sign(p.y), T::zero())
    } else {
        Vector3::new(T::zero(), T::zero(), sign(p.z))
    }
}

fn face_uv<T: Real>(local: &Vector3<T>, normal: &Vector3<T>) -> Point2<T> {
    let half = T::cast(0.5);
    let (u, v) = if normal.z.abs() > half {
        (local.x, local.y)
    } else if normal.y.abs() > half {
        (local.x, local.z)
    } else {
        (local.y, local.z)
    };
    Point2::new(half * (u + T::one()), half * (v + T::one()))
}

fn sample_face<T: Real>(face: usize, u: &Point2<T>) -> (Vector3<T>, Vector3<T>) {
    let two = T::cast(2.0);
    let a = two * u.x - T::one();
    let b = two * u.y - T::one();
    let (one, zero) = (T::one(), T::zero());
    match face {
        0 => (Vector3::new(a, b, one), Vector3::new(zero, zero, one)),
        1 => (Vector3::new(a, b, -one), Vector3::new(zero, zero, -one)),
        2 => (Vector3::new(a, one, b), Vector3::new(zero, one, zero)),
        3 => (Vector3::new(a, -one, b), Vector3::new(zero, -one, zero)),
        4 => (Vector3::new(one, a, b), Vector3::new(one, zero, zero)),
        _ => (Vector3::new(-one, a, b), Vector3::new(-one, zero, zero)),
    }
}
