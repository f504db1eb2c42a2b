// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::core::shape::Shape3;
use crate::error::Result;
use crate::io::binary::{expect_id, write_id};
use crate::math::aabb::AxisAlignedBoundingBox3;
use crate::math::angle::Angle;
use crate::math::constants::{Point2, Point3, Real, Vector3, EPSILON};
use crate::math::frame::OrthonormalBasis;
use crate::math::quadratic::{first_valid, solve_quadratic};
use crate::math::ray::Ray3;
use crate::shapes::{azimuth, check_non_negative, check_phi_max, fraction_of};

pub const ID: i32 = 2;

/// An open cylinder around the z axis, swept through `phi_max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cylinder<T: Real> {
    phi_max: Angle<T>,
    radius: T,
    z_min: T,
    z_max: T,
}

impl<T: Real> Cylinder<T> {
    pub fn new(phi_max: Angle<T>, radius: T, z0: T, z1: T) -> Result<Self> {
        Ok(Self {
            phi_max: check_phi_max(phi_max)?,
            radius: check_non_negative("radius", radius)?,
            z_min: z0.min(z1),
            z_max: z0.max(z1),
        })
    }

    pub fn phi_max(&self) -> Angle<T> {
        self.phi_max
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    pub fn z_min(&self) -> T {
        self.z_min
    }

    pub fn z_max(&self) -> T {
        self.z_max
    }

    fn accepts(&self, p: &Point3<T>) -> bool {
        p.z >= self.z_min && p.z <= self.z_max && azimuth(p.x, p.y) <= self.phi_max.radians()
    }

    fn hit(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        let o = ray.origin();
        let d = ray.direction();

        let a = d.x * d.x + d.y * d.y;
        if a == T::zero() {
            // Parallel to the axis.
            return None;
        }
        let b = T::cast(2.0) * (d.x * o.x + d.y * o.y);
        let c = o.x * o.x + o.y * o.y - self.radius * self.radius;

        let roots = solve_quadratic(a, b, c)?;
        first_valid(roots, t_min, t_max, |t| self.accepts(&ray.point_at(t)))
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let phi_max = Angle::read(input)?;
        let radius = T::read_be(input)?;
        let z_min = T::read_be(input)?;
        let z_max = T::read_be(input)?;
        Self::new(phi_max, radius, z_min, z_max)
    }
}

impl<T: Real> Shape3<T> for Cylinder<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Cylinder"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        let r = self.radius;
        AxisAlignedBoundingBox3::new(Point3::new(-r, -r, self.z_min), Point3::new(r, r, self.z_max))
    }

    fn surface_area(&self) -> T {
        (self.z_max - self.z_min) * self.radius * self.phi_max.radians()
    }

    /// True for points on the lateral surface, within `EPSILON` of the radius.
    fn contains(&self, p: &Point3<T>) -> bool {
        let rho = (p.x * p.x + p.y * p.y).sqrt();
        (rho - self.radius).abs() <= T::cast(EPSILON) && self.accepts(p)
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        let t = self.hit(ray, t_min, t_max)?;
        let p = ray.point_at(t);

        let phi = azimuth(p.x, p.y);
        let uv = Point2::new(fraction_of(phi, self.phi_max.radians()),
                             fraction_of(p.z - self.z_min, self.z_max - self.z_min));

        let normal = Vector3::new(p.x, p.y, T::zero()).normalize();
        let basis = OrthonormalBasis::from_w_v(normal, Vector3::z());

        Some(SurfaceIntersection::new(self, *ray, t, p, basis, basis, uv))
    }

    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        self.hit(ray, t_min, t_max)
    }

    fn sample(&self, u: &Point2<T>) -> Option<SurfaceSample<T>> {
        let area = self.surface_area();
        if !(area > T::zero()) {
            return None;
        }

        let z = self.z_min + (self.z_max - self.z_min) * u.x;
        let phi = u.y * self.phi_max.radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let p = Point3::new(self.radius * cos_phi, self.radius * sin_phi, z);

        Some(SurfaceSample::new(p, Vector3::new(cos_phi, sin_phi, T::zero()), T::one() / area))
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, ID)?;
        self.phi_max.write(out)?;
        self.radius.write_be(out)?;
        self.z_min.write_be(out)?;
        self.z_max.write_be(out)?;
        Ok(())
    }
}
