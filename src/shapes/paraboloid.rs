// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::core::shape::Shape3;
use crate::error::{GeometryError, Result};
use crate::io::binary::{expect_id, write_id};
use crate::math::aabb::AxisAlignedBoundingBox3;
use crate::math::angle::Angle;
use crate::math::constants::{Point2, Point3, Real, Vector3, EPSILON};
use crate::math::frame::OrthonormalBasis;
use crate::math::quadratic::{first_valid, solve_quadratic};
use crate::math::ray::Ray3;
use crate::shapes::{azimuth, check_non_negative, check_phi_max, fraction_of};

pub const ID: i32 = 5;

/// The bowl `z = (x^2 + y^2) z_max / r^2`, opening towards +z, cut to
/// `[z_min, z_max]` and swept through `phi_max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Paraboloid<T: Real> {
    phi_max: Angle<T>,
    radius: T,
    z_min: T,
    z_max: T,
}

impl<T: Real> Paraboloid<T> {
    pub fn new(phi_max: Angle<T>, radius: T, z0: T, z1: T) -> Result<Self> {
        let phi_max = check_phi_max(phi_max)?;
        let radius = check_non_negative("radius", radius)?;
        let z_max = z0.max(z1);
        if radius == T::zero() || !(z_max > T::zero()) {
            log::warn!("rejected degenerate paraboloid: radius {}, z_max {}", radius, z_max);
            return Err(GeometryError::InvalidArgument(format!(
                "paraboloid needs a positive radius and z_max, got {} and {}", radius, z_max)));
        }
        // The bowl does not reach below its apex.
        let z_min = z0.min(z1).max(T::zero());
        Ok(Self { phi_max, radius, z_min, z_max })
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

    /// Curvature `k` of `z = k (x^2 + y^2)`.
    fn k(&self) -> T {
        self.z_max / (self.radius * self.radius)
    }

    /// Antiderivative of the area along z, up to `phi c^2 / 12`.
    fn area_term(&self, z: T) -> T {
        let c = T::one() / self.k();
        (T::one() + T::cast(4.0) * z / c).powf(T::cast(1.5))
    }

    fn accepts(&self, p: &Point3<T>) -> bool {
        p.z >= self.z_min && p.z <= self.z_max && azimuth(p.x, p.y) <= self.phi_max.radians()
    }

    fn hit(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        let o = ray.origin();
        let d = ray.direction();
        let k = self.k();

        let a = k * (d.x * d.x + d.y * d.y);
        let b = T::cast(2.0) * k * (d.x * o.x + d.y * o.y) - d.z;
        let c = k * (o.x * o.x + o.y * o.y) - o.z;

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

impl<T: Real> Shape3<T> for Paraboloid<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Paraboloid"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        let r = self.radius;
        AxisAlignedBoundingBox3::new(Point3::new(-r, -r, self.z_min), Point3::new(r, r, self.z_max))
    }

    fn surface_area(&self) -> T {
        let c = T::one() / self.k();
        self.phi_max.radians() * c * c / T::cast(12.0)
            * (self.area_term(self.z_max) - self.area_term(self.z_min))
    }

    /// True for points on the bowl, within `EPSILON` along z.
    fn contains(&self, p: &Point3<T>) -> bool {
        let on_surface = self.k() * (p.x * p.x + p.y * p.y) - p.z;
        on_surface.abs() <= T::cast(EPSILON) && self.accepts(p)
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        let t = self.hit(ray, t_min, t_max)?;
        let p = ray.point_at(t);
        let k = self.k();

        let phi = azimuth(p.x, p.y);
        let uv = Point2::new(fraction_of(phi, self.phi_max.radians()),
                             fraction_of(p.z - self.z_min, self.z_max - self.z_min));

        let two = T::cast(2.0);
        let normal = Vector3::new(two * k * p.x, two * k * p.y, -T::one()).normalize();
        // v runs up the meridian, which has no direction at the apex.
        let basis = if p.x == T::zero() && p.y == T::zero() {
            OrthonormalBasis::from_w(normal)
        } else {
            OrthonormalBasis::from_w_v(normal, Vector3::new(p.x, p.y, two * p.z))
        };

        Some(SurfaceIntersection::new(self, *ray, t, p, basis, basis, uv))
    }

    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        self.hit(ray, t_min, t_max)
    }

    /// Uniform by area: the area below height z grows with
    /// `(1 + 4 z / c)^(3/2)`, so that term is drawn uniformly and inverted.
    fn sample(&self, u: &Point2<T>) -> Option<SurfaceSample<T>> {
        let area = self.surface_area();
        if !(area > T::zero()) {
            return None;
        }

        let k = self.k();
        let c = T::one() / k;
        let s_min = self.area_term(self.z_min);
        let s_max = self.area_term(self.z_max);
        let s = s_min + (s_max - s_min) * u.x;
        let z = c / T::cast(4.0) * (s.powf(T::cast(2.0 / 3.0)) - T::one());
        let z = z.max(self.z_min).min(self.z_max);
        let rho = (c * z).sqrt();

        let phi = u.y * self.phi_max.radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let p = Point3::new(rho * cos_phi, rho * sin_phi, z);
        let two = T::cast(2.0);
        let normal = Vector3::new(two * k * p.x, two * k * p.y, -T::one());

        Some(SurfaceSample::new(p, normal, T::one() / area))
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
