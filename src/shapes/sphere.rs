// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::core::shape::Shape3;
use crate::error::Result;
use crate::io::binary::{expect_id, write_id};
use crate::math::aabb::AxisAlignedBoundingBox3;
use crate::math::constants::{Point2, Point3, Real, Vector3};
use crate::math::frame::OrthonormalBasis;
use crate::math::quadratic::{first_valid, solve_quadratic};
use crate::math::ray::Ray3;
use crate::math::vector::{direction_normalized, distance};
use crate::math::warp::{pdf_cone_uniform, sample_cone_uniform, sample_sphere_uniform};
use crate::shapes::{azimuth, check_non_negative};

pub const ID: i32 = 6;

/// A sphere centered at the origin of its local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere<T: Real> {
    radius: T,
}

impl<T: Real> Sphere<T> {
    pub fn new(radius: T) -> Result<Self> {
        Ok(Self { radius: check_non_negative("radius", radius)? })
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    fn hit(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        let o = ray.origin().coords;
        let d = ray.direction();

        let a = d.norm_squared();
        let b = T::cast(2.0) * o.dot(&d);
        let c = o.norm_squared() - self.radius * self.radius;

        let roots = solve_quadratic(a, b, c)?;
        first_valid(roots, t_min, t_max, |_| true)
    }

    /// Samples the part of the sphere visible from `reference`, with the pdf
    /// per unit solid angle at `reference`.
    ///
    /// From outside, directions are drawn uniformly inside the cone the sphere
    /// subtends. From inside, the area sample is converted to solid angle.
    pub fn sample_from(&self, reference: &Point3<T>, u: &Point2<T>) -> Option<SurfaceSample<T>> {
        let r2 = self.radius * self.radius;
        let dc2 = reference.coords.norm_squared();

        if dc2 <= r2 {
            let sample = self.sample(u)?;
            let dist = distance(reference, &sample.p());
            if dist == T::zero() {
                return None;
            }
            let cos = sample.surface_normal().dot(&direction_normalized(&sample.p(), reference)).abs();
            if cos == T::zero() {
                return None;
            }
            return Some(sample.with_pdf(sample.pdf() * dist * dist / cos));
        }

        let dc = dc2.sqrt();
        let basis = OrthonormalBasis::from_w(-reference.coords);
        let cos_theta_max = (T::one() - r2 / dc2).max(T::zero()).sqrt();
        let local = sample_cone_uniform(u, cos_theta_max);
        let direction = basis.transform(&local).normalize();

        // Nearest root of the ray from `reference` along `direction`.
        let cos_theta = local.z;
        let sin2_theta = (T::one() - cos_theta * cos_theta).max(T::zero());
        let ds = dc * cos_theta - (r2 - dc2 * sin2_theta).max(T::zero()).sqrt();
        let p = reference + direction * ds;
        let normal = p.coords;

        Some(SurfaceSample::new(p, normal, pdf_cone_uniform(cos_theta_max)))
    }

    /// Solid angle density of `sample_from` for `direction` seen from
    /// `reference`.
    pub fn pdf_from(&self, reference: &Point3<T>, direction: &Vector3<T>) -> T {
        let r2 = self.radius * self.radius;
        let dc2 = reference.coords.norm_squared();

        if dc2 <= r2 {
            let ray = Ray3::new(*reference, *direction);
            return match self.intersection(&ray, T::zero(), T::MAX) {
                Some(hit) => {
                    let dist = distance(reference, &hit.p());
                    let cos = hit.geo_normal().dot(&ray.direction()).abs();
                    dist * dist / (cos * self.surface_area())
                }
                None => T::zero(),
            };
        }

        let cos_theta_max = (T::one() - r2 / dc2).max(T::zero()).sqrt();
        pdf_cone_uniform(cos_theta_max)
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Self::new(T::read_be(input)?)
    }
}

impl<T: Real> Shape3<T> for Sphere<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        let r = self.radius;
        AxisAlignedBoundingBox3::new(Point3::new(-r, -r, -r), Point3::new(r, r, r))
    }

    fn surface_area(&self) -> T {
        T::cast(2.0) * T::two_pi() * self.radius * self.radius
    }

    /// Solid ball containment.
    fn contains(&self, p: &Point3<T>) -> bool {
        p.coords.norm_squared() <= self.radius * self.radius
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        let t = self.hit(ray, t_min, t_max)?;
        let p = ray.point_at(t);

        let phi = azimuth(p.x, p.y);
        let theta = (p.z / self.radius).clamp(-T::one(), T::one()).acos();
        let uv = Point2::new(phi / T::two_pi(), theta / T::pi());

        let basis = OrthonormalBasis::from_w(p.coords);

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

        let normal = sample_sphere_uniform(u);
        let p = Point3::from(normal * self.radius);
        Some(SurfaceSample::new(p, normal, T::one() / area))
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, ID)?;
        self.radius.write_be(out)?;
        Ok(())
    }
}
