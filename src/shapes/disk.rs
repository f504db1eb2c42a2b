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
use crate::math::ray::Ray3;
use crate::shapes::{azimuth, check_non_negative, check_phi_max, fraction_of};

pub const ID: i32 = 3;

/// An annular sector in the plane z = 0, facing +z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Disk<T: Real> {
    phi_max: Angle<T>,
    radius_inner: T,
    radius_outer: T,
}

impl<T: Real> Disk<T> {
    pub fn new(phi_max: Angle<T>, radius_inner: T, radius_outer: T) -> Result<Self> {
        let phi_max = check_phi_max(phi_max)?;
        let radius_inner = check_non_negative("radius_inner", radius_inner)?;
        let radius_outer = check_non_negative("radius_outer", radius_outer)?;
        if radius_inner > radius_outer {
            log::warn!("rejected disk with inner radius {} above outer radius {}", radius_inner, radius_outer);
            return Err(GeometryError::InvalidArgument(format!(
                "radius_inner {} exceeds radius_outer {}", radius_inner, radius_outer)));
        }
        Ok(Self { phi_max, radius_inner, radius_outer })
    }

    /// A full disk of the given radius.
    pub fn with_radius(radius: T) -> Result<Self> {
        Self::new(Angle::full(), T::zero(), radius)
    }

    pub fn phi_max(&self) -> Angle<T> {
        self.phi_max
    }

    pub fn radius_inner(&self) -> T {
        self.radius_inner
    }

    pub fn radius_outer(&self) -> T {
        self.radius_outer
    }

    /// Distance, hit point and azimuth of the accepted plane crossing.
    fn hit(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<(T, Point3<T>, T)> {
        let o = ray.origin();
        let d = ray.direction();
        if d.z == T::zero() {
            return None;
        }

        let t = -o.z / d.z;
        if !(t > t_min && t < t_max) {
            return None;
        }

        let p = ray.point_at(t);
        let distance_squared = p.x * p.x + p.y * p.y;
        if distance_squared > self.radius_outer * self.radius_outer
            || distance_squared < self.radius_inner * self.radius_inner {
            return None;
        }

        let phi = azimuth(p.x, p.y);
        if phi > self.phi_max.radians() {
            return None;
        }

        // The crossing lies on the plane exactly.
        Some((t, Point3::new(p.x, p.y, T::zero()), phi))
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let phi_max = Angle::read(input)?;
        let radius_inner = T::read_be(input)?;
        let radius_outer = T::read_be(input)?;
        Self::new(phi_max, radius_inner, radius_outer)
    }
}

impl<T: Real> Shape3<T> for Disk<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Disk"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        let r = self.radius_outer;
        AxisAlignedBoundingBox3::new(Point3::new(-r, -r, T::zero()), Point3::new(r, r, T::zero()))
    }

    fn surface_area(&self) -> T {
        self.phi_max.radians() * T::cast(0.5)
            * (self.radius_outer * self.radius_outer - self.radius_inner * self.radius_inner)
    }

    /// True for points on the sector, within `EPSILON` of the plane.
    fn contains(&self, p: &Point3<T>) -> bool {
        if p.z.abs() > T::cast(EPSILON) {
            return false;
        }
        let distance_squared = p.x * p.x + p.y * p.y;
        distance_squared <= self.radius_outer * self.radius_outer
            && distance_squared >= self.radius_inner * self.radius_inner
            && azimuth(p.x, p.y) <= self.phi_max.radians()
    }

    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        let (t, p, phi) = self.hit(ray, t_min, t_max)?;

        let r = (p.x * p.x + p.y * p.y).sqrt();
        let u = fraction_of(phi, self.phi_max.radians());
        let v = fraction_of(self.radius_outer - r, self.radius_outer - self.radius_inner);

        let normal = Vector3::z();
        // v grows towards the center; at the center itself no direction is preferred.
        let basis = if r > T::zero() {
            OrthonormalBasis::from_w_v(normal, Vector3::new(-p.x, -p.y, T::zero()))
        } else {
            OrthonormalBasis::from_w(normal)
        };

        Some(SurfaceIntersection::new(self, *ray, t, p, basis, basis, Point2::new(u, v)))
    }

    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        self.hit(ray, t_min, t_max).map(|(t, _, _)| t)
    }

    fn sample(&self, u: &Point2<T>) -> Option<SurfaceSample<T>> {
        let area = self.surface_area();
        if !(area > T::zero()) {
            return None;
        }

        let ri2 = self.radius_inner * self.radius_inner;
        let ro2 = self.radius_outer * self.radius_outer;
        let r = (u.x * (ro2 - ri2) + ri2).sqrt();
        let phi = u.y * self.phi_max.radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        Some(SurfaceSample::new(Point3::new(r * cos_phi, r * sin_phi, T::zero()),
                                Vector3::z(),
                                T::one() / area))
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, ID)?;
        self.phi_max.write(out)?;
        self.radius_inner.write_be(out)?;
        self.radius_outer.write_be(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    fn down(x: f64, y: f64) -> Ray3<f64> {
        Ray3::new(Point3::new(x, y, 1.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_full_disk_hit() {
        let disk = Disk::with_radius(2.0f64).unwrap();
        let hit = disk.intersection(&down(0.0, 0.0), 0.0, f64::MAX).unwrap();
        assert!((hit.t() - 1.0).abs() < 1e-12);
        assert_eq!(hit.p(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hit.geo_normal(), Vector3::z());
        assert!((hit.uv().y - 1.0).abs() < 1e-12);
        assert!(hit.orthonormal_basis_g().is_orthonormal(1e-9));

        let hit = disk.intersection(&down(1.0, 0.0), 0.0, f64::MAX).unwrap();
        assert!((hit.uv().x - 0.0).abs() < 1e-12);
        assert!((hit.uv().y - 0.5).abs() < 1e-12);
        assert!((hit.orthonormal_basis_g().u() - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_radial_and_angular_extent() {
        let disk = Disk::new(Angle::from_degrees(90.0), 0.5, 1.0f64).unwrap();
        assert!(disk.intersection_t(&down(0.7, 0.1), 0.0, f64::MAX).is_some());
        // Inside the hole.
        assert!(disk.intersection_t(&down(0.2, 0.1), 0.0, f64::MAX).is_none());
        // Beyond the rim.
        assert!(disk.intersection_t(&down(1.2, 0.1), 0.0, f64::MAX).is_none());
        // Outside the sweep.
        assert!(disk.intersection_t(&down(-0.7, 0.1), 0.0, f64::MAX).is_none());
        assert!(disk.intersection_t(&down(0.1, -0.7), 0.0, f64::MAX).is_none());
    }

    #[test]
    fn test_parallel_and_interval() {
        let disk = Disk::with_radius(1.0f64).unwrap();
        let parallel = Ray3::new(Point3::new(-2.0, 0.0, 0.0), Vector3::x());
        assert!(disk.intersection(&parallel, 0.0, f64::MAX).is_none());
        assert!(disk.intersection_t(&down(0.0, 0.0), 0.0, 1.0).is_none());
        assert!(disk.intersection_t(&down(0.0, 0.0), 1.0, 2.0).is_none());
        assert!(disk.intersection_t(&down(0.0, 0.0), 0.5, 1.5).is_some());
    }

    #[test]
    fn test_validation() {
        assert!(Disk::new(Angle::from_degrees(-10.0), 0.0, 1.0f64).is_err());
        assert!(Disk::new(Angle::from_degrees(370.0), 0.0, 1.0f64).is_err());
        assert!(matches!(Disk::new(Angle::full(), 2.0, 1.0f64), Err(GeometryError::InvalidArgument(_))));
        assert!(Disk::new(Angle::full(), -1.0, 1.0f64).is_err());
    }

    #[test]
    fn test_sampling_stays_on_sector() {
        let disk = Disk::new(Angle::from_degrees(180.0), 0.5, 2.0f64).unwrap();
        let area = std::f64::consts::PI * 0.5 * (4.0 - 0.25);
        assert!((disk.surface_area() - area).abs() < 1e-12);

        let mut rng = LcgRng::new(31);
        for _ in 0..512 {
            let sample = disk.sample(&rng.next_point2()).unwrap();
            assert!(disk.contains(&sample.p()), "{:?}", sample);
            assert!((sample.pdf() - 1.0 / area).abs() < 1e-12);
        }
        assert!(Disk::with_radius(0.0f64).unwrap().sample(&Point2::new(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_degenerate_extents_keep_uv_finite() {
        // A zero-width ring is still hit exactly on its radius.
        let ring = Disk::new(Angle::full(), 1.0, 1.0f64).unwrap();
        let hit = ring.intersection(&down(1.0, 0.0), 0.0, f64::MAX).unwrap();
        assert_eq!(hit.uv(), Point2::new(0.0, 0.0));

        // A zero sweep keeps only the ray along phi = 0.
        let sliver = Disk::new(Angle::zero(), 0.0, 1.0f64).unwrap();
        let hit = sliver.intersection(&down(0.5, 0.0), 0.0, f64::MAX).unwrap();
        assert_eq!(hit.uv().x, 0.0);
        assert!((hit.uv().y - 0.5).abs() < 1e-12);
        assert!(sliver.intersection_t(&down(0.5, 0.1), 0.0, f64::MAX).is_none());
    }
}
