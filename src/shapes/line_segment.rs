// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::core::shape::{Shape2, Shape3};
use crate::error::{GeometryError, Result};
use crate::io::binary::{expect_id, read_point2, read_point3, write_id, write_point2, write_point3};
use crate::math::aabb::AxisAlignedBoundingBox3;
use crate::math::constants::{line_containment_cos_threshold, Point2, Point3, Real};
use crate::math::ray::Ray3;
use crate::math::vector::distance;
use crate::shapes::rectangle::Rectangle2;

pub const LINE_SEGMENT3_ID: i32 = 4;
pub const LINE_SEGMENT2_ID: i32 = 1;

/// Shared containment test, in terms of the components of `ap = p - a` and
/// `ab = b - a`.
///
/// The point must project inside the segment and the angle between `ap` and
/// `ab` must stay under the small tolerance of
/// `line_containment_cos_threshold`. Everything is evaluated in double
/// precision, since in single precision that threshold rounds to one ulp
/// below 1.
fn projected_contains(ap: &[f64], ab: &[f64]) -> bool {
    let dot = |x: &[f64], y: &[f64]| x.iter().zip(y).map(|(x, y)| x * y).sum::<f64>();
    let ap_norm_squared = dot(ap, ap);
    let ab_norm_squared = dot(ab, ab);
    if ap_norm_squared == 0.0 {
        return true;
    }
    if ab_norm_squared == 0.0 {
        return false;
    }

    let ap_dot_ab = dot(ap, ab);
    let t = ap_dot_ab / ab_norm_squared;
    if t < 0.0 || t > 1.0 {
        return false;
    }

    let cos = ap_dot_ab / (ap_norm_squared.sqrt() * ab_norm_squared.sqrt());
    cos >= line_containment_cos_threshold::<f64>()
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment3<T: Real> {
    a: Point3<T>,
    b: Point3<T>,
}

impl<T: Real> LineSegment3<T> {
    pub fn new(a: Point3<T>, b: Point3<T>) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Point3<T> {
        self.a
    }

    pub fn b(&self) -> Point3<T> {
        self.b
    }

    pub fn length(&self) -> T {
        distance(&self.a, &self.b)
    }

    /// `a` at 0, `b` at 1.
    pub fn point_at(&self, t: T) -> Point3<T> {
        self.a + (self.b - self.a) * t
    }

    /// Ray distance to the segment. Segments have no area, and a ray test
    /// against them needs a thickness that is not defined yet.
    pub fn ray_intersection_t(&self, _ray: &Ray3<T>, _t_min: T, _t_max: T) -> Result<T> {
        Err(GeometryError::Unsupported("ray intersection with a 3D line segment"))
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, LINE_SEGMENT3_ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let a = read_point3(input)?;
        let b = read_point3(input)?;
        Ok(Self::new(a, b))
    }
}

impl<T: Real> Shape3<T> for LineSegment3<T> {
    fn id(&self) -> i32 {
        LINE_SEGMENT3_ID
    }

    fn name(&self) -> &'static str {
        "LineSegment3"
    }

    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T> {
        AxisAlignedBoundingBox3::new(self.a, self.b)
    }

    fn surface_area(&self) -> T {
        T::zero()
    }

    fn contains(&self, p: &Point3<T>) -> bool {
        let ap = (p - self.a).map(|x| x.as_f64());
        let ab = (self.b - self.a).map(|x| x.as_f64());
        projected_contains(ap.as_slice(), ab.as_slice())
    }

    fn intersection(&self, _ray: &Ray3<T>, _t_min: T, _t_max: T) -> Option<SurfaceIntersection<'_, T>> {
        None
    }

    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T> {
        self.ray_intersection_t(ray, t_min, t_max).ok()
    }

    fn sample(&self, _u: &Point2<T>) -> Option<SurfaceSample<T>> {
        None
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, LINE_SEGMENT3_ID)?;
        write_point3(out, &self.a)?;
        write_point3(out, &self.b)?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment2<T: Real> {
    a: Point2<T>,
    b: Point2<T>,
}

impl<T: Real> LineSegment2<T> {
    pub fn new(a: Point2<T>, b: Point2<T>) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Point2<T> {
        self.a
    }

    pub fn b(&self) -> Point2<T> {
        self.b
    }

    pub fn length(&self) -> T {
        (self.b - self.a).norm()
    }

    pub fn point_at(&self, t: T) -> Point2<T> {
        self.a + (self.b - self.a) * t
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, LINE_SEGMENT2_ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let a = read_point2(input)?;
        let b = read_point2(input)?;
        Ok(Self::new(a, b))
    }
}

impl<T: Real> Shape2<T> for LineSegment2<T> {
    fn id(&self) -> i32 {
        LINE_SEGMENT2_ID
    }

    fn name(&self) -> &'static str {
        "LineSegment2"
    }

    fn bounds(&self) -> Rectangle2<T> {
        Rectangle2::new(self.a, self.b)
    }

    fn contains(&self, p: &Point2<T>) -> bool {
        let ap = (p - self.a).map(|x| x.as_f64());
        let ab = (self.b - self.a).map(|x| x.as_f64());
        projected_contains(ap.as_slice(), ab.as_slice())
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, LINE_SEGMENT2_ID)?;
        write_point2(out, &self.a)?;
        write_point2(out, &self.b)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::constants::Vector3;
    use std::io::Cursor;

    const OFFSETS: [(f64, f64); 4] = [(100.0, 0.0), (-100.0, 0.0), (0.0, 100.0), (0.0, -100.0)];

    #[test]
    fn test_segment2_containment() {
        let segment = LineSegment2::new(Point2::new(10.0f64, 0.0), Point2::new(20.0, 0.0));
        let own = [Point2::new(10.0f64, 0.0), Point2::new(20.0, 0.0), Point2::new(15.0, 0.0)];
        for p in own.iter() {
            assert!(segment.contains(p), "{:?}", p);
            for &(dx, dy) in OFFSETS.iter() {
                let shifted = Point2::new(p.x + dx, p.y + dy);
                assert!(!segment.contains(&shifted), "{:?}", shifted);
            }
        }
    }

    #[test]
    fn test_segment2_single_precision() {
        let segment = LineSegment2::new(Point2::new(10.0f32, 0.0), Point2::new(20.0, 0.0));
        assert!(segment.contains(&Point2::new(20.0, 0.0)));
        assert!(segment.contains(&Point2::new(12.5, 0.0)));
        assert!(!segment.contains(&Point2::new(12.5, 1.0)));

        let diagonal = LineSegment2::new(Point2::new(1.0f32, 2.0), Point2::new(7.3, 11.9));
        assert!(diagonal.contains(&diagonal.point_at(0.5)));
        assert!(diagonal.contains(&diagonal.point_at(0.25)));
    }

    #[test]
    fn test_segment3_containment() {
        let segment = LineSegment3::new(Point3::new(10.0f64, 0.0, 0.0), Point3::new(20.0, 0.0, 0.0));
        assert!(segment.contains(&Point3::new(10.0, 0.0, 0.0)));
        assert!(segment.contains(&Point3::new(20.0, 0.0, 0.0)));
        assert!(segment.contains(&segment.point_at(0.5)));
        assert!(!segment.contains(&Point3::new(15.0, 0.0, 100.0)));
        assert!(!segment.contains(&Point3::new(115.0, 0.0, 0.0)));
        // Slightly off the line, within the angular tolerance.
        assert!(segment.contains(&Point3::new(15.0, 1e-6, 0.0)));
        assert!(!segment.contains(&Point3::new(15.0, 1e-2, 0.0)));
    }

    #[test]
    fn test_segment3_single_precision_off_axis() {
        let diagonal = LineSegment3::new(Point3::new(1.5f32, 2.25, 3.0), Point3::new(17.1, 9.7, 13.3));
        assert!(diagonal.contains(&diagonal.point_at(0.5)));
        assert!(!diagonal.contains(&(diagonal.point_at(0.5) + Vector3::new(0.0, 0.5, 0.0))));

        let mut rng = LcgRng::new(13);
        let mut random_point = || {
            Point3::new(rng.next_float::<f32>() * 20.0,
                        rng.next_float::<f32>() * 20.0,
                        rng.next_float::<f32>() * 20.0)
        };
        for _ in 0..10000 {
            let segment = LineSegment3::new(random_point(), random_point());
            assert!(segment.contains(&segment.point_at(0.5)), "{:?}", segment);
        }
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point2::new(1.0f64, 1.0);
        let segment = LineSegment2::new(p, p);
        assert!(segment.contains(&p));
        assert!(!segment.contains(&Point2::new(1.0, 2.0)));
    }

    #[test]
    fn test_segment3_ray_intersection_is_unsupported() {
        let segment = LineSegment3::new(Point3::new(-1.0f64, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let ray = Ray3::new(Point3::new(0.0, -1.0, 0.0), Vector3::y());
        assert!(matches!(segment.ray_intersection_t(&ray, 0.0, f64::MAX),
                         Err(GeometryError::Unsupported(_))));
        assert!(segment.intersection(&ray, 0.0, f64::MAX).is_none());
        assert!(segment.intersection_t(&ray, 0.0, f64::MAX).is_none());
        assert!(segment.sample(&Point2::new(0.5, 0.5)).is_none());
        assert_eq!(segment.surface_area(), 0.0);
    }

    #[test]
    fn test_bounds() {
        let segment = LineSegment3::new(Point3::new(1.0f64, -1.0, 2.0), Point3::new(-1.0, 1.0, 0.0));
        let bounds = segment.bounding_volume();
        assert_eq!(bounds.p_min, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(bounds.p_max, Point3::new(1.0, 1.0, 2.0));
        assert!((segment.length() - 12.0f64.sqrt()).abs() < 1e-12);

        let flat = LineSegment2::new(Point2::new(3.0f64, 1.0), Point2::new(0.0, 2.0));
        assert_eq!(flat.bounds(), Rectangle2::new(Point2::new(0.0, 1.0), Point2::new(3.0, 2.0)));
    }

    #[test]
    fn test_typed_read_restores_segments() {
        let segment = LineSegment3::new(Point3::new(0.5f64, -2.0, 7.25), Point3::new(3.0, 1.0, -4.5));
        let mut bytes = Vec::new();
        Shape3::write(&segment, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 4 + 6 * 8);
        assert_eq!(LineSegment3::<f64>::read(&mut Cursor::new(bytes)).unwrap(), segment);

        let flat = LineSegment2::new(Point2::new(-1.5f32, 4.0), Point2::new(2.0, 0.125));
        let mut bytes = Vec::new();
        Shape2::write(&flat, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 4 + 4 * 4);
        assert_eq!(LineSegment2::<f32>::read(&mut Cursor::new(bytes)).unwrap(), flat);
    }
}
