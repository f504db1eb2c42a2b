// Copyright @yucwang 2023

use std::fmt::Debug;
use std::io::Write;

use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
use crate::error::Result;
use crate::math::aabb::AxisAlignedBoundingBox3;
use crate::math::constants::{Point2, Point3, Real};
use crate::math::ray::Ray3;
use crate::shapes::rectangle::Rectangle2;

/// A surface in 3D. Intersection queries accept a root `t` only when
/// `t_min < t < t_max`.
pub trait Shape3<T: Real>: Debug + Send + Sync {
    /// Type ID written in front of the serialized fields.
    fn id(&self) -> i32;
    fn name(&self) -> &'static str;
    fn bounding_volume(&self) -> AxisAlignedBoundingBox3<T>;
    fn surface_area(&self) -> T;
    fn contains(&self, p: &Point3<T>) -> bool;
    fn intersection(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<SurfaceIntersection<'_, T>>;
    fn intersection_t(&self, ray: &Ray3<T>, t_min: T, t_max: T) -> Option<T>;
    fn sample(&self, u: &Point2<T>) -> Option<SurfaceSample<T>>;
    fn write(&self, out: &mut dyn Write) -> Result<()>;
}

/// A planar figure.
pub trait Shape2<T: Real>: Debug + Send + Sync {
    fn id(&self) -> i32;
    fn name(&self) -> &'static str;
    fn bounds(&self) -> Rectangle2<T>;
    fn contains(&self, p: &Point2<T>) -> bool;
    fn write(&self, out: &mut dyn Write) -> Result<()>;
}
