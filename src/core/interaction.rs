// Copyright @yucwang 2023

use crate::core::shape::Shape3;
use crate::math::constants::{Point2, Point3, Real, Vector3};
use crate::math::frame::OrthonormalBasis;
use crate::math::ray::Ray3;
use crate::math::transform::Transform;

/// Everything known about the point where a ray hits a shape.
#[derive(Debug, Clone)]
pub struct SurfaceIntersection<'a, T: Real> {
    shape: &'a dyn Shape3<T>,
    ray: Ray3<T>,
    t: T,
    p: Point3<T>,
    orthonormal_basis_g: OrthonormalBasis<T>,
    orthonormal_basis_s: OrthonormalBasis<T>,
    texture_coordinates: Point2<T>,
}

/// A point drawn on a shape's surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSample<T: Real> {
    p: Point3<T>,
    surface_normal: Vector3<T>,
    pdf: T,
}

impl<'a, T: Real> SurfaceIntersection<'a, T> {
    pub fn new(shape: &'a dyn Shape3<T>,
               ray: Ray3<T>,
               t: T,
               p: Point3<T>,
               orthonormal_basis_g: OrthonormalBasis<T>,
               orthonormal_basis_s: OrthonormalBasis<T>,
               texture_coordinates: Point2<T>) -> Self {
        Self { shape, ray, t, p, orthonormal_basis_g, orthonormal_basis_s, texture_coordinates }
    }

    pub fn shape(&self) -> &'a dyn Shape3<T> {
        self.shape
    }

    pub fn ray(&self) -> &Ray3<T> {
        &self.ray
    }

    pub fn t(&self) -> T {
        self.t
    }

    pub fn p(&self) -> Point3<T> {
        self.p
    }

    pub fn uv(&self) -> Point2<T> {
        self.texture_coordinates
    }

    pub fn orthonormal_basis_g(&self) -> &OrthonormalBasis<T> {
        &self.orthonormal_basis_g
    }

    pub fn orthonormal_basis_s(&self) -> &OrthonormalBasis<T> {
        &self.orthonormal_basis_s
    }

    pub fn geo_normal(&self) -> Vector3<T> {
        self.orthonormal_basis_g.w()
    }

    pub fn sh_normal(&self) -> Vector3<T> {
        self.orthonormal_basis_s.w()
    }

    /// Carries the record into the space of `transform`. The parametric
    /// distance is recomputed against the transformed ray.
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        let ray = self.ray.transform(transform);
        let t = Ray3::transform_t(transform, &self.ray, &ray, self.t);
        Self {
            shape: self.shape,
            ray,
            t,
            p: transform.apply_point_and_divide(&self.p),
            orthonormal_basis_g: self.orthonormal_basis_g.transform_by_normal_matrix(transform),
            orthonormal_basis_s: self.orthonormal_basis_s.transform_by_normal_matrix(transform),
            texture_coordinates: self.texture_coordinates,
        }
    }
}

impl<T: Real> SurfaceSample<T> {
    /// `surface_normal` is normalized here.
    pub fn new(p: Point3<T>, surface_normal: Vector3<T>, pdf: T) -> Self {
        Self { p, surface_normal: surface_normal.normalize(), pdf }
    }

    pub fn p(&self) -> Point3<T> {
        self.p
    }

    pub fn surface_normal(&self) -> Vector3<T> {
        self.surface_normal
    }

    pub fn pdf(&self) -> T {
        self.pdf
    }

    pub fn with_pdf(&self, pdf: T) -> Self {
        Self { pdf, ..*self }
    }
}
