// Copyright 2020 @TwoCookingMice

use nalgebra::Unit;

use super::angle::Angle;
use super::constants::{Matrix4, Point3, Real, Vector3};

/// A 4x4 matrix paired with its inverse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform<T: Real> {
    matrix: Matrix4<T>,
    inv_matrix: Matrix4<T>,
}

impl<T: Real> Default for Transform<T> {
    fn default() -> Self {
        Self { matrix: Matrix4::identity(),
               inv_matrix: Matrix4::identity() }
    }
}

impl<T: Real> Transform<T> {
    /// A singular `matrix` gets the identity as its inverse.
    pub fn new(matrix: Matrix4<T>) -> Self {
        let inv_matrix = match matrix.try_inverse() {
            Some(inv_matrix) => inv_matrix,
            None => {
                log::warn!("singular transform matrix, using the identity as its inverse");
                Matrix4::identity()
            }
        };
        Self { matrix, inv_matrix }
    }

    pub fn from_pair(matrix: Matrix4<T>, inv_matrix: Matrix4<T>) -> Self {
        Self { matrix, inv_matrix }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translate(offset: &Vector3<T>) -> Self {
        Self::from_pair(Matrix4::new_translation(offset),
                        Matrix4::new_translation(&-offset))
    }

    pub fn scale(factors: &Vector3<T>) -> Self {
        Self::new(Matrix4::new_nonuniform_scaling(factors))
    }

    pub fn rotate(axis: &Vector3<T>, angle: Angle<T>) -> Self {
        let axis = Unit::new_normalize(*axis);
        let matrix = Matrix4::from_axis_angle(&axis, angle.radians());
        Self::from_pair(matrix, matrix.transpose())
    }

    pub fn rotate_x(angle: Angle<T>) -> Self {
        Self::rotate(&Vector3::x(), angle)
    }

    pub fn rotate_y(angle: Angle<T>) -> Self {
        Self::rotate(&Vector3::y(), angle)
    }

    pub fn rotate_z(angle: Angle<T>) -> Self {
        Self::rotate(&Vector3::z(), angle)
    }

    /// Perspective projection looking down -z, with a vertical field of view.
    pub fn perspective(fov: Angle<T>, aspect: T, z_near: T, z_far: T) -> Self {
        Self::new(Matrix4::new_perspective(aspect, fov.radians(), z_near, z_far))
    }

    pub fn matrix(&self) -> &Matrix4<T> {
        &self.matrix
    }

    pub fn inverse_matrix(&self) -> &Matrix4<T> {
        &self.inv_matrix
    }

    pub fn inverse(&self) -> Self {
        Self { matrix: self.inv_matrix, inv_matrix: self.matrix }
    }

    /// `self` applied after `other`.
    pub fn compose(&self, other: &Transform<T>) -> Self {
        Self { matrix: self.matrix * other.matrix,
               inv_matrix: other.inv_matrix * self.inv_matrix }
    }

    /// False when the bottom row is anything but `[0, 0, 0, 1]`, as for a
    /// perspective projection.
    pub fn is_affine(&self) -> bool {
        let m = &self.matrix;
        m[(3, 0)] == T::zero() && m[(3, 1)] == T::zero() && m[(3, 2)] == T::zero() && m[(3, 3)] == T::one()
    }

    /// Affine point transform, the homogeneous row is ignored.
    pub fn apply_point(&self, p: &Point3<T>) -> Point3<T> {
        let m = &self.matrix;
        Point3::new(m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)] * p.z + m[(0, 3)],
                    m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)] * p.z + m[(1, 3)],
                    m[(2, 0)] * p.x + m[(2, 1)] * p.y + m[(2, 2)] * p.z + m[(2, 3)])
    }

    pub fn apply_point_and_divide(&self, p: &Point3<T>) -> Point3<T> {
        let m = &self.matrix;
        let q = self.apply_point(p);
        let w = m[(3, 0)] * p.x + m[(3, 1)] * p.y + m[(3, 2)] * p.z + m[(3, 3)];
        if w == T::one() {
            q
        } else {
            Point3::new(q.x / w, q.y / w, q.z / w)
        }
    }

    pub fn apply_vector(&self, v: &Vector3<T>) -> Vector3<T> {
        mul_linear(&self.matrix, v)
    }

    pub fn apply_vector_transpose(&self, v: &Vector3<T>) -> Vector3<T> {
        mul_linear_transpose(&self.matrix, v)
    }

    // Normal transformation is different from point transformation.
    // Before transformation, we have n^Tx = 0
    // After transformation, we have (Sn)^T(Mx) = 0
    // Then, we will get: S = (M^{-1})^T
    pub fn apply_normal(&self, n: &Vector3<T>) -> Vector3<T> {
        mul_linear_transpose(&self.inv_matrix, n)
    }

    pub fn inv_apply_point(&self, p: &Point3<T>) -> Point3<T> {
        self.inverse().apply_point_and_divide(p)
    }

    pub fn inv_apply_vector(&self, v: &Vector3<T>) -> Vector3<T> {
        mul_linear(&self.inv_matrix, v)
    }
}

fn mul_linear<T: Real>(m: &Matrix4<T>, v: &Vector3<T>) -> Vector3<T> {
    Vector3::new(m[(0, 0)] * v.x + m[(0, 1)] * v.y + m[(0, 2)] * v.z,
                 m[(1, 0)] * v.x + m[(1, 1)] * v.y + m[(1, 2)] * v.z,
                 m[(2, 0)] * v.x + m[(2, 1)] * v.y + m[(2, 2)] * v.z)
}

fn mul_linear_transpose<T: Real>(m: &Matrix4<T>, v: &Vector3<T>) -> Vector3<T> {
    Vector3::new(m[(0, 0)] * v.x + m[(1, 0)] * v.y + m[(2, 0)] * v.z,
                 m[(0, 1)] * v.x + m[(1, 1)] * v.y + m[(2, 1)] * v.z,
                 m[(0, 2)] * v.x + m[(1, 2)] * v.y + m[(2, 2)] * v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Vector3<f64>, b: &Vector3<f64>) {
        assert!((a - b).norm() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotation() {
        let t = Transform::rotate_z(Angle::from_degrees(90.0f64));
        assert_close(&t.apply_vector(&Vector3::x()), &Vector3::y());
        assert_close(&t.inv_apply_vector(&Vector3::y()), &Vector3::x());
        assert_close(&t.apply_normal(&Vector3::x()), &Vector3::y());
        assert_close(&t.apply_vector_transpose(&Vector3::y()), &Vector3::x());
    }

    #[test]
    fn test_translate_and_compose() {
        let t = Transform::translate(&Vector3::new(1.0f64, 2.0, 3.0));
        let s = Transform::scale(&Vector3::new(2.0, 2.0, 2.0));
        let p = Point3::new(1.0, 1.0, 1.0);

        assert_eq!(t.apply_point(&p), Point3::new(2.0, 3.0, 4.0));
        assert_eq!(t.apply_vector(&Vector3::x()), Vector3::x());

        let ts = t.compose(&s);
        assert_eq!(ts.apply_point(&p), Point3::new(3.0, 4.0, 5.0));
        let back = ts.inv_apply_point(&Point3::new(3.0, 4.0, 5.0));
        assert_close(&back.coords, &p.coords);
    }

    #[test]
    fn test_perspective_divide() {
        let t = Transform::perspective(Angle::from_degrees(90.0f64), 1.0, 1.0, 100.0);
        let near = t.apply_point_and_divide(&Point3::new(0.0, 0.0, -1.0));
        let far = t.apply_point_and_divide(&Point3::new(0.0, 0.0, -100.0));
        assert!((near.z + 1.0).abs() < 1e-9);
        assert!((far.z - 1.0).abs() < 1e-9);
        assert!(!t.is_affine());
        assert!(Transform::translate(&Vector3::new(1.0f64, 2.0, 3.0)).is_affine());
    }

    #[test]
    fn test_singular_matrix_falls_back() {
        let t = Transform::new(Matrix4::<f64>::zeros());
        assert_eq!(*t.inverse_matrix(), Matrix4::identity());
    }
}
