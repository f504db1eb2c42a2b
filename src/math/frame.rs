// Copyright @yucwang 2023

use std::io::{Read, Write};

use super::constants::{Real, Vector3};
use super::transform::Transform;
use super::vector::least_aligned_axis;
use crate::io::binary::{read_vector3, write_vector3};

/// A right-handed frame of three unit vectors: `u` tangent, `v` bitangent and
/// `w` normal.
///
/// Orthonormality is assumed rather than enforced, except for the bases built
/// by `from_w` and `from_w_v`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthonormalBasis<T: Real> {
    u: Vector3<T>,
    v: Vector3<T>,
    w: Vector3<T>,
}

impl<T: Real> Default for OrthonormalBasis<T> {
    fn default() -> Self {
        OrthonormalBasis {
            u: Vector3::x(),
            v: Vector3::y(),
            w: Vector3::z(),
        }
    }
}

impl<T: Real> OrthonormalBasis<T> {
    /// Builds a basis around `w` alone. `u` is taken orthogonal to `w` by
    /// crossing in the coordinate axis least aligned with it.
    pub fn from_w(w: Vector3<T>) -> Self {
        let w = w.normalize();
        let u = least_aligned_axis(&w).cross(&w).normalize();
        let v = w.cross(&u);

        OrthonormalBasis { u, v, w }
    }

    /// Builds a basis around `w`, with `v_hint` pointing roughly along `v`.
    /// `u` is exactly orthogonal to `w` even when the hint is not.
    pub fn from_w_v(w: Vector3<T>, v_hint: Vector3<T>) -> Self {
        let w = w.normalize();
        let u = v_hint.normalize().cross(&w).normalize();
        let v = w.cross(&u);

        OrthonormalBasis { u, v, w }
    }

    /// Stores the axes verbatim.
    pub fn from_w_v_u(w: Vector3<T>, v: Vector3<T>, u: Vector3<T>) -> Self {
        OrthonormalBasis { u, v, w }
    }

    pub fn u(&self) -> Vector3<T> {
        self.u
    }

    pub fn v(&self) -> Vector3<T> {
        self.v
    }

    pub fn w(&self) -> Vector3<T> {
        self.w
    }

    pub fn flip(&self) -> Self {
        OrthonormalBasis { u: -self.u, v: -self.v, w: -self.w }
    }

    /// Local frame to ambient frame.
    pub fn transform(&self, vector: &Vector3<T>) -> Vector3<T> {
        self.u * vector.x + self.v * vector.y + self.w * vector.z
    }

    /// Ambient frame to local frame. The transpose is the inverse only because
    /// the basis is orthonormal.
    pub fn transform_reverse(&self, vector: &Vector3<T>) -> Vector3<T> {
        Vector3::new(vector.dot(&self.u), vector.dot(&self.v), vector.dot(&self.w))
    }

    pub fn transform_normalize(&self, vector: &Vector3<T>) -> Vector3<T> {
        self.transform(vector).normalize()
    }

    pub fn transform_reverse_normalize(&self, vector: &Vector3<T>) -> Vector3<T> {
        self.transform_reverse(vector).normalize()
    }

    /// Carries every axis through the linear part of `transform`. Only
    /// rotations and uniform scalings keep the result orthogonal.
    pub fn transform_by(&self, transform: &Transform<T>) -> Self {
        let w = transform.apply_vector(&self.w).normalize();
        let v = transform.apply_vector(&self.v).normalize();
        let u = transform.apply_vector(&self.u).normalize();

        OrthonormalBasis::from_w_v_u(w, v, u)
    }

    /// Like `transform_by`, but through the inverse transpose, the way surface
    /// normals are carried between spaces.
    pub fn transform_by_normal_matrix(&self, transform: &Transform<T>) -> Self {
        let w = transform.apply_normal(&self.w).normalize();
        let v = transform.apply_normal(&self.v).normalize();
        let u = transform.apply_normal(&self.u).normalize();

        OrthonormalBasis::from_w_v_u(w, v, u)
    }

    pub fn is_orthonormal(&self, eps: T) -> bool {
        let unit = |a: &Vector3<T>| (a.norm() - T::one()).abs() <= eps;
        unit(&self.u)
            && unit(&self.v)
            && unit(&self.w)
            && self.u.dot(&self.v).abs() <= eps
            && self.v.dot(&self.w).abs() <= eps
            && self.w.dot(&self.u).abs() <= eps
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        write_vector3(out, &self.w)?;
        write_vector3(out, &self.v)?;
        write_vector3(out, &self.u)
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> std::io::Result<Self> {
        let w = read_vector3(input)?;
        let v = read_vector3(input)?;
        let u = read_vector3(input)?;
        Ok(OrthonormalBasis::from_w_v_u(w, v, u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::angle::Angle;
    use crate::math::warp::sample_sphere_uniform;

    fn axis_inputs() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ]
    }

    fn assert_close(a: &Vector3<f64>, b: &Vector3<f64>) {
        assert!((a - b).norm() < 1e-6, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_from_w_is_orthonormal() {
        let mut rng = LcgRng::new(7);
        let mut inputs = axis_inputs();
        for _ in 0..256 {
            inputs.push(sample_sphere_uniform(&rng.next_point2::<f64>()));
        }

        for w in inputs {
            let basis = OrthonormalBasis::from_w(w);
            assert!(basis.is_orthonormal(1e-6), "{:?}", basis);
            assert_close(&basis.u().cross(&basis.v()), &basis.w());
            assert_close(&basis.w(), &w);
        }
    }

    #[test]
    fn test_from_w_v_is_orthonormal() {
        let mut rng = LcgRng::new(11);
        for w in axis_inputs() {
            for v_hint in axis_inputs() {
                if w.cross(&v_hint).norm() < 0.5 {
                    continue;
                }
                let basis = OrthonormalBasis::from_w_v(w, v_hint);
                assert!(basis.is_orthonormal(1e-6), "{:?}", basis);
                assert_close(&basis.v(), &v_hint);
            }
        }

        for _ in 0..256 {
            let w = sample_sphere_uniform(&rng.next_point2::<f64>());
            let v_hint = sample_sphere_uniform(&rng.next_point2::<f64>());
            if w.cross(&v_hint).norm() < 1e-3 {
                continue;
            }
            let basis = OrthonormalBasis::from_w_v(w, v_hint);
            assert!(basis.is_orthonormal(1e-6), "{:?}", basis);
            assert!(basis.u().dot(&w).abs() < 1e-6);
        }
    }

    #[test]
    fn test_transform_round_trip() {
        let basis = OrthonormalBasis::from_w_v(Vector3::new(1.0f64, 2.0, 3.0), Vector3::new(0.0, 1.0, 0.0));
        let local = Vector3::new(0.25, -0.5, 2.0);
        let ambient = basis.transform(&local);
        assert_close(&basis.transform_reverse(&ambient), &local);
        assert!((basis.transform_normalize(&local).norm() - 1.0).abs() < 1e-12);
        assert!((basis.transform_reverse_normalize(&ambient).norm() - 1.0).abs() < 1e-12);

        let identity = OrthonormalBasis::<f64>::default();
        assert_close(&identity.transform(&local), &local);
    }

    #[test]
    fn test_rotation_idempotence() {
        let basis = OrthonormalBasis::from_w_v(Vector3::new(0.3f64, -0.4, 0.8), Vector3::new(0.0, 0.0, 1.0));
        let rotations: [fn(Angle<f64>) -> Transform<f64>; 3] =
            [Transform::rotate_x, Transform::rotate_y, Transform::rotate_z];

        for rotate in rotations.iter() {
            for degrees in [90.0, 180.0].iter() {
                let angle = Angle::from_degrees(*degrees);
                let rotated = basis.transform_by(&rotate(angle));
                let restored = rotated.transform_by(&rotate(angle.negate()));
                assert_close(&restored.u(), &basis.u());
                assert_close(&restored.v(), &basis.v());
                assert_close(&restored.w(), &basis.w());
            }
        }
    }

    #[test]
    fn test_normal_matrix_matches_rotation() {
        let basis = OrthonormalBasis::from_w(Vector3::new(0.0f64, 1.0, 1.0));
        let rotation = Transform::rotate_y(Angle::from_degrees(30.0));
        let a = basis.transform_by(&rotation);
        let b = basis.transform_by_normal_matrix(&rotation);
        assert_close(&a.w(), &b.w());
        assert_close(&a.u(), &b.u());
    }

    #[test]
    fn test_flip() {
        let basis = OrthonormalBasis::<f64>::default().flip();
        assert_close(&basis.w(), &Vector3::new(0.0, 0.0, -1.0));
        assert!(basis.is_orthonormal(1e-9));
    }

    #[test]
    fn test_write_then_read() {
        let basis = OrthonormalBasis::from_w_v(Vector3::new(0.3f64, -0.4, 0.8), Vector3::new(1.0, 2.0, 0.0));
        let mut bytes = Vec::new();
        basis.write(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 9 * 8);
        // w leads the record.
        assert_eq!(&bytes[0..8], &basis.w().x.to_be_bytes());
        let read = OrthonormalBasis::<f64>::read(&mut std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(read, basis);

        let mut bytes = Vec::new();
        OrthonormalBasis::<f32>::default().flip().write(&mut bytes).unwrap();
        bytes.pop();
        assert!(OrthonormalBasis::<f32>::read(&mut std::io::Cursor::new(bytes)).is_err());
    }
}
