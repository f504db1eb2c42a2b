// Copyright @yucwang 2023

use super::constants::{Point2, Real, Vector3};

// Every sampler maps a point of [0, 1)^2 deterministically; the matching pdf
// is given per unit area or per unit solid angle of the target domain.

pub fn sample_disk_uniform<T: Real>(u: &Point2<T>) -> Point2<T> {
    let r = u.x.sqrt();
    let theta = T::two_pi() * u.y;
    let (sin_theta, cos_theta) = theta.sin_cos();

    Point2::new(r * cos_theta, r * sin_theta)
}

/// Shirley-Chiu concentric mapping onto the unit disk.
pub fn sample_disk_concentric<T: Real>(u: &Point2<T>) -> Point2<T> {
    let r1 = T::cast(2.0) * u.x - T::one();
    let r2 = T::cast(2.0) * u.y - T::one();

    if r1 == T::zero() && r2 == T::zero() {
        return Point2::origin();
    }

    let quarter_pi = T::frac_pi_4();
    let (r, phi) = if r1 * r1 > r2 * r2 {
        (r1, quarter_pi * (r2 / r1))
    } else {
        (r2, T::frac_pi_2() - quarter_pi * (r1 / r2))
    };

    let (sin_phi, cos_phi) = phi.sin_cos();

    Point2::new(r * cos_phi, r * sin_phi)
}

pub fn sample_disk_concentric_with_radius<T: Real>(u: &Point2<T>, radius: T) -> Point2<T> {
    let p = sample_disk_concentric(u);
    Point2::new(p.x * radius, p.y * radius)
}

pub fn pdf_disk_uniform<T: Real>(radius: T) -> T {
    T::one() / (T::pi() * radius * radius)
}

/// Malley's method: lift a concentric disk sample onto the hemisphere.
pub fn sample_hemisphere_cosine<T: Real>(u: &Point2<T>) -> Vector3<T> {
    let p = sample_disk_concentric(u);
    let z = (T::one() - p.x * p.x - p.y * p.y).max(T::zero()).sqrt();

    Vector3::new(p.x, p.y, z)
}

pub fn pdf_hemisphere_cosine<T: Real>(cos_theta: T) -> T {
    cos_theta * T::frac_1_pi()
}

/// Lobe around +z with density proportional to `cos^exponent`.
pub fn sample_hemisphere_power_cosine<T: Real>(u: &Point2<T>, exponent: T) -> Vector3<T> {
    let phi = T::two_pi() * u.x;
    let cos_theta = (T::one() - u.y).powf(T::one() / (exponent + T::one()));
    let sin_theta = (T::one() - cos_theta * cos_theta).max(T::zero()).sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta)
}

pub fn pdf_hemisphere_power_cosine<T: Real>(cos_theta: T, exponent: T) -> T {
    (exponent + T::one()) * cos_theta.powf(exponent) / T::two_pi()
}

pub fn sample_hemisphere_uniform<T: Real>(u: &Point2<T>) -> Vector3<T> {
    let z = u.x;
    let r = (T::one() - z * z).max(T::zero()).sqrt();
    let phi = T::two_pi() * u.y;

    Vector3::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn pdf_hemisphere_uniform<T: Real>() -> T {
    T::one() / T::two_pi()
}

/// Inverse of `sample_hemisphere_uniform`.
pub fn invert_hemisphere_uniform<T: Real>(v: &Vector3<T>) -> Point2<T> {
    let mut phi = v.y.atan2(v.x);
    if phi < T::zero() {
        phi += T::two_pi();
    }

    Point2::new(v.z, phi / T::two_pi())
}

pub fn sample_sphere_uniform<T: Real>(u: &Point2<T>) -> Vector3<T> {
    let z = T::one() - T::cast(2.0) * u.x;
    let r = (T::one() - z * z).max(T::zero()).sqrt();
    let phi = T::two_pi() * u.y;

    Vector3::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn pdf_sphere_uniform<T: Real>() -> T {
    T::one() / (T::cast(2.0) * T::two_pi())
}

/// Directions inside the cone of half-angle `acos(cos_theta_max)` around +z,
/// uniform in solid angle.
pub fn sample_cone_uniform<T: Real>(u: &Point2<T>, cos_theta_max: T) -> Vector3<T> {
    let cos_theta = (T::one() - u.x) + u.x * cos_theta_max;
    let sin_theta = (T::one() - cos_theta * cos_theta).max(T::zero()).sqrt();
    let phi = T::two_pi() * u.y;

    Vector3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

pub fn pdf_cone_uniform<T: Real>(cos_theta_max: T) -> T {
    T::one() / (T::two_pi() * (T::one() - cos_theta_max))
}

/// Uniform barycentric coordinates over a triangle.
pub fn sample_triangle_uniform<T: Real>(u: &Point2<T>) -> Vector3<T> {
    let a = u.x.sqrt();
    let x = T::one() - a;
    let y = u.y * a;

    Vector3::new(x, y, T::one() - x - y)
}
