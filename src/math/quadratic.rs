// Copyright @yucwang 2026

use super::constants::Real;

/// Real roots of `a t^2 + b t + c = 0` in ascending order.
///
/// Uses the form that avoids cancellation: the root of larger magnitude comes
/// from `q = -(b + sign(b) sqrt(d)) / 2` and the other from `c / q`. A zero
/// `a` degrades to the linear equation, reported as a double root.
pub fn solve_quadratic<T: Real>(a: T, b: T, c: T) -> Option<(T, T)> {
    if a == T::zero() {
        if b == T::zero() {
            return None;
        }
        let t = -c / b;
        return Some((t, t));
    }

    let discriminant = b * b - T::cast(4.0) * a * c;
    if discriminant < T::zero() {
        return None;
    }

    let root = discriminant.sqrt();
    let q = if b < T::zero() {
        T::cast(-0.5) * (b - root)
    } else {
        T::cast(-0.5) * (b + root)
    };
    if q == T::zero() {
        return Some((T::zero(), T::zero()));
    }

    let t0 = q / a;
    let t1 = c / q;
    if t0 > t1 {
        Some((t1, t0))
    } else {
        Some((t0, t1))
    }
}

/// The first of `roots` strictly inside `(t_min, t_max)` that `accept` also
/// agrees with.
pub fn first_valid<T, F>(roots: (T, T), t_min: T, t_max: T, mut accept: F) -> Option<T>
where
    T: Real,
    F: FnMut(T) -> bool,
{
    let (t0, t1) = roots;
    for &t in [t0, t1].iter() {
        if t > t_min && t < t_max && accept(t) {
            return Some(t);
        }
    }
    None
}
