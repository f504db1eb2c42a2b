/* Copyright 2020 @Yuchen Wong */

use std::io::{self, Read, Write};

use nalgebra::RealField;

pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub type Vector2f = Vector2<f32>;
pub type Vector3f = Vector3<f32>;
pub type Point2f = Point2<f32>;
pub type Point3f = Point3<f32>;
pub type Matrix4f = Matrix4<f32>;

pub type Vector2d = Vector2<f64>;
pub type Vector3d = Vector3<f64>;
pub type Point2d = Point2<f64>;
pub type Point3d = Point3<f64>;
pub type Matrix4d = Matrix4<f64>;

pub const EPSILON: f64 = 1e-4;
pub const NORMALIZATION_THRESHOLD: f64 = 1e-5;
pub const DEFAULT_POWER_COSINE_EXPONENT: f64 = 20.0;

/// Scalar shared by the single and double precision families.
///
/// Everything nalgebra offers through `RealField` is used as is; this trait only
/// adds what the geometry code needs on top: literal conversion, the NaN and
/// maximum sentinels and big-endian framing.
pub trait Real: RealField + Copy {
    const NAN: Self;
    const MAX: Self;
    const INFINITY: Self;
    /// Width of the big-endian encoding in bytes.
    const BYTES: usize;

    fn cast(value: f64) -> Self;
    fn as_f64(self) -> f64;
    fn is_nan(self) -> bool;
    fn bit_pattern(self) -> u64;

    fn write_be<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()>;
    fn read_be<R: Read + ?Sized>(input: &mut R) -> io::Result<Self>;
}

impl Real for f32 {
    const NAN: Self = f32::NAN;
    const MAX: Self = f32::MAX;
    const INFINITY: Self = f32::INFINITY;
    const BYTES: usize = 4;

    fn cast(value: f64) -> Self {
        value as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn bit_pattern(self) -> u64 {
        self.to_bits() as u64
    }

    fn write_be<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_be_bytes())
    }

    fn read_be<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 4];
        input.read_exact(&mut buf)?;
        Ok(f32::from_be_bytes(buf))
    }
}

impl Real for f64 {
    const NAN: Self = f64::NAN;
    const MAX: Self = f64::MAX;
    const INFINITY: Self = f64::INFINITY;
    const BYTES: usize = 8;

    fn cast(value: f64) -> Self {
        value
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn bit_pattern(self) -> u64 {
        self.to_bits()
    }

    fn write_be<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_be_bytes())
    }

    fn read_be<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 8];
        input.read_exact(&mut buf)?;
        Ok(f64::from_be_bytes(buf))
    }
}

/// Cosine of the widest angle a point may deviate from a line segment and still
/// be considered on it.
pub fn line_containment_cos_threshold<T: Real>() -> T {
    (T::frac_pi_2() / T::cast(4096.0)).cos()
}
