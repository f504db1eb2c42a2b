// Copyright @yucwang 2026

use std::io::{Read, Write};

use super::constants::{Real, EPSILON};

/// An angle, stored in degrees, the unit of its binary form.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Angle<T: Real> {
    degrees: T,
}

impl<T: Real> Angle<T> {
    pub fn from_radians(radians: T) -> Self {
        Self { degrees: radians * T::cast(180.0) / T::pi() }
    }

    pub fn from_degrees(degrees: T) -> Self {
        Self { degrees }
    }

    pub fn zero() -> Self {
        Self::from_degrees(T::zero())
    }

    pub fn full() -> Self {
        Self::from_degrees(T::cast(360.0))
    }

    pub fn radians(&self) -> T {
        self.degrees * T::pi() / T::cast(180.0)
    }

    pub fn degrees(&self) -> T {
        self.degrees
    }

    pub fn negate(&self) -> Self {
        Self::from_degrees(-self.degrees)
    }

    /// True for angles in [0, 360] degrees, the range a phi-max may take.
    /// The upper bound tolerates the rounding of radian conversions.
    pub fn is_within_full_turn(&self) -> bool {
        self.degrees >= T::zero() && self.degrees <= T::cast(360.0 + EPSILON)
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        self.degrees.write_be(out)
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> std::io::Result<Self> {
        Ok(Self::from_degrees(T::read_be(input)?))
    }
}
