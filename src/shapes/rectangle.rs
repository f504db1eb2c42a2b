// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::shape::Shape2;
use crate::error::Result;
use crate::io::binary::{expect_id, read_point2, write_id, write_point2};
use crate::math::constants::{Point2, Real, Vector2};

pub const ID: i32 = 2;

/// An axis-aligned rectangle in the plane, closed on every side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle2<T: Real> {
    p_min: Point2<T>,
    p_max: Point2<T>,
}

impl<T: Real> Rectangle2<T> {
    pub fn new(a: Point2<T>, b: Point2<T>) -> Self {
        Self {
            p_min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            p_max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn minimum(&self) -> Point2<T> {
        self.p_min
    }

    pub fn maximum(&self) -> Point2<T> {
        self.p_max
    }

    pub fn diagonal(&self) -> Vector2<T> {
        self.p_max - self.p_min
    }

    pub fn center(&self) -> Point2<T> {
        self.p_min + self.diagonal() * T::cast(0.5)
    }

    pub fn area(&self) -> T {
        let d = self.diagonal();
        d.x * d.y
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: Point2::new(self.p_min.x.min(other.p_min.x), self.p_min.y.min(other.p_min.y)),
            p_max: Point2::new(self.p_max.x.max(other.p_max.x), self.p_max.y.max(other.p_max.y)),
        }
    }

    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        expect_id(input, ID)?;
        Self::read_fields(input)
    }

    pub(crate) fn read_fields<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let a = read_point2(input)?;
        let b = read_point2(input)?;
        Ok(Self::new(a, b))
    }
}

impl<T: Real> Shape2<T> for Rectangle2<T> {
    fn id(&self) -> i32 {
        ID
    }

    fn name(&self) -> &'static str {
        "Rectangle2"
    }

    fn bounds(&self) -> Rectangle2<T> {
        *self
    }

    fn contains(&self, p: &Point2<T>) -> bool {
        p.x >= self.p_min.x && p.x <= self.p_max.x && p.y >= self.p_min.y && p.y <= self.p_max.y
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        write_id(out, ID)?;
        write_point2(out, &self.p_min)?;
        write_point2(out, &self.p_max)?;
        Ok(())
    }
}
