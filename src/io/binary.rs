// Copyright @yucwang 2026

//! Big-endian framing shared by every serializable type: a 4-byte type ID
//! followed by the fields in declaration order.

use std::io::{self, Read, Write};

use crate::error::{GeometryError, Result};
use crate::math::constants::{Point2, Point3, Real, Vector3};

pub fn write_id<W: Write + ?Sized>(out: &mut W, id: i32) -> io::Result<()> {
    out.write_all(&id.to_be_bytes())
}

pub fn read_id<R: Read + ?Sized>(input: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Reads a leading ID and fails unless it is `expected`.
pub fn expect_id<R: Read + ?Sized>(input: &mut R, expected: i32) -> Result<()> {
    let id = read_id(input)?;
    if id == expected {
        Ok(())
    } else {
        log::warn!("expected type ID {}, found {}", expected, id);
        Err(GeometryError::UnsupportedId(id))
    }
}

pub fn write_point2<W: Write + ?Sized, T: Real>(out: &mut W, p: &Point2<T>) -> io::Result<()> {
    p.x.write_be(out)?;
    p.y.write_be(out)
}

pub fn read_point2<R: Read + ?Sized, T: Real>(input: &mut R) -> io::Result<Point2<T>> {
    let x = T::read_be(input)?;
    let y = T::read_be(input)?;
    Ok(Point2::new(x, y))
}

pub fn write_point3<W: Write + ?Sized, T: Real>(out: &mut W, p: &Point3<T>) -> io::Result<()> {
    p.x.write_be(out)?;
    p.y.write_be(out)?;
    p.z.write_be(out)
}

pub fn read_point3<R: Read + ?Sized, T: Real>(input: &mut R) -> io::Result<Point3<T>> {
    let x = T::read_be(input)?;
    let y = T::read_be(input)?;
    let z = T::read_be(input)?;
    Ok(Point3::new(x, y, z))
}

pub fn write_vector3<W: Write + ?Sized, T: Real>(out: &mut W, v: &Vector3<T>) -> io::Result<()> {
    v.x.write_be(out)?;
    v.y.write_be(out)?;
    v.z.write_be(out)
}

pub fn read_vector3<R: Read + ?Sized, T: Real>(input: &mut R) -> io::Result<Vector3<T>> {
    let x = T::read_be(input)?;
    let y = T::read_be(input)?;
    let z = T::read_be(input)?;
    Ok(Vector3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_id_is_big_endian() {
        let mut bytes = Vec::new();
        write_id(&mut bytes, 6).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 6]);

        let mut cursor = Cursor::new(bytes);
        assert!(matches!(expect_id(&mut Cursor::new(vec![0, 0, 0, 7]), 6),
                         Err(GeometryError::UnsupportedId(7))));
        assert!(expect_id(&mut cursor, 6).is_ok());
    }

    #[test]
    fn test_point_and_vector_framing() {
        let mut bytes = Vec::new();
        write_point3(&mut bytes, &Point3::new(1.0f32, -2.0, 3.5)).unwrap();
        write_vector3(&mut bytes, &Vector3::new(0.25f32, 0.0, -1.0)).unwrap();
        write_point2(&mut bytes, &Point2::new(9.0f32, 8.0)).unwrap();
        assert_eq!(bytes.len(), 8 * 4);
        assert_eq!(&bytes[0..4], &1.0f32.to_be_bytes());

        let mut cursor = Cursor::new(bytes);
        assert_eq!(read_point3::<_, f32>(&mut cursor).unwrap(), Point3::new(1.0, -2.0, 3.5));
        assert_eq!(read_vector3::<_, f32>(&mut cursor).unwrap(), Vector3::new(0.25, 0.0, -1.0));
        assert_eq!(read_point2::<_, f32>(&mut cursor).unwrap(), Point2::new(9.0, 8.0));
        assert!(read_point2::<_, f32>(&mut cursor).is_err());
    }
}
