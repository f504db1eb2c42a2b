// Copyright @yucwang 2026

//! Dispatch from a leading type ID to the matching reader.

use std::io::Read;

use log::{debug, warn};

use crate::core::shape::{Shape2, Shape3};
use crate::error::{GeometryError, Result};
use crate::io::binary::read_id;
use crate::math::aabb::{self, AxisAlignedBoundingBox3, BoundingSphere3, BoundingVolume3,
                        InfiniteBoundingVolume3};
use crate::math::constants::Real;
use crate::shapes::box3::{self, Box3};
use crate::shapes::cylinder::{self, Cylinder};
use crate::shapes::disk::{self, Disk};
use crate::shapes::line_segment::{LineSegment2, LineSegment3, LINE_SEGMENT2_ID, LINE_SEGMENT3_ID};
use crate::shapes::paraboloid::{self, Paraboloid};
use crate::shapes::rectangle::{self, Rectangle2};
use crate::shapes::sphere::{self, Sphere};

pub fn read_shape3<T: Real, R: Read + ?Sized>(input: &mut R) -> Result<Box<dyn Shape3<T>>> {
    let id = read_id(input)?;
    debug!("reading 3D shape with ID {}", id);
    let shape: Box<dyn Shape3<T>> = match id {
        box3::ID => Box::new(Box3::read_fields(input)?),
        cylinder::ID => Box::new(Cylinder::read_fields(input)?),
        disk::ID => Box::new(Disk::read_fields(input)?),
        LINE_SEGMENT3_ID => Box::new(LineSegment3::read_fields(input)?),
        paraboloid::ID => Box::new(Paraboloid::read_fields(input)?),
        sphere::ID => Box::new(Sphere::read_fields(input)?),
        _ => {
            warn!("no 3D shape is registered under ID {}", id);
            return Err(GeometryError::UnsupportedId(id));
        }
    };
    Ok(shape)
}

pub fn read_shape2<T: Real, R: Read + ?Sized>(input: &mut R) -> Result<Box<dyn Shape2<T>>> {
    let id = read_id(input)?;
    debug!("reading 2D shape with ID {}", id);
    let shape: Box<dyn Shape2<T>> = match id {
        LINE_SEGMENT2_ID => Box::new(LineSegment2::read_fields(input)?),
        rectangle::ID => Box::new(Rectangle2::read_fields(input)?),
        _ => {
            warn!("no 2D shape is registered under ID {}", id);
            return Err(GeometryError::UnsupportedId(id));
        }
    };
    Ok(shape)
}

pub fn read_bounding_volume3<T: Real, R: Read + ?Sized>(input: &mut R) -> Result<Box<dyn BoundingVolume3<T>>> {
    let id = read_id(input)?;
    debug!("reading bounding volume with ID {}", id);
    let volume: Box<dyn BoundingVolume3<T>> = match id {
        aabb::AXIS_ALIGNED_BOUNDING_BOX_ID => Box::new(AxisAlignedBoundingBox3::read_fields(input)?),
        aabb::BOUNDING_SPHERE_ID => Box::new(BoundingSphere3::read_fields(input)?),
        aabb::INFINITE_BOUNDING_VOLUME_ID => Box::new(InfiniteBoundingVolume3),
        _ => {
            warn!("no bounding volume is registered under ID {}", id);
            return Err(GeometryError::UnsupportedId(id));
        }
    };
    Ok(volume)
}
