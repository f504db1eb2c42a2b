// Copyright @yucwang 2021

//! Geometry primitives for ray tracing: rays, frames, transforms, analytic
//! shapes with intersection and area sampling, sampling warps, bounding
//! volumes and their big-endian binary form. Every type is generic over the
//! scalar, `f32` or `f64`.

pub extern crate nalgebra as na;

pub mod core;
pub mod error;
pub mod io;
pub mod math;
pub mod shapes;

pub use crate::core::interaction::{SurfaceIntersection, SurfaceSample};
pub use crate::core::shape::{Shape2, Shape3};
pub use crate::error::{GeometryError, Result};
pub use crate::math::constants::Real;
