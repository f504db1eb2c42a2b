// Copyright 2020 @TwoCookingMice

pub mod aabb;
pub mod angle;
pub mod constants;
pub mod frame;
pub mod quadratic;
pub mod ray;
pub mod transform;
pub mod vector;
pub mod warp;
