// Copyright @yucwang 2021

pub mod interaction;
pub mod intern;
pub mod rng;
pub mod shape;
