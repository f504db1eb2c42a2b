// Copyright @yucwang 2021

pub mod binary;
pub mod reader;
