//! Progress reporting while a tip is generated

pub mod reporter;
