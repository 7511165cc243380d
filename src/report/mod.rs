//! Report and table rendering.

pub mod generator;

pub use generator::*;
