pub mod config;
pub mod games;
pub mod identifiers;
pub mod logger;
pub mod name_generator;

pub use identifiers::*;
