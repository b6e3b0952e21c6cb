//! Domain models for Workshop OS

pub mod material;
pub mod order;
pub mod product;
pub mod workshop;

pub use material::*;
pub use order::*;
pub use product::*;
pub use workshop::*;
