//! Shared domain types and logic for Workshop OS
//!
//! This crate contains the pure parts of the system: the data model, the
//! product costing engine, the order workflow stage machine, the analytics
//! aggregator, and validation helpers. Everything here is free of I/O so the
//! backend services stay thin and the business rules stay unit-testable.

pub mod analytics;
pub mod costing;
pub mod models;
pub mod money;
pub mod validation;

pub use analytics::*;
pub use costing::*;
pub use models::*;
pub use money::*;
pub use validation::*;
