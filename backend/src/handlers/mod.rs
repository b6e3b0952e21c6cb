//! HTTP handlers for Workshop OS
//!
//! Handlers stay thin: deserialize input, construct the service, return JSON.
//! Everything interesting happens in the services and the shared crate.

pub mod analytics;
pub mod customer;
pub mod health;
pub mod material;
pub mod operation;
pub mod order;
pub mod product;
pub mod settings;
pub mod workshop;
