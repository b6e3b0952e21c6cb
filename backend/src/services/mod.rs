//! Business logic services for Workshop OS
//!
//! Services load workshop-scoped rows and delegate the actual business rules
//! (costing, workflow, analytics) to the shared crate.

pub mod analytics;
pub mod customer;
pub mod material;
pub mod operation;
pub mod order;
pub mod product;
pub mod settings;
pub mod workshop;

pub use analytics::AnalyticsService;
pub use customer::CustomerService;
pub use material::MaterialService;
pub use operation::OperationService;
pub use order::OrderService;
pub use product::ProductService;
pub use settings::SettingsService;
pub use workshop::WorkshopService;
