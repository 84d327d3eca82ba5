//! Domain layer - business logic and services

pub mod aggregation;
pub mod export;
pub mod repository;
pub mod service;
pub mod validation;

pub use aggregation::DailyTypeCount;
pub use repository::{CompanyRepository, OrderRepository, OrderTypeRepository};
pub use service::Service;
