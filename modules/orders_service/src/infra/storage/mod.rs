//! Storage layer - database entities and repositories

pub mod entity;
pub mod mapper;
pub mod repositories;
pub mod schema;

pub use repositories::{SeaOrmCompanyRepository, SeaOrmOrderRepository, SeaOrmOrderTypeRepository};
pub use schema::ensure_schema;
