//! Customer resource: domain types, validation, storage and service.

pub mod domain;
pub mod validation;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CustomerService;
