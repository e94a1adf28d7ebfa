//! Service layer for the customer resource.
//! - Validation runs here, before any store mutation.
//! - Persistence sits behind the `CustomerRepository` trait (SeaORM or in-memory).

pub mod errors;
pub mod customer;
