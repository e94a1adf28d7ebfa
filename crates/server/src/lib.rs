pub mod routes;
pub mod startup;
pub mod errors;
pub mod metrics;
pub mod openapi;

pub use routes::ServerState;
pub use startup::{run, run_with_config};
