//! Upstream REST client module

mod buda;
mod endpoint;

pub use buda::BudaClient;
pub use endpoint::Endpoint;
