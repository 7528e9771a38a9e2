pub mod executor;
pub mod petpooja_api_client;
pub mod processors;

pub use executor::ImportExecutor;
