pub mod analytics;
pub mod config;
pub mod connectors;
pub mod constants;
pub mod extractors;
pub mod goals;
pub mod logging;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod sync;
pub mod workers;
