//! Journeys API library.

pub mod app;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod http;
pub mod id;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::JourneysConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
