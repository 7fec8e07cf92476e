//! Application assembly: route table and server construction.

use std::sync::Arc;

use crate::config::JourneysConfig;
use crate::endpoint;
use crate::http::HttpServer;
use crate::id::IdGenerator;
use crate::lifecycle::ShutdownSignal;
use crate::routing::{RouteError, Router};

/// Build the route table with every endpoint registered.
pub fn routes(shutdown: ShutdownSignal, ids: Arc<dyn IdGenerator>) -> Result<Router, RouteError> {
    let mut router = Router::new();
    endpoint::create_journey::register(&mut router, ids)?;
    endpoint::health::register(&mut router, shutdown)?;
    Ok(router)
}

/// Build the HTTP server for `config`.
pub fn init(
    config: &JourneysConfig,
    shutdown: ShutdownSignal,
    ids: Arc<dyn IdGenerator>,
) -> Result<HttpServer, RouteError> {
    let router = routes(shutdown.clone(), ids)?;
    tracing::info!(
        title = %config.openapi.title,
        version = %config.openapi.version,
        routes = router.len(),
        "Application initialized"
    );
    Ok(HttpServer::new(router, &config.http, shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UuidV4;
    use crate::lifecycle::Shutdown;
    use axum::http::Method;

    #[test]
    fn test_routes_registers_all_endpoints() {
        let shutdown = Shutdown::new();
        let router = routes(shutdown.subscribe(), Arc::new(UuidV4)).unwrap();

        assert_eq!(router.len(), 3);
        assert_eq!(
            router.dispatch(&Method::POST, "/v1/journey").unwrap().name(),
            "create_journey"
        );
        assert_eq!(
            router.dispatch(&Method::GET, "/health/liveness").unwrap().name(),
            "liveness"
        );
        assert_eq!(
            router.dispatch(&Method::GET, "/health/readiness").unwrap().name(),
            "readiness"
        );
    }
}
