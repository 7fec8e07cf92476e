//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, fallback dispatch)
//!     → request.rs (assign / propagate request ID)
//!     → [routing layer picks the endpoint]
//!     → operation.rs (content type → body → decode → handler → encode)
//!     → error.rs (failures → status + JSON error body)
//!     → Send to client
//! ```

pub mod context;
pub mod error;
pub mod handler;
pub mod operation;
pub mod request;
pub mod server;

pub use context::{Cancelled, Context};
pub use error::{ApiError, ErrorBody};
pub use handler::{Handler, HandlerError};
pub use operation::{Endpoint, Operation};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
