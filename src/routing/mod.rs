//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, path, endpoint)
//!     → matcher.rs (normalize path, build matcher)
//!     → router.rs (reject duplicates)
//!     → Freeze as immutable Router behind Arc
//!
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate path)
//!     → Return: Endpoint, NotFound, or MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path (exact and prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use matcher::{ExactPath, PathMatcher, PathPrefix};
pub use router::{RouteError, Router};
