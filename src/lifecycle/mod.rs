//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Register routes → Bind
//!
//! Shutdown (shutdown.rs):
//!     Signal received → readiness flips to 503 → in-flight requests cancelled
//!     → stop accepting → drain connections (bounded by grace period) → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listener
//! - Route registration errors are fatal before any traffic is accepted
//! - Shutdown has a deadline: forced exit after the grace period

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
