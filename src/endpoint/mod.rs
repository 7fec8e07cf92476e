//! Application endpoints.
//!
//! Each submodule defines one handler, its request/response types, and a
//! `register` function that binds it to a route with its codecs.

pub mod create_journey;
pub mod health;

pub use create_journey::{CreateJourneyHandler, CreateJourneyRequest, CreateJourneyResponse};
pub use health::{HealthStatus, LivenessHandler, ReadinessHandler};
