//! # Limits Hex
//!
//! Application service layer for the transaction limits engine.
//!
//! ## Architecture
//!
//! - `resolver` - Picks the limit configuration governing a request
//! - `evaluator` - Pure allow/deny checks and the limits summary
//! - `service` - Orchestrates the ports around the two pure components
//!
//! The service is generic over the configuration, profile and usage
//! ports, allowing different adapter implementations to be injected.

pub mod evaluator;
pub mod resolver;
pub mod service;


pub use service::LimitsService;
