//! Customer-centric views over a flat list of transaction records:
//! aggregated transaction chains and a customer relationship graph.

pub mod chain;
pub mod config;
pub mod error;
pub mod index;
pub mod relationship;
pub mod service;
pub mod source;
pub mod transaction;
pub mod types;
pub mod validation;

pub use service::AggregationService;
