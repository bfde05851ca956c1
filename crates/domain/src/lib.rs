//! tabtidy domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `keys`: URL to domain-key extraction
//! - `hash`: Deterministic palette index hashing
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `store`: Arrangement snapshot facade with fail-open semantics
//! - `usecases`: Sort and group passes and their orchestration

pub mod hash;
pub mod keys;
pub mod model;
pub mod ports;
pub mod store;
pub mod usecases;

pub use model::*;
pub use ports::*;
