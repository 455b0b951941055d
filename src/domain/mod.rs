//! Domain Layer
//!
//! The core of stackfleet - fleet and deployment concepts without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Deployment unit spec, credentials, operation results
//! - `value_objects/` - Immutable value types (AccountId, Region, TargetFleet, OperationStatus)
//! - `services/` - Pure domain services (conflict classification, fleet partitioning)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never shells out or touches the network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All remote calls go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
