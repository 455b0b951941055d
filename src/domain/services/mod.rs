//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod conflict;
mod partition;

pub use conflict::{classify, classify_failure, ConflictKind};
pub use partition::Partition;
