//! Application Layer
//!
//! Use cases that orchestrate the domain:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//!
//! ## Use Cases
//!
//! - `ExploreSession` - Owns one exploration and dispatches clicks and hovers
//! - `CheckUseCase` - Validates a configuration before a session is started

pub mod check;
pub mod session;
pub mod snapshot;

pub use check::{CheckItem, CheckResult, CheckStatus, CheckUseCase};
pub use session::{ClickOutcome, ExploreSession, SessionError, SessionOptions};
pub use snapshot::{GraphSnapshot, OutlineEntry, SnapshotEdge, SnapshotNode};
