//! Domain Layer
//!
//! The exploration engine without any I/O.
//!
//! ## Structure
//!
//! - `entities/` - The entity tree (discovered facts)
//! - `value_objects/` - Roles, node handles, loader configuration
//! - `ports/` - Row source and loader contracts implemented by infrastructure
//! - `services/` - Display graph synchronization and visibility
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Backing stores are only reached through `ports`
//! 2. **Atomic expansion** - A failed load never leaves a half-built subtree
//! 3. **Ports & Adapters** - Loaders are swappable per data source type

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
