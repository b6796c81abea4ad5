//! Domain Value Objects
//!
//! Immutable value types shared by the tree, the loaders and the display graph.

mod config_warning;
mod datasource_type;
mod ids;
mod loader_spec;
mod node_role;

pub use config_warning::ConfigWarning;
pub use datasource_type::DataSourceType;
pub use ids::{DisplayNodeId, TreeNodeId};
pub use loader_spec::{ColumnRef, LoaderSpec};
pub use node_role::NodeRole;
