//! Active tool selection.

use serde::{Deserialize, Serialize};

/// Which tool pointer input is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Select, drag, and resize existing content.
    #[default]
    Select,
    /// Place text items.
    Text,
    /// Place image items.
    Image,
    /// Draw connector arrows.
    Arrow,
}
