//! Domain model for the command tree.

mod error;
mod kind;
mod node;
mod parameter;
mod path;
mod tree;

pub use error::CommandTreeError;
pub use kind::CommandKind;
pub use node::CommandNode;
pub use parameter::{ArgumentParameter, ParameterBound, ParameterConstraints};
pub use path::{RawOptions, build_path_from_options, command_path, flatten_options};
pub use tree::{CommandTree, NodeId, Resolution};
