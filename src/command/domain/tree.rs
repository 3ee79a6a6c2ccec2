//! Arena-backed command tree with case-insensitive lookup.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{CommandKind, CommandNode, CommandTreeError};

/// Handle to a node registered in a [`CommandTree`].
///
/// Handles stay valid for the lifetime of the tree; after removal they no
/// longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root container present in every tree.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of descending the tree along a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The node descent stopped at.
    pub node: NodeId,
    /// Segments matched on the way down.
    pub consumed: Vec<String>,
    /// Segments left over because descent reached a non-group node.
    pub unresolved: Vec<String>,
}

impl Resolution {
    /// Returns whether the path was longer than the branch it resolved to.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

#[derive(Debug, Clone)]
struct TreeEntry {
    node: CommandNode,
    parent: Option<NodeId>,
    children: BTreeMap<String, NodeId>,
}

/// The registered command hierarchy.
///
/// Each node exclusively owns its children, keyed by lower-cased name, and
/// records its parent for check inheritance and error propagation. The root
/// is a container that is never invoked.
#[derive(Debug, Clone)]
pub struct CommandTree {
    entries: Vec<Option<TreeEntry>>,
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTree {
    /// Creates a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Some(TreeEntry {
                node: CommandNode::root(),
                parent: None,
                children: BTreeMap::new(),
            })],
        }
    }

    /// Registers `node` and any declared subcommands under `parent`.
    ///
    /// The parent is promoted to a subcommand group unless it is the root;
    /// a subcommand grandparent is promoted likewise. The new node becomes a
    /// subcommand under a group and a command under the root. The tree is
    /// left unchanged when registration fails.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError::AlreadyRegistered`] when a sibling (or a
    /// sibling within the declared subcommands) shares the case-insensitive
    /// name, [`CommandTreeError::UnknownNode`] when `parent` does not exist,
    /// and [`CommandTreeError::InvalidName`] for empty or spaced names.
    pub fn add_command(
        &mut self,
        parent: NodeId,
        node: CommandNode,
    ) -> Result<NodeId, CommandTreeError> {
        let key = normalise(node.name())?;
        let parent_entry = self
            .entry(parent)
            .ok_or(CommandTreeError::UnknownNode(parent))?;
        if parent_entry.children.contains_key(&key) {
            return Err(CommandTreeError::AlreadyRegistered {
                name: node.name().to_owned(),
            });
        }
        validate_subcommands(&node)?;
        Ok(self.insert(parent, key, node))
    }

    /// Registers a node, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics when [`Self::add_command`] would return an error.
    pub fn must_add_command(&mut self, parent: NodeId, node: CommandNode) -> NodeId {
        match self.add_command(parent, node) {
            Ok(id) => id,
            Err(error) => panic!("failed to register command: {error}"),
        }
    }

    fn insert(&mut self, parent: NodeId, key: String, mut node: CommandNode) -> NodeId {
        self.promote(parent);
        let under_group = parent != NodeId::ROOT && self.is_group(parent);
        node.set_kind(if under_group {
            CommandKind::Subcommand
        } else {
            CommandKind::Command
        });

        let subcommands = node.take_subcommands();
        let id = NodeId(self.entries.len());
        self.entries.push(Some(TreeEntry {
            node,
            parent: Some(parent),
            children: BTreeMap::new(),
        }));
        if let Some(entry) = self.entry_mut(parent) {
            entry.children.insert(key, id);
        }

        for subcommand in subcommands {
            let subcommand_key = subcommand.name().to_lowercase();
            self.insert(id, subcommand_key, subcommand);
        }
        id
    }

    fn promote(&mut self, parent: NodeId) {
        if parent == NodeId::ROOT {
            return;
        }
        let grandparent = self.parent(parent);
        if let Some(entry) = self.entry_mut(parent) {
            entry.node.set_kind(CommandKind::SubcommandGroup);
        }
        if let Some(entry) = grandparent
            .filter(|id| *id != NodeId::ROOT)
            .and_then(|id| self.entry_mut(id))
            .filter(|entry| entry.node.kind() == CommandKind::Subcommand)
        {
            entry.node.set_kind(CommandKind::SubcommandGroup);
        }
    }

    /// Looks up a node by a whitespace-delimited path from the root.
    ///
    /// Segments left over after reaching a non-group node are ignored; use
    /// [`Self::resolve`] to observe them.
    #[must_use]
    pub fn get_command(&self, path: &str) -> Option<NodeId> {
        self.resolve(path.split_whitespace()).map(|resolution| resolution.node)
    }

    /// Descends from the root one segment at a time.
    ///
    /// Returns `None` when a segment names no child of a group, or when the
    /// path is empty.
    pub fn resolve<I, S>(&self, segments: I) -> Option<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = NodeId::ROOT;
        let mut consumed = Vec::new();
        let mut remaining = segments.into_iter();

        while self.is_group(current) {
            let Some(segment) = remaining.next() else {
                break;
            };
            current = self.child(current, segment.as_ref())?;
            consumed.push(segment.as_ref().to_owned());
        }

        if current == NodeId::ROOT {
            return None;
        }

        Some(Resolution {
            node: current,
            consumed,
            unresolved: remaining.map(|segment| segment.as_ref().to_owned()).collect(),
        })
    }

    /// Returns the child of `parent` with the case-insensitive `name`.
    #[must_use]
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.entry(parent)?
            .children
            .get(&name.to_lowercase())
            .copied()
    }

    /// Returns the children of `parent` in name order.
    #[must_use]
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.entry(parent)
            .map(|entry| entry.children.values().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the definitions of the children of `parent` in name order.
    #[must_use]
    pub fn all_commands(&self, parent: NodeId) -> Vec<&CommandNode> {
        self.children(parent)
            .into_iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    /// Returns the node definition.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&CommandNode> {
        self.entry(id).map(|entry| &entry.node)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut CommandNode> {
        self.entry_mut(id).map(|entry| &mut entry.node)
    }

    /// Returns the parent of a node; the root has none.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id)?.parent
    }

    /// Returns whether the node holds children rather than being invoked.
    #[must_use]
    pub fn is_group(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.node(id).is_some_and(|node| node.kind().is_group())
    }

    /// Returns the chain from the root down to and including `id`.
    #[must_use]
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.entry(id).map(|_| id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.parent(current);
        }
        chain.reverse();
        chain
    }

    /// Returns the space-separated path of names from the root to `id`.
    #[must_use]
    pub fn qualified_name(&self, id: NodeId) -> String {
        self.ancestry(id)
            .into_iter()
            .filter(|ancestor| *ancestor != NodeId::ROOT)
            .filter_map(|ancestor| self.node(ancestor).map(CommandNode::name))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Iterates over every registered node except the root.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &CommandNode)> {
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, entry)| entry.as_ref().map(|live| (NodeId(index), &live.node)))
    }

    /// Returns the number of registered nodes, excluding the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Returns whether only the root is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detaches the named child of `parent` together with its subtree.
    ///
    /// Returns the removed node's definition.
    pub fn remove_command(&mut self, parent: NodeId, name: &str) -> Option<CommandNode> {
        let removed = self
            .entry_mut(parent)?
            .children
            .remove(&name.to_lowercase())?;

        let mut pending = vec![removed];
        let mut detached = None;
        while let Some(id) = pending.pop() {
            let Some(entry) = self.entries.get_mut(id.0).and_then(Option::take) else {
                continue;
            };
            pending.extend(entry.children.values().copied());
            if id == removed {
                detached = Some(entry.node);
            }
        }
        detached
    }

    /// Removes every descendant of `parent`.
    pub fn remove_all_commands(&mut self, parent: NodeId) {
        let names: Vec<String> = self
            .entry(parent)
            .map(|entry| entry.children.keys().cloned().collect())
            .unwrap_or_default();
        for name in names {
            self.remove_command(parent, &name);
        }
    }

    fn entry(&self, id: NodeId) -> Option<&TreeEntry> {
        self.entries.get(id.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut TreeEntry> {
        self.entries.get_mut(id.0).and_then(Option::as_mut)
    }
}

fn normalise(name: &str) -> Result<String, CommandTreeError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(CommandTreeError::InvalidName(name.to_owned()));
    }
    Ok(name.to_lowercase())
}

fn validate_subcommands(node: &CommandNode) -> Result<(), CommandTreeError> {
    let mut seen = HashSet::new();
    for subcommand in node.subcommands() {
        if !seen.insert(normalise(subcommand.name())?) {
            return Err(CommandTreeError::AlreadyRegistered {
                name: subcommand.name().to_owned(),
            });
        }
        validate_subcommands(subcommand)?;
    }
    Ok(())
}
