//! Namespace trie holding every registered command.
//!
//! Nodes live in an arena and refer to each other by index. Children are
//! keyed by the lower-cased form of their segment, so lookups are
//! case-insensitive while the casing of the registration is kept for display.
//! Parent links are plain indices used only to rebuild dotted paths.
//!
//! ```text
//! root
//! ├── time
//! │   ├── scale      (leaf)
//! │   └── offset     (leaf)
//! └── print
//!     ├── intArg     (leaf)
//!     └── intFloat   (leaf)
//! ```

use std::{collections::HashMap, fmt};

use tracing::trace;

use super::{Command, parser::NODE_SEPARATOR};

/// A runnable command stored at a leaf of the tree.
pub struct CommandLeaf {
    local_name: String,
    help: String,
    command: Box<dyn Command>,
}

impl CommandLeaf {
    /// Creates a leaf from its last path segment, help text and callback.
    ///
    /// [`CommandTree::add`] renames the leaf after the last segment of the
    /// path it is added at.
    pub fn new(
        local_name: impl Into<String>,
        help: impl Into<String>,
        command: Box<dyn Command>,
    ) -> Self {
        Self {
            local_name: local_name.into(),
            help: help.into(),
            command,
        }
    }

    /// Last segment of the command path, casing as registered.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Help text supplied at registration. May be empty.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The callback run for this command.
    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }
}

impl fmt::Debug for CommandLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLeaf")
            .field("local_name", &self.local_name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Default)]
struct TreeNode {
    local_name: String,
    leaf: Option<CommandLeaf>,
    parent: Option<NodeId>,
    children: HashMap<String, NodeId>,
}

/// The command namespace tree.
///
/// The root has no name, no leaf and no parent. A node without a leaf is a
/// namespace; namespaces left empty after removals are tolerated and simply
/// contribute nothing to enumeration.
#[derive(Debug)]
pub struct CommandTree {
    nodes: Vec<TreeNode>,
    free: Vec<NodeId>,
}

/// Result of [`CommandTree::find_closest_match`].
#[derive(Debug, Clone, Copy)]
pub struct ClosestMatch<'a> {
    /// Whether every requested segment resolved.
    pub exact: bool,

    /// The deepest node reached. Never absent: at worst it is the root.
    pub node: NodeRef<'a>,
}

impl CommandTree {
    /// Creates a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::default()],
            free: Vec::new(),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeRef<'_> {
        self.node_ref(ROOT)
    }

    /// Walks or creates nodes along `segments` and sets `leaf` at the last one.
    ///
    /// Any leaf already at that path is replaced. The node and the leaf both
    /// take their name from the last segment, whatever name the leaf was
    /// built with. Returns `false` without touching the tree when `segments`
    /// is empty.
    pub fn add<S: AsRef<str>>(&mut self, segments: &[S], mut leaf: CommandLeaf) -> bool {
        let Some(last) = segments.last() else {
            return false;
        };
        leaf.local_name = last.as_ref().to_string();

        let mut current = ROOT;
        for segment in segments {
            current = self.child_or_insert(current, segment.as_ref());
        }

        let node = &mut self.nodes[current.0];
        node.local_name = leaf.local_name.clone();
        node.leaf = Some(leaf);

        true
    }

    /// Removes the node at `segments` together with its whole subtree.
    ///
    /// Works the same for leaves and namespaces. Returns whether anything was
    /// removed; a missing path is a silent no-op.
    pub fn remove<S: AsRef<str>>(&mut self, segments: &[S]) -> bool {
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut current = ROOT;
        for segment in parents {
            match self.child(current, segment.as_ref()) {
                Some(next) => current = next,
                None => return false,
            }
        }

        let key = last.as_ref().to_lowercase();
        match self.nodes[current.0].children.remove(&key) {
            Some(removed) => {
                self.release(removed);
                true
            }
            None => false,
        }
    }

    /// Follows `segments` as far as they resolve.
    ///
    /// Stops at the first segment with no matching child and returns the last
    /// node reached with `exact` unset. An empty slice matches the root.
    pub fn find_closest_match<S: AsRef<str>>(&self, segments: &[S]) -> ClosestMatch<'_> {
        let mut current = ROOT;

        for segment in segments {
            match self.child(current, segment.as_ref()) {
                Some(next) => current = next,
                None => {
                    trace!(segment = segment.as_ref(), "Closest match stopped");
                    return ClosestMatch {
                        exact: false,
                        node: self.node_ref(current),
                    };
                }
            }
        }

        ClosestMatch {
            exact: true,
            node: self.node_ref(current),
        }
    }

    /// Depth-first pre-order walk over the whole tree, starting at the root.
    ///
    /// See [`NodeRef::visit`].
    pub fn visit<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        self.root().visit(visitor);
    }

    /// Every runnable node, sorted by full path.
    pub fn runnable(&self) -> Vec<NodeRef<'_>> {
        let mut found = Vec::new();
        self.visit(|node| {
            if node.is_runnable() {
                found.push((node.full_path(), node));
            }
            true
        });

        found.sort_by(|a, b| a.0.cmp(&b.0));
        found.into_iter().map(|(_, node)| node).collect()
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .get(&segment.to_lowercase())
            .copied()
    }

    fn child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(existing) = self.child(parent, segment) {
            return existing;
        }

        let node = TreeNode {
            local_name: segment.to_string(),
            leaf: None,
            parent: Some(parent),
            children: HashMap::new(),
        };

        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };

        self.nodes[parent.0]
            .children
            .insert(segment.to_lowercase(), id);
        id
    }

    /// Clears a detached subtree and returns its slots to the free list.
    fn release(&mut self, top: NodeId) {
        let mut pending = vec![top];

        while let Some(id) = pending.pop() {
            let node = std::mem::take(&mut self.nodes[id.0]);
            pending.extend(node.children.into_values());
            self.free.push(id);
        }
    }
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to one node of a [`CommandTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a CommandTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a TreeNode {
        &self.tree.nodes[self.id.0]
    }

    /// Segment name as first registered. Empty for the root.
    pub fn local_name(&self) -> &'a str {
        &self.data().local_name
    }

    /// The command stored here, if this node is runnable.
    pub fn leaf(&self) -> Option<&'a CommandLeaf> {
        self.data().leaf.as_ref()
    }

    /// Whether a command is stored at this node.
    pub fn is_runnable(&self) -> bool {
        self.data().leaf.is_some()
    }

    /// Whether this is the tree's root.
    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// The parent node, absent for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node_ref(id))
    }

    /// Direct children, in no particular order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let tree = self.tree;
        self.data()
            .children
            .values()
            .map(move |&id| tree.node_ref(id))
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// Dotted path from the root to this node, root name omitted.
    pub fn full_path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(*self);

        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            names.push(node.local_name());
            current = node.parent();
        }

        names.reverse();
        names.join(&NODE_SEPARATOR.to_string())
    }

    /// Depth-first pre-order walk starting at this node.
    ///
    /// `visitor` sees each node and returns whether to descend into its
    /// children.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        let mut pending = vec![*self];

        while let Some(node) = pending.pop() {
            if visitor(node) {
                pending.extend(node.children());
            }
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("path", &self.full_path())
            .field("runnable", &self.is_runnable())
            .finish()
    }
}
