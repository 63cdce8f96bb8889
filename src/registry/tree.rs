use super::{CommandEntry, CommandPath, RegistryError};

/// One segment of the command tree.
///
/// A node without an entry is vacant: it only exists because registered
/// commands live beneath it.
#[derive(Debug, Default)]
struct Node {
    segment: String,
    entry: Option<CommandEntry>,
    children: Vec<Node>,
}

impl Node {
    fn vacant(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            entry: None,
            children: Vec::new(),
        }
    }

    fn child(&self, segment: &str) -> Option<&Node> {
        self.children.iter().find(|node| node.segment == segment)
    }

    fn child_index(&self, segment: &str) -> Option<usize> {
        self.children.iter().position(|node| node.segment == segment)
    }

    fn is_prunable(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }
}

/// Trie of commands keyed by path segment.
///
/// Sibling segments are unique, so a path can address at most one entry.
#[derive(Debug, Default)]
pub(super) struct CommandTree {
    root: Node,
}

impl CommandTree {
    pub(super) fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandEntry> {
        self.node(path)?.entry.as_ref()
    }

    /// Registered children of the command at `path`. Empty when `path` is
    /// not a registered command.
    pub(super) fn children<S: AsRef<str>>(&self, path: &[S]) -> Vec<&CommandEntry> {
        match self.node(path) {
            Some(node) if node.entry.is_some() => {
                node.children.iter().filter_map(|child| child.entry.as_ref()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub(super) fn roots(&self) -> Vec<&CommandEntry> {
        self.root
            .children
            .iter()
            .filter_map(|node| node.entry.as_ref())
            .collect()
    }

    /// Every entry, depth-first in registration order.
    pub(super) fn entries(&self) -> Vec<&CommandEntry> {
        let mut entries = Vec::new();
        let mut stack: Vec<&Node> = self.root.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(entry) = &node.entry {
                entries.push(entry);
            }
            stack.extend(node.children.iter().rev());
        }
        entries
    }

    /// Stores `entry` at its path, creating vacant intermediate nodes.
    pub(super) fn insert(&mut self, entry: CommandEntry) -> Result<(), RegistryError> {
        let mut node = &mut self.root;
        for segment in entry.path.iter() {
            let index = match node.child_index(segment) {
                Some(index) => index,
                None => {
                    node.children.push(Node::vacant(segment));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }

        if node.entry.is_some() {
            return Err(RegistryError::DuplicateCommand { path: entry.path });
        }
        node.entry = Some(entry);
        Ok(())
    }

    /// Clears the entry at `path` only. Registered descendants stay in
    /// place beneath a vacant node; nodes left empty are pruned.
    pub(super) fn remove_entry(&mut self, path: &CommandPath) {
        if !path.is_root() {
            Self::remove_from(&mut self.root, path);
        }
    }

    fn remove_from(parent: &mut Node, path: &[String]) {
        let Some((segment, rest)) = path.split_first() else {
            return;
        };
        let Some(index) = parent.child_index(segment) else {
            return;
        };

        let node = &mut parent.children[index];
        if rest.is_empty() {
            node.entry = None;
        } else {
            Self::remove_from(node, rest);
        }

        if node.is_prunable() {
            parent.children.remove(index);
        }
    }

    fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        if path.is_empty() {
            return None;
        }
        path.iter()
            .try_fold(&self.root, |node, segment| node.child(segment.as_ref()))
    }
}
