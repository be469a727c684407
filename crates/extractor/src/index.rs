//! Reflection lookup by id
//!
//! An index borrows its nodes from the loaded document. The global index over
//! the whole document is built once and only read afterwards; each page build
//! grows its own local index as references are recovered.

use docsync_core::reflection::{Reflection, ReflectionId};
use std::collections::HashMap;

/// Mapping from reflection id to the node carrying it
#[derive(Debug, Default, Clone)]
pub struct ReflectionIndex<'a> {
    nodes: HashMap<ReflectionId, &'a Reflection>,
}

/// Index every descendant of `root`, excluding `root` itself
pub fn build_index(root: &Reflection) -> ReflectionIndex<'_> {
    let mut index = ReflectionIndex::default();
    index.extend_from(root);
    index
}

impl<'a> ReflectionIndex<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ReflectionId) -> Option<&'a Reflection> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: ReflectionId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Insert a node under its own id. The first node seen for an id wins;
    /// returns whether the node was inserted.
    pub fn insert(&mut self, node: &'a Reflection) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id, node);
        true
    }

    /// Merge every descendant of `node` (not `node` itself)
    pub fn extend_from(&mut self, node: &'a Reflection) {
        let mut stack: Vec<&'a Reflection> = node.children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            self.insert(child);
            stack.extend(child.children.iter().rev());
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ReflectionId> + '_ {
        self.nodes.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::reflection::ReflectionKind;
    use pretty_assertions::assert_eq;

    fn node(id: u64, name: &str, children: Vec<Reflection>) -> Reflection {
        let mut reflection = Reflection::new(id, name, ReflectionKind::Interface);
        reflection.children = children;
        reflection
    }

    #[test]
    fn test_indexes_descendants_but_not_root() {
        let root = node(
            0,
            "root",
            vec![
                node(1, "a", vec![node(2, "a.x", vec![]), node(3, "a.y", vec![])]),
                node(4, "b", vec![node(5, "b.z", vec![node(6, "b.z.w", vec![])])]),
            ],
        );

        let index = build_index(&root);
        let mut ids: Vec<u64> = index.ids().map(|id| id.0).collect();
        ids.sort();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(!index.contains(ReflectionId(0)));
        assert_eq!(index.get(ReflectionId(5)).map(|r| r.name.as_str()), Some("b.z"));
    }

    #[test]
    fn test_first_seen_id_wins() {
        let root = node(
            0,
            "root",
            vec![
                node(1, "first", vec![node(7, "nested-first", vec![])]),
                node(1, "duplicate", vec![node(8, "under-duplicate", vec![])]),
                node(7, "later", vec![]),
            ],
        );

        let index = build_index(&root);
        assert_eq!(index.len(), 3);
        assert!(index.contains(ReflectionId(8)));
        assert_eq!(index.get(ReflectionId(1)).map(|r| r.name.as_str()), Some("first"));
        assert_eq!(
            index.get(ReflectionId(7)).map(|r| r.name.as_str()),
            Some("nested-first")
        );
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let original = node(3, "original", vec![]);
        let other = node(3, "other", vec![]);

        let mut index = ReflectionIndex::new();
        assert!(index.is_empty());
        assert!(index.insert(&original));
        assert!(!index.insert(&other));
        assert_eq!(index.get(ReflectionId(3)).map(|r| r.name.as_str()), Some("original"));
    }

    #[test]
    fn test_extend_from_merges_subtree() {
        let local = node(0, "local", vec![node(1, "a", vec![])]);
        let recovered = node(10, "Options", vec![node(11, "locale", vec![])]);

        let mut index = build_index(&local);
        index.insert(&recovered);
        index.extend_from(&recovered);

        assert_eq!(index.len(), 3);
        assert!(index.contains(ReflectionId(10)));
        assert!(index.contains(ReflectionId(11)));
    }

    #[test]
    fn test_leaf_root_gives_empty_index() {
        let leaf = node(9, "leaf", vec![]);
        assert!(build_index(&leaf).is_empty());
    }
}
