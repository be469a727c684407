//! Reference recovery
//!
//! Makes a module reflection self-contained: every reflection its declarations
//! reference from elsewhere in the document is pulled in, along with whatever
//! those reflections reference in turn, until no unknown id is left.

use crate::index::{build_index, ReflectionIndex};
use crate::walker::{walk_signatures, walk_type, walk_type_parameters};
use docsync_core::error::Result;
use docsync_core::reflection::{Reflection, ReflectionId};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Reflections recovered for one root
#[derive(Debug, Default, Clone)]
pub struct RecoveredSet<'a> {
    nodes: Vec<&'a Reflection>,
    dangling: Vec<ReflectionId>,
}

impl<'a> RecoveredSet<'a> {
    /// Recovered nodes in discovery order
    pub fn nodes(&self) -> &[&'a Reflection] {
        &self.nodes
    }

    pub fn ids(&self) -> Vec<ReflectionId> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    /// Referenced ids absent from the global index, sorted
    pub fn dangling(&self) -> &[ReflectionId] {
        &self.dangling
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Ids referenced anywhere in `node`'s subtree, in first-seen order without duplicates
pub fn collect_references(node: &Reflection) -> Result<Vec<ReflectionId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut on_reference = |id: ReflectionId| {
        if seen.insert(id) {
            ids.push(id);
        }
    };
    collect_into(node, &mut on_reference)?;
    Ok(ids)
}

fn collect_into<F>(node: &Reflection, on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    walk_signatures(&node.signatures, on_reference)?;
    if let Some(ty) = &node.type_ {
        walk_type(ty, on_reference)?;
    }
    walk_type_parameters(&node.type_parameters, on_reference)?;

    // Heritage edges count only when they point straight at a reflection
    let heritage = node.inherited_from.iter().chain(&node.extended_types);
    for ty in heritage {
        if let Some(id) = ty.reference_target() {
            on_reference(id);
        }
    }

    for child in &node.children {
        collect_into(child, on_reference)?;
    }
    Ok(())
}

/// Recover the reflections `root` depends on
///
/// `local` must index `root`'s own subtree; it grows with every recovered node
/// and its descendants. `global` indexes the whole document and is only read.
pub fn recover<'a>(
    root: &'a Reflection,
    local: &mut ReflectionIndex<'a>,
    global: &ReflectionIndex<'a>,
) -> Result<RecoveredSet<'a>> {
    local.insert(root);

    let mut recovery = ReferenceRecovery {
        local,
        global,
        recovered: Vec::new(),
        dangling: BTreeSet::new(),
    };
    recovery.visit(root)?;

    Ok(RecoveredSet {
        nodes: recovery.recovered,
        dangling: recovery.dangling.into_iter().collect(),
    })
}

struct ReferenceRecovery<'i, 'a> {
    local: &'i mut ReflectionIndex<'a>,
    global: &'i ReflectionIndex<'a>,
    recovered: Vec<&'a Reflection>,
    dangling: BTreeSet<ReflectionId>,
}

impl<'a> ReferenceRecovery<'_, 'a> {
    fn visit(&mut self, node: &Reflection) -> Result<()> {
        for id in collect_references(node)? {
            // An earlier sibling's recursion may have pulled this id in already
            if self.local.contains(id) {
                continue;
            }

            let Some(found) = self.global.get(id) else {
                if self.dangling.insert(id) {
                    debug!(
                        reference = %id,
                        from = %node.name,
                        "Reference target not found in document"
                    );
                }
                continue;
            };

            // Nodes recovered earlier on their own now come along inside `found`
            let nested = build_index(found);
            self.recovered.retain(|node| !nested.contains(node.id));

            self.recovered.push(found);
            self.local.insert(found);
            self.local.extend_from(found);
            self.visit(found)?;
        }
        Ok(())
    }
}

/// A root reflection made self-contained
#[derive(Debug, Clone)]
pub struct CompletedReflection {
    /// Copy of the root whose children are followed by the recovered reflections
    pub reflection: Reflection,
    pub recovered: Vec<ReflectionId>,
    pub dangling: Vec<ReflectionId>,
}

/// Recover `root`'s dependencies and merge them into a copy of `root`
pub fn complete_reflection<'a>(
    root: &'a Reflection,
    global: &ReflectionIndex<'a>,
) -> Result<CompletedReflection> {
    let mut local = build_index(root);
    let recovered = recover(root, &mut local, global)?;

    let mut reflection = root.clone();
    reflection
        .children
        .extend(recovered.nodes().iter().map(|node| (*node).clone()));

    Ok(CompletedReflection {
        reflection,
        recovered: recovered.ids(),
        dangling: recovered.dangling().to_vec(),
    })
}
