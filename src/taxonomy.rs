use std::collections::HashMap;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::instrument;

use crate::errors::{TaxonomyError, TaxonomyResult};

/// A node in the category forest.
///
/// `parent` and `children` hold arena indices, never owned nodes: the
/// [`Taxonomy`] arena is the sole owner of node lifetime, back-references
/// are lookups only.
#[derive(Debug, Clone)]
pub struct Category {
    /// Unique external handle, immutable once created
    pub id: String,
    /// Display name, mutable, not required to be unique
    pub label: String,
    /// Longest downward path to a leaf, counting this node; leaves are 1
    pub height: usize,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, insertion order preserved
    pub children: Vec<Index>,
}

/// Arena-based category forest with id-keyed registry.
///
/// Multiple roots are permitted; each tree keeps a derived height metric
/// that is refreshed after every structural edit.
#[derive(Debug)]
pub struct Taxonomy {
    /// Arena storage for all category nodes
    arena: Arena<Category>,
    /// Registry: id -> arena slot
    ids: HashMap<String, Index>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl Taxonomy {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            ids: HashMap::new(),
        }
    }

    /// Registers a new root category with height 1 and no children.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&mut self, id: &str, label: &str) -> TaxonomyResult<Index> {
        if self.ids.contains_key(id) {
            return Err(TaxonomyError::DuplicateId(id.to_string()));
        }
        let idx = self.arena.insert(Category {
            id: id.to_string(),
            label: label.to_string(),
            height: 1,
            parent: None,
            children: Vec::new(),
        });
        self.ids.insert(id.to_string(), idx);
        Ok(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of registered categories across all trees.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: &str) -> TaxonomyResult<&Category> {
        let idx = self.index_of(id)?;
        Ok(&self.arena[idx])
    }

    pub fn node(&self, idx: Index) -> Option<&Category> {
        self.arena.get(idx)
    }

    /// Replaces the display label of an existing category.
    #[instrument(level = "debug", skip(self))]
    pub fn set_label(&mut self, id: &str, label: &str) -> TaxonomyResult<()> {
        let idx = self.index_of(id)?;
        self.arena[idx].label = label.to_string();
        Ok(())
    }

    pub(crate) fn index_of(&self, id: &str) -> TaxonomyResult<Index> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| TaxonomyError::NotFound(id.to_string()))
    }

    /// Links `child_id` under `parent_id` and refreshes heights for the
    /// whole affected tree.
    ///
    /// Re-assigning an existing edge is rejected with `DuplicateEdge`, and
    /// linking a node under its own descendant (or itself) is rejected with
    /// `CycleDetected`. A failed call leaves both nodes untouched.
    ///
    /// A child that already has a different parent is detached from it
    /// first, so `parent`/`children` stay mutually consistent.
    #[instrument(level = "debug", skip(self))]
    pub fn assign_parent(&mut self, child_id: &str, parent_id: &str) -> TaxonomyResult<()> {
        let child_idx = self.index_of(child_id)?;
        let parent_idx = self.index_of(parent_id)?;

        if self.arena[parent_idx].children.contains(&child_idx) {
            return Err(TaxonomyError::DuplicateEdge {
                child: child_id.to_string(),
                parent: parent_id.to_string(),
            });
        }

        // Walk up from the proposed parent; hitting the child means the
        // link would close a cycle. Also rejects self-links.
        let mut cursor = Some(parent_idx);
        while let Some(idx) = cursor {
            if idx == child_idx {
                return Err(TaxonomyError::CycleDetected {
                    child: child_id.to_string(),
                    parent: parent_id.to_string(),
                });
            }
            cursor = self.arena[idx].parent;
        }

        // Re-parenting: detach from the previous parent before linking.
        let old_parent = self.arena[child_idx].parent;
        if let Some(old_idx) = old_parent {
            self.arena[old_idx].children.retain(|&c| c != child_idx);
        }

        self.arena[child_idx].parent = Some(parent_idx);
        self.arena[parent_idx].children.push(child_idx);

        let root = self.root_of(parent_idx);
        self.refresh_heights(root);

        // The old tree shrank; refresh it too unless the child moved
        // within the same tree.
        if let Some(old_idx) = old_parent {
            let old_root = self.root_of(old_idx);
            if old_root != root {
                self.refresh_heights(old_root);
            }
        }

        Ok(())
    }

    fn root_of(&self, mut idx: Index) -> Index {
        while let Some(parent) = self.arena[idx].parent {
            idx = parent;
        }
        idx
    }

    /// Recomputes `height` for every node of the tree rooted at `root`.
    ///
    /// Iterative post-order walk with an explicit stack, so adversarially
    /// deep trees cannot exhaust the call stack. Children are finished
    /// before their parent, which reads their already-refreshed heights.
    #[instrument(level = "trace", skip(self))]
    fn refresh_heights(&mut self, root: Index) {
        let mut stack = vec![(root, false)];
        while let Some((idx, visited)) = stack.pop() {
            if visited {
                let max_child = self.arena[idx]
                    .children
                    .iter()
                    .map(|&c| self.arena[c].height)
                    .max()
                    .unwrap_or(0);
                self.arena[idx].height = max_child + 1;
            } else {
                stack.push((idx, true));
                for &child in &self.arena[idx].children {
                    stack.push((child, false));
                }
            }
        }
    }

    /// Every category transitively reachable via child links, excluding
    /// the starting node. Set semantics: a forest guarantees no duplicates,
    /// and callers must not rely on the order.
    #[instrument(level = "debug", skip(self))]
    pub fn descendants(&self, id: &str) -> TaxonomyResult<Vec<&Category>> {
        let start = self.index_of(id)?;
        let mut out = Vec::new();
        let mut stack: Vec<Index> = self.arena[start].children.to_vec();
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx];
            stack.extend(node.children.iter().copied());
            out.push(node);
        }
        Ok(out)
    }

    /// Root-first path from the tree root down to `id`, inclusive of both
    /// endpoints. A root node yields a chain of length 1.
    #[instrument(level = "debug", skip(self))]
    pub fn ancestor_chain(&self, id: &str) -> TaxonomyResult<Vec<&Category>> {
        let mut cursor = Some(self.index_of(id)?);
        let mut chain = Vec::new();
        while let Some(idx) = cursor {
            let node = &self.arena[idx];
            chain.push(node);
            cursor = node.parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Up to `n` categories, height descending, ties broken by label
    /// ascending. The sort is stable.
    #[instrument(level = "debug", skip(self))]
    pub fn top_by_height_then_label(&self, n: usize) -> Vec<&Category> {
        self.arena
            .iter()
            .map(|(_, node)| node)
            .sorted_by(|a, b| b.height.cmp(&a.height).then_with(|| a.label.cmp(&b.label)))
            .take(n)
            .collect()
    }

    /// Deregisters `id` together with its entire descendant subtree and
    /// detaches it from its parent.
    ///
    /// Heights on the remaining tree are refreshed afterwards, so ancestors
    /// of the removal point never carry stale metrics.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &str) -> TaxonomyResult<()> {
        let idx = self.index_of(id)?;
        let parent = self.arena[idx].parent;

        // Collect the whole subtree before touching the arena.
        let mut doomed = Vec::new();
        let mut stack = vec![idx];
        while let Some(cur) = stack.pop() {
            stack.extend(self.arena[cur].children.iter().copied());
            doomed.push(cur);
        }
        for d in doomed {
            if let Some(node) = self.arena.remove(d) {
                self.ids.remove(&node.id);
            }
        }

        if let Some(parent_idx) = parent {
            self.arena[parent_idx].children.retain(|&c| c != idx);
            let root = self.root_of(parent_idx);
            self.refresh_heights(root);
        }
        Ok(())
    }

    /// Direct children of `id`, insertion order.
    pub fn children(&self, id: &str) -> TaxonomyResult<Vec<&Category>> {
        let idx = self.index_of(id)?;
        Ok(self.arena[idx]
            .children
            .iter()
            .map(|&c| &self.arena[c])
            .collect())
    }

    /// Parent of `id`, or None for a root.
    pub fn parent(&self, id: &str) -> TaxonomyResult<Option<&Category>> {
        let idx = self.index_of(id)?;
        Ok(self.arena[idx].parent.map(|p| &self.arena[p]))
    }

    /// Indices of all root nodes, sorted by id for deterministic output.
    #[instrument(level = "trace", skip(self))]
    pub fn roots(&self) -> Vec<Index> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .sorted_by(|(_, a), (_, b)| a.id.cmp(&b.id))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Iterates over all registered categories in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.arena.iter().map(|(_, node)| node)
    }
}
