//! Object arena and tree links: insert, link, unlink, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::handle::{Handle, Object};

/// Empty slice constant for returning when an object has no children.
const EMPTY_CHILDREN: &[Handle] = &[];

/// Every live object, plus the parent/child links between them.
///
/// Objects live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps and are only changed through [`link`](Self::link) and
/// [`unlink`](Self::unlink), which keep both directions consistent. The arena
/// enforces no policy: class rules and cycle checks belong to the caller.
#[derive(Debug)]
pub struct ObjectTree {
    objects: SlotMap<Handle, Object>,
    children: SecondaryMap<Handle, Vec<Handle>>,
    parent: SecondaryMap<Handle, Handle>,
}

impl ObjectTree {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Insert a detached object.
    pub fn insert(&mut self, object: Object) -> Handle {
        let id = self.objects.insert(object);
        self.children.insert(id, Vec::new());
        id
    }

    /// Link a detached `child` under `parent` at `pos` (clamped to the end).
    ///
    /// # Panics
    ///
    /// Panics (debug) if either object is missing or `child` already has a
    /// parent.
    pub fn link(&mut self, parent: Handle, child: Handle, pos: usize) {
        debug_assert!(self.objects.contains_key(parent), "parent object does not exist");
        debug_assert!(self.objects.contains_key(child), "child object does not exist");
        debug_assert!(!self.parent.contains_key(child), "child is already linked");

        let Some(siblings) = self.children.get_mut(parent) else {
            return;
        };
        let pos = pos.min(siblings.len());
        siblings.insert(pos, child);
        self.parent.insert(child, parent);
    }

    /// Detach `child` from its parent.
    ///
    /// Returns the former parent and the index the child occupied, or `None`
    /// if it had no parent.
    pub fn unlink(&mut self, child: Handle) -> Option<(Handle, usize)> {
        let parent = self.parent.remove(child)?;
        let siblings = self.children.get_mut(parent)?;
        let pos = siblings.iter().position(|&c| c == child)?;
        siblings.remove(pos);
        Some((parent, pos))
    }

    /// Remove a single detached, childless object and return its data.
    ///
    /// Children must be removed (or moved) first. Returns `None` if the object
    /// does not exist.
    pub fn remove(&mut self, id: Handle) -> Option<Object> {
        debug_assert!(self.children(id).is_empty(), "object still has children");
        self.unlink(id);
        self.children.remove(id);
        self.objects.remove(id)
    }

    pub fn parent(&self, id: Handle) -> Option<Handle> {
        self.parent.get(id).copied()
    }

    /// Children in order. Empty if the object has none or does not exist.
    pub fn children(&self, id: Handle) -> &[Handle] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the top, collecting ancestor handles.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the topmost ancestor.
    pub fn ancestors(&self, id: Handle) -> Vec<Handle> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_self_or_ancestor(&self, ancestor: Handle, id: Handle) -> bool {
        ancestor == id || self.ancestors(id).contains(&ancestor)
    }

    pub fn get(&self, id: Handle) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: Handle) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: Handle) -> bool {
        self.objects.contains_key(id)
    }

    /// Handles of objects with no parent, in arena order.
    pub fn roots(&self) -> Vec<Handle> {
        self.objects
            .keys()
            .filter(|&id| !self.parent.contains_key(id))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Object)> {
        self.objects.iter()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: Handle) -> Vec<Handle> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.objects.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for ObjectTree {
    fn default() -> Self {
        Self::new()
    }
}
