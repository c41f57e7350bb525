//! Tree operations with class policy: append, insert, detach, reparent and
//! navigation.

use tracing::debug;

use super::Toolkit;
use crate::class::{ChildPolicy, NativeCategory};
use crate::error::{Error, Result};
use crate::object::Handle;

impl Toolkit {
    /// Check that `child` may be placed under `parent`, ignoring the child's
    /// current parent.
    fn check_link(&self, parent: Handle, child: Handle) -> Result<()> {
        let parent_obj = self.objects.get(parent).ok_or(Error::InvalidHandle)?;
        let child_obj = self.objects.get(child).ok_or(Error::InvalidHandle)?;

        let child_class = self
            .classes
            .get(&child_obj.class)
            .ok_or_else(|| Error::ClassNotFound(child_obj.class.clone()))?;
        if child_class.category() == NativeCategory::Dialog {
            return Err(Error::DialogAsChild);
        }
        if self.objects.is_self_or_ancestor(child, parent) {
            return Err(Error::WouldCycle);
        }

        let parent_class = self
            .classes
            .get(&parent_obj.class)
            .ok_or_else(|| Error::ClassNotFound(parent_obj.class.clone()))?;
        let count = self
            .objects
            .children(parent)
            .iter()
            .filter(|&&c| c != child)
            .count();
        match parent_class.child_policy() {
            ChildPolicy::None => Err(Error::ChildPolicy {
                class: parent_obj.class.clone(),
                reason: "children",
            }),
            ChildPolicy::One if count >= 1 => Err(Error::ChildPolicy {
                class: parent_obj.class.clone(),
                reason: "more than one child",
            }),
            _ => Ok(()),
        }
    }

    fn link_checked(&mut self, parent: Handle, child: Handle, pos: usize) -> Result<()> {
        if self.objects.parent(child).is_some() {
            return Err(Error::AlreadyHasParent);
        }
        self.check_link(parent, child)?;
        // A mapped object needs a mapped parent.
        if self.is_mapped(child) && !self.is_mapped(parent) {
            self.unmap(child);
        }
        self.objects.link(parent, child, pos);
        debug!(?parent, ?child, pos, "Linked child");
        if let Some(methods) = self.class_name(parent).and_then(|c| self.classes.find_methods(c)) {
            methods.child_added(self, parent, child);
        }
        Ok(())
    }

    /// Add `child` as the last child of `parent`.
    ///
    /// The child must be detached. Neither object is mapped by this call;
    /// a mapped child placed under an unmapped parent is unmapped.
    pub fn append(&mut self, parent: Handle, child: Handle) -> Result<()> {
        self.link_checked(parent, child, usize::MAX)
    }

    /// Add `child` before `ref_child`, or first when `ref_child` is `None`.
    pub fn insert(&mut self, parent: Handle, ref_child: Option<Handle>, child: Handle) -> Result<()> {
        let pos = self.position_before(parent, ref_child)?;
        self.link_checked(parent, child, pos)
    }

    fn position_before(&self, parent: Handle, ref_child: Option<Handle>) -> Result<usize> {
        match ref_child {
            None => Ok(0),
            Some(r) => self
                .objects
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .ok_or(Error::NotAChild),
        }
    }

    /// Remove `ih` from its parent, unmapping it first. A root is left
    /// alone.
    pub fn detach(&mut self, ih: Handle) -> Result<()> {
        if !self.objects.contains(ih) {
            return Err(Error::InvalidHandle);
        }
        if self.objects.parent(ih).is_none() {
            return Ok(());
        }
        self.unmap(ih);
        if let Some((parent, pos)) = self.objects.unlink(ih) {
            debug!(?parent, child = ?ih, pos, "Detached child");
            if let Some(methods) = self.class_name(parent).and_then(|c| self.classes.find_methods(c)) {
                methods.child_removed(self, parent, ih, pos);
            }
        }
        Ok(())
    }

    /// Move `child` under `new_parent`, before `ref_child` (or first).
    ///
    /// A mapped child has its class attributes saved before it is unmapped,
    /// and is mapped again when the new parent is mapped. Under an unmapped
    /// parent it stays unmapped. Nothing changes if the move is not allowed.
    pub fn reparent(&mut self, child: Handle, new_parent: Handle, ref_child: Option<Handle>) -> Result<()> {
        self.check_link(new_parent, child)?;
        if ref_child == Some(child) {
            return Err(Error::WouldCycle);
        }
        self.position_before(new_parent, ref_child)?;

        let was_mapped = self.is_mapped(child);
        if was_mapped {
            for h in self.objects.walk_depth_first(child) {
                self.save_class_attributes(h);
            }
        }
        self.detach(child)?;
        // Detaching may have shifted ref_child's index.
        let pos = self.position_before(new_parent, ref_child)?;
        self.link_checked(new_parent, child, pos)?;

        if was_mapped && self.is_mapped(new_parent) {
            self.map(child)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn parent(&self, ih: Handle) -> Option<Handle> {
        self.objects.parent(ih)
    }

    pub fn children(&self, ih: Handle) -> &[Handle] {
        self.objects.children(ih)
    }

    pub fn child_count(&self, ih: Handle) -> usize {
        self.objects.children(ih).len()
    }

    pub fn child_at(&self, ih: Handle, pos: usize) -> Option<Handle> {
        self.objects.children(ih).get(pos).copied()
    }

    pub fn child_pos(&self, parent: Handle, child: Handle) -> Option<usize> {
        self.objects.children(parent).iter().position(|&c| c == child)
    }

    /// The child after `child`, or the first child when `child` is `None`.
    pub fn next_child(&self, parent: Handle, child: Option<Handle>) -> Option<Handle> {
        match child {
            None => self.child_at(parent, 0),
            Some(c) => self.child_at(parent, self.child_pos(parent, c)? + 1),
        }
    }

    /// The next sibling.
    pub fn brother(&self, ih: Handle) -> Option<Handle> {
        let parent = self.objects.parent(ih)?;
        self.next_child(parent, Some(ih))
    }

    /// The nearest dialog at or above `ih`.
    pub fn dialog(&self, ih: Handle) -> Option<Handle> {
        std::iter::once(ih)
            .chain(self.objects.ancestors(ih))
            .find(|&h| self.category(h) == Some(NativeCategory::Dialog))
    }
}
