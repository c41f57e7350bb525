//! Mapping: binding objects to native resources and back.
//!
//! Mapping a subtree walks it top-down. Each object gets its native handle
//! from the class `map` hook, then its stored attributes are replayed
//! through setters, then inherited values are pushed to its setters, then
//! `MAP_CB` fires. A failure anywhere unmaps everything the walk mapped.

use tracing::{debug, warn};

use super::resolve::Setter;
use super::Toolkit;
use crate::attr::AttrFlags;
use crate::class::{NativeCategory, NativeHandle, SetOutcome};
use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::object::{Handle, MAP_CB, UNMAP_CB};

impl Toolkit {
    /// Map `ih` and every unmapped object below it.
    ///
    /// A root must belong to a category that can stand alone (dialog, menu
    /// or void); a child needs a mapped parent. Mapping an already mapped
    /// object maps any children added since.
    pub fn map(&mut self, ih: Handle) -> Result<()> {
        let obj = self.objects.get(ih).ok_or(Error::InvalidHandle)?;
        if !obj.is_mapped() {
            match self.objects.parent(ih) {
                Some(parent) if !self.is_mapped(parent) => return Err(Error::ParentNotMapped),
                Some(_) => {}
                None => {
                    let category = self.category(ih).ok_or_else(|| Error::ClassNotFound(obj.class.clone()))?;
                    if !category.can_be_root() {
                        return Err(Error::NotRooted(obj.class.clone()));
                    }
                }
            }
        }

        let mut mapped = Vec::new();
        if let Err(e) = self.map_walk(ih, &mut mapped) {
            warn!(?ih, error = %e, rolled_back = mapped.len(), "Map failed; rolling back");
            for h in mapped.into_iter().rev() {
                self.unmap(h);
            }
            return Err(e);
        }
        Ok(())
    }

    fn map_walk(&mut self, ih: Handle, mapped: &mut Vec<Handle>) -> Result<()> {
        if !self.is_mapped(ih) {
            self.map_single(ih)?;
            mapped.push(ih);
        }
        for child in self.objects.children(ih).to_vec() {
            self.map_walk(child, mapped)?;
        }
        Ok(())
    }

    fn map_single(&mut self, ih: Handle) -> Result<()> {
        let class = self.class_name(ih).ok_or(Error::InvalidHandle)?.to_owned();
        let category = self.category(ih).ok_or_else(|| Error::ClassNotFound(class.clone()))?;

        let native = match self.classes.find_methods(&class) {
            Some(methods) => methods.map(self, ih).map_err(|e| Error::MapFailed {
                class: class.clone(),
                reason: e.0,
            })?,
            None if category == NativeCategory::Void => NativeHandle::Void,
            None => {
                return Err(Error::MapFailed {
                    class,
                    reason: "no driver registered for class".into(),
                })
            }
        };

        let obj = self.objects.get_mut(ih).ok_or(Error::InvalidHandle)?;
        obj.native = Some(native);
        self.lifecycle.on_map(ih);
        debug!(class = %class, ?ih, ?native, "Mapped object");

        let own = self.replay_attributes(ih);
        self.apply_inherited(ih, &own);
        self.call_callback(ih, MAP_CB);
        Ok(())
    }

    /// Push stored values through the setters that were skipped while the
    /// object was unmapped.
    ///
    /// `NOT_MAPPED` entries were already applied and are left alone. Values
    /// the native object now holds are dropped from the table when a getter
    /// can answer for them, and values the setter rejects are dropped
    /// outright. Returns the names the object still sets itself.
    fn replay_attributes(&mut self, ih: Handle) -> Vec<String> {
        let Some(obj) = self.objects.get(ih) else {
            return Vec::new();
        };
        let entries: Vec<(String, String)> = obj
            .attrs
            .iter_strings()
            .map(|(n, v)| (n.to_owned(), v.to_owned()))
            .collect();

        let mut names: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
        for (name, value) in entries {
            let Some(resolved) = self.resolve_for_replay(ih, &name) else {
                continue;
            };
            let Some(set) = resolved.set else {
                continue;
            };
            let outcome = set.call(self, ih, Some(&value));
            let rejected = outcome == SetOutcome::Rejected;
            if rejected || (outcome == SetOutcome::Applied && resolved.has_getter) {
                if let Some(obj) = self.objects.get_mut(ih) {
                    obj.attrs.remove(&name);
                }
            }
            if rejected {
                warn!(name = %name, value = %value, "Stored value rejected on map; dropped");
                names.retain(|n| n != &name);
            }
        }
        names
    }

    fn resolve_for_replay(&self, ih: Handle, name: &str) -> Option<Replay> {
        let class = &self.objects.get(ih)?.class;
        let resolved = self.resolve_handler(class, name)?;
        let skip = AttrFlags::NOT_MAPPED | AttrFlags::READONLY | AttrFlags::NOT_SUPPORTED;
        if resolved.flags.intersects(skip) {
            return None;
        }
        Some(Replay {
            set: resolved.set,
            has_getter: resolved.get.is_some(),
        })
    }

    /// Give inheritable setters the value an ancestor holds for them,
    /// skipping names the object stores itself.
    fn apply_inherited(&mut self, ih: Handle, own: &[String]) {
        let Some(class) = self.class_name(ih) else {
            return;
        };
        let mut pending = Vec::new();
        for name in self.classes.attribute_names(class) {
            let Some(h) = self.classes.find_attribute(class, &name) else {
                continue;
            };
            let Some(set) = h.set else {
                continue;
            };
            if !h.flags.is_inheritable() || h.flags.intersects(AttrFlags::READONLY | AttrFlags::NOT_SUPPORTED) {
                continue;
            }
            if own.contains(&name) || self.objects.get(ih).is_some_and(|o| o.attrs.contains(&name)) {
                continue;
            }
            if let Some(value) = self.inherited_attribute(ih, &name) {
                pending.push((set, name.clone(), value.into_owned()));
            }
        }
        for (set, name, value) in pending {
            debug!(?ih, name = %name, "Applying inherited value");
            Setter::Plain(set).call(self, ih, Some(&value));
        }
    }

    /// Release the native resources of `ih` and its subtree.
    ///
    /// `UNMAP_CB` fires first, children are unmapped before their parent,
    /// and the attribute table is kept. Unmapping an unmapped object does
    /// nothing.
    pub fn unmap(&mut self, ih: Handle) {
        if !self.is_mapped(ih) {
            return;
        }
        self.call_callback(ih, UNMAP_CB);
        for child in self.objects.children(ih).to_vec() {
            self.unmap(child);
        }
        let Some(native) = self.native_handle(ih) else {
            return;
        };
        if let Some(methods) = self.class_name(ih).and_then(|c| self.classes.find_methods(c)) {
            methods.unmap(self, ih, native);
        }
        if let Some(obj) = self.objects.get_mut(ih) {
            obj.native = None;
            debug!(class = %obj.class, ?ih, "Unmapped object");
        }
        self.lifecycle.on_unmap(ih);
    }

    /// Copy getter-answered values into the instance table so they survive
    /// an unmap.
    ///
    /// Values equal to the inherited value or the default are not stored.
    pub fn save_class_attributes(&mut self, ih: Handle) {
        let Some(class) = self.class_name(ih).map(str::to_owned) else {
            return;
        };
        let skip = AttrFlags::NO_SAVE
            | AttrFlags::READONLY
            | AttrFlags::WRITEONLY
            | AttrFlags::NO_STRING
            | AttrFlags::NOT_SUPPORTED;

        let mut saved = Vec::new();
        for name in self.classes.attribute_names(&class) {
            let Some(h) = self.classes.find_attribute(&class, &name) else {
                continue;
            };
            if h.flags.intersects(skip) || h.set.is_none() {
                continue;
            }
            let Some(get) = h.get else {
                continue;
            };
            if !self.is_mapped(ih) && !h.flags.allowed_unmapped() {
                continue;
            }
            if self.objects.get(ih).is_some_and(|o| o.attrs.contains(&name)) {
                continue;
            }
            let Some(value) = get(self, ih) else {
                continue;
            };
            let inherited = h
                .flags
                .is_inheritable()
                .then(|| self.inherited_attribute(ih, &name))
                .flatten();
            let default = h.default.as_ref().and_then(|d| self.default_value(d));
            if inherited.as_deref() == Some(value.as_str()) || default.as_deref() == Some(value.as_str()) {
                continue;
            }
            saved.push((name, value));
        }

        if let Some(obj) = self.objects.get_mut(ih) {
            for (name, value) in saved {
                obj.attrs.set(&name, Some(&value));
            }
        }
    }

    /// The size `ih` would like, asking the class when it knows better.
    ///
    /// The result is recorded as the object's natural size. A user size, when
    /// set, takes precedence per dimension.
    pub fn natural_size(&mut self, ih: Handle) -> Option<Size> {
        let class = self.class_name(ih)?.to_owned();
        if let Some(size) = self
            .classes
            .find_methods(&class)
            .and_then(|m| m.natural_size(self, ih))
        {
            self.objects.get_mut(ih)?.geometry.natural = size;
        }
        self.geometry(ih).map(|g| g.effective_natural())
    }
}

struct Replay {
    set: Option<Setter>,
    has_getter: bool,
}
