//! Per-object attribute table.
//!
//! An ordered map from attribute name to [`AttrValue`]. The table is plain
//! storage: it never calls class handlers, never walks parents and never
//! substitutes defaults. Dispatch lives in the toolkit layer.

use std::any::Any;
use std::rc::Rc;

use indexmap::IndexMap;

use super::value::AttrValue;
use crate::object::Handle;

/// Reserved prefix for internal attribute names.
pub const INTERNAL_PREFIX: char = '_';

/// Whether `name` uses the reserved internal prefix.
///
/// Internal attributes are hidden from enumeration and are never inherited.
#[inline]
pub fn is_internal(name: &str) -> bool {
    name.starts_with(INTERNAL_PREFIX)
}

/// Name → value storage owned by a single object.
#[derive(Debug, Clone, Default)]
pub struct AttrTable {
    entries: IndexMap<String, AttrValue>,
}

impl AttrTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a string value. `None` removes the entry.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) => self.insert(name, AttrValue::Str(v.to_owned())),
            None => {
                self.remove(name);
            }
        }
    }

    /// Insert or overwrite any value.
    pub fn insert(&mut self, name: &str, value: AttrValue) {
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = value;
        } else {
            self.entries.insert(name.to_owned(), value);
        }
    }

    /// Exact string lookup. Pointer entries return `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(AttrValue::as_str)
    }

    /// Raw entry lookup.
    pub fn get_value(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    /// Store an opaque pointer payload. `None` removes the entry.
    pub fn set_pointer(&mut self, name: &str, value: Option<Rc<dyn Any>>) {
        match value {
            Some(p) => self.insert(name, AttrValue::Ptr(p)),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn get_pointer(&self, name: &str) -> Option<Rc<dyn Any>> {
        self.entries.get(name).and_then(AttrValue::as_ptr).cloned()
    }

    /// Store a non-owning reference to another object.
    pub fn set_handle_ref(&mut self, name: &str, value: Option<Handle>) {
        match value {
            Some(h) => self.insert(name, AttrValue::Handle(h)),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn get_handle_ref(&self, name: &str) -> Option<Handle> {
        self.entries.get(name).and_then(AttrValue::as_handle)
    }

    /// Whether the entry under `name` carries a pointer or handle payload.
    pub fn is_pointer(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(AttrValue::is_pointer)
    }

    /// Remove an entry, returning it.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.entries.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of all user-visible entries, in insertion order.
    ///
    /// Internal names and pointer entries are skipped.
    pub fn names(&self) -> Vec<String> {
        self.iter_strings().map(|(k, _)| k.to_owned()).collect()
    }

    /// Iterate user-visible string entries in insertion order.
    pub fn iter_strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| {
            if is_internal(k) {
                return None;
            }
            v.as_str().map(|s| (k.as_str(), s))
        })
    }

    /// Total number of entries, internal ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
