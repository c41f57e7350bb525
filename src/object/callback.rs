//! Named per-object callbacks such as `MAP_CB` and `DESTROY_CB`.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::handle::Handle;
use crate::toolkit::Toolkit;

/// Fired after an object is mapped.
pub const MAP_CB: &str = "MAP_CB";
/// Fired before an object is unmapped.
pub const UNMAP_CB: &str = "UNMAP_CB";
/// Fired before an object is destroyed.
pub const DESTROY_CB: &str = "DESTROY_CB";

/// What a callback asks its caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallbackAction {
    #[default]
    Default,
    /// Close the enclosing dialog or leave the event loop.
    Close,
    /// Suppress the caller's own processing.
    Ignore,
    /// Let the caller continue with the next handler.
    Continue,
}

/// A callback. Callbacks may freely modify the toolkit, including the object
/// they are attached to.
pub type Callback = Rc<dyn Fn(&mut Toolkit, Handle) -> CallbackAction>;

/// Name → callback storage owned by a single object.
#[derive(Clone, Default)]
pub struct CallbackTable {
    entries: IndexMap<String, Callback>,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a callback; `None` removes it. Returns the previous
    /// one.
    pub fn set(&mut self, name: &str, callback: Option<Callback>) -> Option<Callback> {
        match callback {
            Some(cb) => self.entries.insert(name.to_owned(), cb),
            None => self.entries.shift_remove(name),
        }
    }

    pub fn get(&self, name: &str) -> Option<Callback> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback {
        Rc::new(|_, _| CallbackAction::Default)
    }

    #[test]
    fn set_get_remove() {
        let mut t = CallbackTable::new();
        assert!(t.set(MAP_CB, Some(noop())).is_none());
        assert!(t.get(MAP_CB).is_some());
        assert!(t.set(MAP_CB, Some(noop())).is_some());
        assert_eq!(t.len(), 1);
        assert!(t.set(MAP_CB, None).is_some());
        assert!(t.is_empty());
    }

    #[test]
    fn names_in_insertion_order() {
        let mut t = CallbackTable::new();
        t.set(UNMAP_CB, Some(noop()));
        t.set(MAP_CB, Some(noop()));
        assert_eq!(t.names(), vec![UNMAP_CB, MAP_CB]);
        assert_eq!(format!("{t:?}"), "[\"UNMAP_CB\", \"MAP_CB\"]");
    }

    #[test]
    fn default_action() {
        assert_eq!(CallbackAction::default(), CallbackAction::Default);
    }
}
