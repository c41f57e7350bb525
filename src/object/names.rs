//! Named-handle table: objects locatable by a string name.
//!
//! A name maps to exactly one object. An object may carry several names.
//! Attributes flagged `HANDLE_NAME` store one of these names as their value.

use std::collections::HashMap;

use super::handle::Handle;

#[derive(Debug, Default)]
pub struct NameTable {
    by_name: HashMap<String, Handle>,
    auto_counter: u64,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `name` with `handle`, replacing any previous owner of the
    /// name. Returns the previous owner.
    pub fn set(&mut self, name: &str, handle: Handle) -> Option<Handle> {
        self.by_name.insert(name.to_owned(), handle)
    }

    /// Remove a name. Returns the object it referred to.
    pub fn remove(&mut self, name: &str) -> Option<Handle> {
        self.by_name.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Handle> {
        self.by_name.get(name).copied()
    }

    /// One name of `handle`, the lexicographically smallest when it has
    /// several.
    pub fn name_of(&self, handle: Handle) -> Option<&str> {
        self.by_name
            .iter()
            .filter(|(_, h)| **h == handle)
            .map(|(n, _)| n.as_str())
            .min()
    }

    /// Drop every name that refers to `handle`.
    pub fn remove_handle(&mut self, handle: Handle) -> usize {
        let before = self.by_name.len();
        self.by_name.retain(|_, h| *h != handle);
        before - self.by_name.len()
    }

    /// Generate a fresh name with the given prefix that is not in use.
    pub fn next_auto_name(&mut self, prefix: &str) -> String {
        loop {
            self.auto_counter += 1;
            let candidate = format!("{prefix}{}", self.auto_counter);
            if !self.by_name.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles() -> (Handle, Handle) {
        let mut sm: SlotMap<Handle, ()> = SlotMap::with_key();
        (sm.insert(()), sm.insert(()))
    }

    #[test]
    fn set_and_get() {
        let (a, _) = handles();
        let mut t = NameTable::new();
        assert!(t.set("ok_button", a).is_none());
        assert_eq!(t.get("ok_button"), Some(a));
        assert_eq!(t.name_of(a), Some("ok_button"));
    }

    #[test]
    fn rename_replaces_owner() {
        let (a, b) = handles();
        let mut t = NameTable::new();
        t.set("main", a);
        assert_eq!(t.set("main", b), Some(a));
        assert_eq!(t.get("main"), Some(b));
        assert_eq!(t.name_of(a), None);
    }

    #[test]
    fn several_names_per_object() {
        let (a, _) = handles();
        let mut t = NameTable::new();
        t.set("zeta", a);
        t.set("alpha", a);
        assert_eq!(t.name_of(a), Some("alpha"));
        assert_eq!(t.remove_handle(a), 2);
        assert!(t.is_empty());
    }

    #[test]
    fn auto_names_skip_taken() {
        let (a, _) = handles();
        let mut t = NameTable::new();
        t.set("_AUTO1", a);
        assert_eq!(t.next_auto_name("_AUTO"), "_AUTO2");
        assert_eq!(t.next_auto_name("_AUTO"), "_AUTO3");
    }

    #[test]
    fn names_sorted_and_clear() {
        let (a, b) = handles();
        let mut t = NameTable::new();
        t.set("b", b);
        t.set("a", a);
        assert_eq!(t.names(), vec!["a", "b"]);
        assert_eq!(t.remove("a"), Some(a));
        t.clear();
        assert_eq!(t.len(), 0);
    }
}
