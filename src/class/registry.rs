//! Class registry: name → class, with class-chain handler lookup.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::descriptor::Class;
use super::handler::{AttrHandler, Id2Handler, IdHandler};
use super::methods::ClassMethods;
use crate::error::{Error, Result};

/// All registered classes.
///
/// A parent class must be registered before its subclasses, so every class
/// chain is finite and acyclic.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Class>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under its name.
    pub fn register(&mut self, class: Class) -> Result<()> {
        if self.classes.contains_key(&class.name) {
            return Err(Error::ClassExists(class.name));
        }
        if let Some(parent) = &class.parent {
            if !self.classes.contains_key(parent) {
                return Err(Error::ParentClassNotFound {
                    class: class.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        debug!(class = %class.name, parent = ?class.parent, "Registered class");
        self.classes.insert(class.name.clone(), class);
        Ok(())
    }

    /// Remove a class. Subclasses that name it as parent keep their own
    /// handlers but lose everything inherited from it.
    pub fn unregister(&mut self, name: &str) -> Option<Class> {
        self.classes.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Class> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    /// Iterate `name` and its ancestors, nearest first.
    pub fn chain(&self, name: &str) -> ClassChain<'_> {
        ClassChain {
            registry: self,
            next: self.classes.get(name),
        }
    }

    /// Whether `name` is `ancestor` or derives from it.
    pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
        self.chain(name).any(|c| c.name == ancestor)
    }

    /// Nearest plain handler for `attr` on the class chain.
    ///
    /// The walk always reaches the root. `NO_INHERIT` on a handler concerns
    /// inheritance between objects, not between classes.
    pub fn find_attribute(&self, class: &str, attr: &str) -> Option<&AttrHandler> {
        self.chain(class).find_map(|c| c.attributes.get(attr))
    }

    pub fn find_id_attribute(&self, class: &str, attr: &str) -> Option<&IdHandler> {
        self.chain(class).find_map(|c| c.id_attributes.get(attr))
    }

    pub fn find_id2_attribute(&self, class: &str, attr: &str) -> Option<&Id2Handler> {
        self.chain(class).find_map(|c| c.id2_attributes.get(attr))
    }

    /// Whether any class on the chain has id-parameterized handlers.
    pub fn has_id_attributes(&self, class: &str) -> bool {
        self.chain(class).any(Class::has_id_attributes)
    }

    /// Nearest methods on the class chain.
    pub fn find_methods(&self, class: &str) -> Option<Rc<dyn ClassMethods>> {
        self.chain(class).find_map(|c| c.methods.clone())
    }

    /// Register (or replace) a handler on an existing class.
    pub fn register_attribute(&mut self, class: &str, name: &str, handler: AttrHandler) -> Result<()> {
        let c = self.get_mut(class).ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
        c.register_attribute(name, handler);
        Ok(())
    }

    pub fn register_attribute_id(&mut self, class: &str, name: &str, handler: IdHandler) -> Result<()> {
        let c = self.get_mut(class).ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
        c.register_attribute_id(name, handler);
        Ok(())
    }

    pub fn register_attribute_id2(&mut self, class: &str, name: &str, handler: Id2Handler) -> Result<()> {
        let c = self.get_mut(class).ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
        c.register_attribute_id2(name, handler);
        Ok(())
    }

    pub fn register_methods(&mut self, class: &str, methods: Rc<dyn ClassMethods>) -> Result<()> {
        let c = self.get_mut(class).ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
        c.set_methods(methods);
        Ok(())
    }

    /// Every attribute name known to `class`, its own first, then inherited
    /// ones not overridden.
    pub fn attribute_names(&self, class: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for c in self.chain(class) {
            for name in c.local_attribute_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_owned());
                }
            }
        }
        names
    }
}

/// Iterator over a class and its ancestors.
pub struct ClassChain<'a> {
    registry: &'a ClassRegistry,
    next: Option<&'a Class>,
}

impl<'a> Iterator for ClassChain<'a> {
    type Item = &'a Class;

    fn next(&mut self) -> Option<&'a Class> {
        let class = self.next?;
        self.next = class
            .parent
            .as_deref()
            .and_then(|p| self.registry.classes.get(p));
        Some(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrFlags;
    use crate::class::descriptor::{ChildPolicy, NativeCategory};
    use crate::class::methods::VoidMethods;

    fn registry() -> ClassRegistry {
        let mut reg = ClassRegistry::new();
        reg.register(
            Class::new("base", NativeCategory::Void, ChildPolicy::None)
                .with_attribute("FGCOLOR", AttrHandler::new().default_value("0 0 0"))
                .with_attribute("TITLE", AttrHandler::new().flags(AttrFlags::NO_INHERIT)),
        )
        .unwrap();
        reg.register(
            Class::new("button", NativeCategory::Control, ChildPolicy::None)
                .with_parent("base")
                .with_attribute("TITLE", AttrHandler::new().default_value("OK")),
        )
        .unwrap();
        reg.register(
            Class::new("flatbutton", NativeCategory::Canvas, ChildPolicy::None).with_parent("button"),
        )
        .unwrap();
        reg
    }

    #[test]
    fn register_and_get() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert!(reg.contains("button"));
        assert_eq!(reg.get("button").unwrap().parent(), Some("base"));
        assert_eq!(reg.names(), vec!["base", "button", "flatbutton"]);
    }

    #[test]
    fn duplicate_class_rejected() {
        let mut reg = registry();
        let err = reg
            .register(Class::new("button", NativeCategory::Control, ChildPolicy::None))
            .unwrap_err();
        assert_eq!(err, Error::ClassExists("button".into()));
    }

    #[test]
    fn missing_parent_rejected() {
        let mut reg = ClassRegistry::new();
        let err = reg
            .register(Class::new("x", NativeCategory::Void, ChildPolicy::None).with_parent("nope"))
            .unwrap_err();
        assert!(matches!(err, Error::ParentClassNotFound { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn chain_walks_to_root() {
        let reg = registry();
        let names: Vec<&str> = reg.chain("flatbutton").map(Class::name).collect();
        assert_eq!(names, vec!["flatbutton", "button", "base"]);
        assert_eq!(reg.chain("unknown").count(), 0);
    }

    #[test]
    fn is_a() {
        let reg = registry();
        assert!(reg.is_a("flatbutton", "base"));
        assert!(reg.is_a("button", "button"));
        assert!(!reg.is_a("base", "button"));
    }

    #[test]
    fn nearest_handler_wins() {
        let reg = registry();
        let title = reg.find_attribute("flatbutton", "TITLE").unwrap();
        assert!(title.flags.is_empty());
        let base_title = reg.find_attribute("base", "TITLE").unwrap();
        assert_eq!(base_title.flags, AttrFlags::NO_INHERIT);
        assert!(reg.find_attribute("flatbutton", "FGCOLOR").is_some());
        assert!(reg.find_attribute("flatbutton", "MISSING").is_none());
    }

    #[test]
    fn no_inherit_handlers_stay_visible_to_subclasses() {
        let mut reg = registry();
        reg.register_attribute(
            "base",
            "LOCAL",
            AttrHandler::new().default_value("X").flags(AttrFlags::NO_INHERIT),
        )
        .unwrap();
        let h = reg.find_attribute("flatbutton", "LOCAL").unwrap();
        assert!(h.flags.contains(AttrFlags::NO_INHERIT));
        assert!(h.default.is_some());
    }

    #[test]
    fn override_on_existing_class() {
        let mut reg = registry();
        reg.register_attribute("base", "FGCOLOR", AttrHandler::new().default_value("255 255 255"))
            .unwrap();
        let h = reg.find_attribute("button", "FGCOLOR").unwrap();
        assert!(h.default.is_some());
        assert!(reg.register_attribute("ghost", "A", AttrHandler::new()).is_err());
    }

    #[test]
    fn id_lookup() {
        let mut reg = registry();
        assert!(!reg.has_id_attributes("flatbutton"));
        reg.register_attribute_id("base", "ITEM", IdHandler::default()).unwrap();
        reg.register_attribute_id2("button", "CELL", Id2Handler::default()).unwrap();
        assert!(reg.has_id_attributes("flatbutton"));
        assert!(reg.find_id_attribute("flatbutton", "ITEM").is_some());
        assert!(reg.find_id2_attribute("flatbutton", "CELL").is_some());
        assert!(reg.find_id2_attribute("base", "CELL").is_none());
    }

    #[test]
    fn methods_inherited() {
        let mut reg = registry();
        assert!(reg.find_methods("flatbutton").is_none());
        reg.register_methods("button", Rc::new(VoidMethods)).unwrap();
        assert!(reg.find_methods("flatbutton").is_some());
        assert!(reg.find_methods("base").is_none());
    }

    #[test]
    fn attribute_names_dedup() {
        let reg = registry();
        assert_eq!(reg.attribute_names("button"), vec!["TITLE", "FGCOLOR"]);
    }

    #[test]
    fn unregister_and_clear() {
        let mut reg = registry();
        assert!(reg.unregister("flatbutton").is_some());
        assert!(!reg.contains("flatbutton"));
        reg.clear();
        assert!(reg.is_empty());
    }
}
