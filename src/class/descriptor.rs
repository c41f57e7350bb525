//! Class descriptor: name, native category, child policy and handler tables.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::handler::{AttrHandler, Id2Handler, IdHandler};
use super::methods::ClassMethods;

/// What kind of native object a class creates when mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeCategory {
    /// Nothing native; layout containers and other logical objects.
    Void,
    Control,
    Canvas,
    /// A top-level window. The root of every mapped tree.
    Dialog,
    Menu,
}

impl NativeCategory {
    /// Whether an object of this category may be mapped without a parent.
    pub fn can_be_root(self) -> bool {
        matches!(self, NativeCategory::Dialog | NativeCategory::Menu | NativeCategory::Void)
    }
}

/// How many children a class accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildPolicy {
    None,
    One,
    Many,
}

/// A registered object type.
///
/// Classes are shared by every instance of their type. Handler lookup walks
/// from a class to its parent class, so a class only registers what it adds
/// or overrides.
#[derive(Clone)]
pub struct Class {
    pub(crate) name: String,
    pub(crate) category: NativeCategory,
    pub(crate) child_policy: ChildPolicy,
    pub(crate) parent: Option<String>,
    pub(crate) interactive: bool,
    pub(crate) attributes: IndexMap<String, AttrHandler>,
    pub(crate) id_attributes: IndexMap<String, IdHandler>,
    pub(crate) id2_attributes: IndexMap<String, Id2Handler>,
    pub(crate) methods: Option<Rc<dyn ClassMethods>>,
    pub(crate) param_attributes: Vec<String>,
}

impl Class {
    /// A new class with no parent, no handlers and no methods.
    pub fn new(name: impl Into<String>, category: NativeCategory, child_policy: ChildPolicy) -> Self {
        Self {
            name: name.into(),
            category,
            child_policy,
            parent: None,
            interactive: matches!(category, NativeCategory::Control | NativeCategory::Canvas),
            attributes: IndexMap::new(),
            id_attributes: IndexMap::new(),
            id2_attributes: IndexMap::new(),
            methods: None,
            param_attributes: Vec::new(),
        }
    }

    /// Inherit handlers and methods from `parent` (builder).
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Attach driver methods (builder).
    pub fn with_methods(mut self, methods: Rc<dyn ClassMethods>) -> Self {
        self.methods = Some(methods);
        self
    }

    /// Override the interactive flag copied to instances (builder).
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Name the attributes that positional string creation parameters set,
    /// in order (builder).
    pub fn with_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Register a plain attribute handler on this class, replacing any
    /// previous handler of the same name (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, handler: AttrHandler) -> Self {
        self.register_attribute(name, handler);
        self
    }

    /// Register several plain handlers at once, as produced by the
    /// `attributes!` macro (builder).
    pub fn with_attributes<I, S>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = (S, AttrHandler)>,
        S: Into<String>,
    {
        for (name, handler) in handlers {
            self.register_attribute(name, handler);
        }
        self
    }

    pub fn set_param_attributes(&mut self, names: Vec<String>) {
        self.param_attributes = names;
    }

    pub fn register_attribute(&mut self, name: impl Into<String>, handler: AttrHandler) {
        self.attributes.insert(name.into(), handler);
    }

    pub fn register_attribute_id(&mut self, name: impl Into<String>, handler: IdHandler) {
        self.id_attributes.insert(name.into(), handler);
    }

    pub fn register_attribute_id2(&mut self, name: impl Into<String>, handler: Id2Handler) {
        self.id2_attributes.insert(name.into(), handler);
    }

    /// Remove a handler registered on this class only.
    pub fn unregister_attribute(&mut self, name: &str) -> Option<AttrHandler> {
        self.attributes.shift_remove(name)
    }

    pub fn set_methods(&mut self, methods: Rc<dyn ClassMethods>) {
        self.methods = Some(methods);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> NativeCategory {
        self.category
    }

    pub fn child_policy(&self) -> ChildPolicy {
        self.child_policy
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn param_attributes(&self) -> &[String] {
        &self.param_attributes
    }

    /// Handler registered directly on this class.
    pub fn local_attribute(&self, name: &str) -> Option<&AttrHandler> {
        self.attributes.get(name)
    }

    pub fn local_id_attribute(&self, name: &str) -> Option<&IdHandler> {
        self.id_attributes.get(name)
    }

    pub fn local_id2_attribute(&self, name: &str) -> Option<&Id2Handler> {
        self.id2_attributes.get(name)
    }

    /// Names registered directly on this class, plain handlers first.
    pub fn local_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .keys()
            .chain(self.id_attributes.keys())
            .chain(self.id2_attributes.keys())
            .map(String::as_str)
    }

    pub(crate) fn has_id_attributes(&self) -> bool {
        !self.id_attributes.is_empty() || !self.id2_attributes.is_empty()
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("child_policy", &self.child_policy)
            .field("parent", &self.parent)
            .field("attributes", &self.attributes.len())
            .field("id_attributes", &self.id_attributes.len())
            .field("id2_attributes", &self.id2_attributes.len())
            .field("has_methods", &self.methods.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrFlags;

    #[test]
    fn new_defaults() {
        let c = Class::new("label", NativeCategory::Control, ChildPolicy::None);
        assert_eq!(c.name(), "label");
        assert_eq!(c.category(), NativeCategory::Control);
        assert_eq!(c.child_policy(), ChildPolicy::None);
        assert!(c.parent().is_none());
        assert!(c.is_interactive());
        assert!(c.param_attributes().is_empty());
    }

    #[test]
    fn void_classes_are_not_interactive() {
        let c = Class::new("vbox", NativeCategory::Void, ChildPolicy::Many);
        assert!(!c.is_interactive());
        assert!(!c.clone().interactive(false).is_interactive());
    }

    #[test]
    fn reregistration_overwrites() {
        let mut c = Class::new("x", NativeCategory::Void, ChildPolicy::None);
        c.register_attribute("COLOR", AttrHandler::new().default_value("BLACK"));
        c.register_attribute(
            "COLOR",
            AttrHandler::new().default_value("WHITE").flags(AttrFlags::NO_INHERIT),
        );
        let h = c.local_attribute("COLOR").unwrap();
        assert_eq!(h.flags, AttrFlags::NO_INHERIT);
        assert_eq!(c.local_attribute_names().count(), 1);
    }

    #[test]
    fn unregister() {
        let mut c = Class::new("x", NativeCategory::Void, ChildPolicy::None)
            .with_attribute("A", AttrHandler::new());
        assert!(c.unregister_attribute("A").is_some());
        assert!(c.local_attribute("A").is_none());
    }

    #[test]
    fn id_tables() {
        let mut c = Class::new("tree", NativeCategory::Control, ChildPolicy::None);
        assert!(!c.has_id_attributes());
        c.register_attribute_id("TITLE", IdHandler::default());
        assert!(c.has_id_attributes());
        assert!(c.local_id_attribute("TITLE").is_some());
        assert!(c.local_id2_attribute("TITLE").is_none());
    }

    #[test]
    fn root_categories() {
        assert!(NativeCategory::Dialog.can_be_root());
        assert!(NativeCategory::Menu.can_be_root());
        assert!(NativeCategory::Void.can_be_root());
        assert!(!NativeCategory::Control.can_be_root());
        assert!(!NativeCategory::Canvas.can_be_root());
    }
}
