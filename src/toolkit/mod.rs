//! The toolkit: class registry, object arena, name table and globals in one
//! injectable value.
//!
//! Everything the original design kept in process-wide globals lives here,
//! so tests and embedders can run any number of isolated toolkits. A
//! `Toolkit` is single-threaded (`!Send`); handlers and callbacks receive it
//! mutably and may re-enter it.

mod mapping;
mod resolve;
mod tree;

use std::rc::Rc;

use tracing::{debug, warn};

use crate::attr::AttrTable;
use crate::builtin;
use crate::class::{
    AttrHandler, Class, ClassMethods, ClassRegistry, CreateParam, Id2Handler, IdHandler,
    NativeCategory, NativeHandle,
};
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::object::{
    Callback, CallbackAction, Handle, LifecycleEvent, LifecycleTracker, NameTable, Object,
    ObjectTree, DESTROY_CB,
};

/// Global attributes every toolkit starts with. Drivers overwrite them with
/// platform values at startup.
pub const DEFAULT_GLOBALS: &[(&str, &str)] = &[
    ("DEFAULTFONT", "Sans, 10"),
    ("DLGBGCOLOR", "240 240 240"),
    ("DLGFGCOLOR", "0 0 0"),
    ("TXTBGCOLOR", "255 255 255"),
    ("TXTFGCOLOR", "0 0 0"),
];

/// Construction options for a [`Toolkit`].
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    /// Register the `base` class and the driver-less containers.
    pub register_base_classes: bool,
    /// Prefix for names generated when an unnamed object is stored in a
    /// handle-name attribute.
    pub auto_name_prefix: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            register_base_classes: true,
            auto_name_prefix: "_AUTONAME".into(),
        }
    }
}

/// Classes, objects and everything shared between them.
#[derive(Debug)]
pub struct Toolkit {
    pub(crate) classes: ClassRegistry,
    pub(crate) objects: ObjectTree,
    pub(crate) names: NameTable,
    pub(crate) globals: AttrTable,
    pub(crate) lifecycle: LifecycleTracker,
    config: ToolkitConfig,
}

impl Toolkit {
    /// A toolkit with default globals and the base classes registered.
    pub fn new() -> Self {
        Self::with_config(ToolkitConfig::default())
    }

    pub fn with_config(config: ToolkitConfig) -> Self {
        let mut globals = AttrTable::new();
        for (name, value) in DEFAULT_GLOBALS {
            globals.set(name, Some(value));
        }
        let mut tk = Self {
            classes: ClassRegistry::new(),
            objects: ObjectTree::new(),
            names: NameTable::new(),
            globals,
            lifecycle: LifecycleTracker::new(),
            config,
        };
        if tk.config.register_base_classes {
            builtin::register_base_classes(&mut tk.classes);
        }
        tk
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Destroy every object and forget all classes, names and globals.
    pub fn close(&mut self) {
        for root in self.objects.roots() {
            // A destroy callback may already have taken this one down.
            if self.objects.contains(root) {
                let _ = self.destroy(root);
            }
        }
        self.names.clear();
        self.classes.clear();
        self.globals.clear();
        self.lifecycle.clear();
        debug!("Toolkit closed");
    }

    // -----------------------------------------------------------------------
    // Classes
    // -----------------------------------------------------------------------

    pub fn register_class(&mut self, class: Class) -> Result<()> {
        self.classes.register(class)
    }

    pub fn is_registered(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    /// Register or replace a plain attribute handler on an existing class.
    pub fn register_attribute(&mut self, class: &str, name: &str, handler: AttrHandler) -> Result<()> {
        self.classes.register_attribute(class, name, handler)
    }

    pub fn register_attribute_id(&mut self, class: &str, name: &str, handler: IdHandler) -> Result<()> {
        self.classes.register_attribute_id(class, name, handler)
    }

    pub fn register_attribute_id2(&mut self, class: &str, name: &str, handler: Id2Handler) -> Result<()> {
        self.classes.register_attribute_id2(class, name, handler)
    }

    /// Remove a handler declared directly on `class`. Handlers inherited from
    /// parent classes are untouched.
    pub fn unregister_attribute(&mut self, class: &str, name: &str) -> Result<Option<AttrHandler>> {
        let class = self
            .classes
            .get_mut(class)
            .ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
        Ok(class.unregister_attribute(name))
    }

    /// Replace the attribute names that string creation parameters fill.
    pub fn set_param_attributes(&mut self, class: &str, names: Vec<String>) -> Result<()> {
        self.classes
            .get_mut(class)
            .ok_or_else(|| Error::ClassNotFound(class.to_owned()))?
            .set_param_attributes(names);
        Ok(())
    }

    pub fn register_methods(&mut self, class: &str, methods: Rc<dyn ClassMethods>) -> Result<()> {
        self.classes.register_methods(class, methods)
    }

    /// Every attribute name known to a class, including inherited ones.
    pub fn class_attribute_names(&self, class: &str) -> Vec<String> {
        self.classes.attribute_names(class)
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Create an unmapped object of `class`.
    ///
    /// String parameters are assigned, in order, to the class's parameter
    /// attributes; surplus strings are ignored. Child parameters are
    /// appended. The class's `create` hook runs last. On failure the object
    /// is discarded and any children it received are left detached.
    pub fn create(&mut self, class: &str, params: &[CreateParam]) -> Result<Handle> {
        let (interactive, param_attributes) = {
            let c = self
                .classes
                .get(class)
                .ok_or_else(|| Error::ClassNotFound(class.to_owned()))?;
            (c.is_interactive(), c.param_attributes().to_vec())
        };

        let ih = self.objects.insert(Object::new(class, interactive));
        self.lifecycle.on_create(ih);

        let mut slots = param_attributes.iter();
        for param in params {
            match param {
                CreateParam::Str(value) => match slots.next() {
                    Some(name) => {
                        self.set_attribute(ih, name, Some(value));
                    }
                    None => warn!(class, value = %value, "Ignoring surplus creation parameter"),
                },
                CreateParam::Child(child) => {
                    if let Err(e) = self.append(ih, *child) {
                        self.discard(ih);
                        return Err(e);
                    }
                }
            }
        }

        if let Some(methods) = self.classes.find_methods(class) {
            if let Err(e) = methods.create(self, ih, params) {
                warn!(class, error = %e, "Class create hook failed");
                self.discard(ih);
                return Err(Error::CreateFailed {
                    class: class.to_owned(),
                    reason: e.0,
                });
            }
        }

        debug!(class, ?ih, "Created object");
        Ok(ih)
    }

    /// Free an object that never finished construction.
    fn discard(&mut self, ih: Handle) {
        for child in self.objects.children(ih).to_vec() {
            self.objects.unlink(child);
        }
        self.objects.unlink(ih);
        self.names.remove_handle(ih);
        self.objects.remove(ih);
    }

    /// Destroy an object and its whole subtree.
    ///
    /// Order: `DESTROY_CB`, unmap, detach from the parent, the class
    /// `destroy` hook, then children (recursively), then the object's names
    /// and attribute table.
    pub fn destroy(&mut self, ih: Handle) -> Result<()> {
        if !self.objects.contains(ih) {
            return Err(Error::InvalidHandle);
        }
        self.call_callback(ih, DESTROY_CB);
        if !self.objects.contains(ih) {
            return Ok(());
        }
        self.unmap(ih);
        self.detach(ih)?;
        self.destroy_detached(ih);
        Ok(())
    }

    /// Destroy an unmapped, detached object and everything below it.
    fn destroy_detached(&mut self, ih: Handle) {
        let class = match self.objects.get(ih) {
            Some(obj) => obj.class.clone(),
            None => return,
        };
        if let Some(methods) = self.classes.find_methods(&class) {
            methods.destroy(self, ih);
        }
        for child in self.objects.children(ih).to_vec() {
            self.call_callback(child, DESTROY_CB);
            self.objects.unlink(child);
            self.destroy_detached(child);
        }
        // Hooks may have re-parented or created children under us.
        for child in self.objects.children(ih).to_vec() {
            self.objects.unlink(child);
        }
        self.names.remove_handle(ih);
        self.objects.remove(ih);
        self.lifecycle.on_destroy(ih);
        debug!(class = %class, ?ih, "Destroyed object");
    }

    pub fn is_alive(&self, ih: Handle) -> bool {
        self.objects.contains(ih)
    }

    pub fn object(&self, ih: Handle) -> Option<&Object> {
        self.objects.get(ih)
    }

    pub fn objects(&self) -> &ObjectTree {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn class_name(&self, ih: Handle) -> Option<&str> {
        self.objects.get(ih).map(|o| o.class.as_str())
    }

    pub fn class_of(&self, ih: Handle) -> Option<&Class> {
        self.classes.get(&self.objects.get(ih)?.class)
    }

    pub fn category(&self, ih: Handle) -> Option<NativeCategory> {
        self.class_of(ih).map(Class::category)
    }

    /// Whether `ih`'s class is `class` or derives from it.
    pub fn is_a(&self, ih: Handle, class: &str) -> bool {
        self.class_name(ih).is_some_and(|c| self.classes.is_a(c, class))
    }

    pub fn is_interactive(&self, ih: Handle) -> bool {
        self.objects.get(ih).is_some_and(|o| o.interactive)
    }

    pub fn geometry(&self, ih: Handle) -> Option<&Geometry> {
        self.objects.get(ih).map(|o| &o.geometry)
    }

    pub fn geometry_mut(&mut self, ih: Handle) -> Option<&mut Geometry> {
        self.objects.get_mut(ih).map(|o| &mut o.geometry)
    }

    pub fn is_mapped(&self, ih: Handle) -> bool {
        self.objects.get(ih).is_some_and(Object::is_mapped)
    }

    pub fn native_handle(&self, ih: Handle) -> Option<NativeHandle> {
        self.objects.get(ih).and_then(|o| o.native)
    }

    /// Drain lifecycle events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.take_events()
    }

    // -----------------------------------------------------------------------
    // Names
    // -----------------------------------------------------------------------

    /// Give `ih` a global name. `None` removes the name.
    pub fn set_handle(&mut self, name: &str, ih: Option<Handle>) -> Option<Handle> {
        match ih {
            Some(h) => self.names.set(name, h),
            None => self.names.remove(name),
        }
    }

    /// Look up an object by name. Stale entries are never returned.
    pub fn get_handle(&self, name: &str) -> Option<Handle> {
        self.names.get(name).filter(|&h| self.objects.contains(h))
    }

    pub fn get_name(&self, ih: Handle) -> Option<&str> {
        self.names.name_of(ih)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    // -----------------------------------------------------------------------
    // Globals
    // -----------------------------------------------------------------------

    pub fn set_global(&mut self, name: &str, value: Option<&str>) {
        self.globals.set(name, value);
    }

    pub fn get_global(&self, name: &str) -> Option<&str> {
        self.globals.get(name)
    }

    // -----------------------------------------------------------------------
    // Callbacks
    // -----------------------------------------------------------------------

    /// Install a callback; `None` removes it. Returns the previous one.
    pub fn set_callback(&mut self, ih: Handle, name: &str, callback: Option<Callback>) -> Option<Callback> {
        self.objects.get_mut(ih)?.callbacks.set(name, callback)
    }

    pub fn get_callback(&self, ih: Handle, name: &str) -> Option<Callback> {
        self.objects.get(ih)?.callbacks.get(name)
    }

    /// Invoke a callback if one is installed. Returns `Default` otherwise.
    pub fn call_callback(&mut self, ih: Handle, name: &str) -> CallbackAction {
        match self.get_callback(ih, name) {
            Some(cb) => cb(self, ih),
            None => CallbackAction::Default,
        }
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new()
    }
}
