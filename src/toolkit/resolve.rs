//! Attribute resolution: getter, instance table, inheritance, default.

use std::any::Any;
use std::borrow::Cow;
use std::rc::Rc;

use tracing::{trace, warn};

use super::Toolkit;
use crate::attr::convert;
use crate::attr::name::{id2_name, id_name};
use crate::attr::parse::parse_attributes;
use crate::attr::{is_internal, parse_id_name, AttrFlags, IdName};
use crate::class::{
    DefaultValue, GetFn, GetId2Fn, GetIdFn, SetFn, SetId2Fn, SetIdFn, SetOutcome,
};
use crate::error::Result;
use crate::object::Handle;

/// A getter bound to its ids.
#[derive(Clone, Copy)]
pub(crate) enum Getter {
    Plain(GetFn),
    Id(GetIdFn, i32),
    Id2(GetId2Fn, i32, i32),
}

impl Getter {
    fn call(self, tk: &Toolkit, ih: Handle) -> Option<String> {
        match self {
            Getter::Plain(f) => f(tk, ih),
            Getter::Id(f, id) => f(tk, ih, id),
            Getter::Id2(f, lin, col) => f(tk, ih, lin, col),
        }
    }
}

/// A setter bound to its ids.
#[derive(Clone, Copy)]
pub(crate) enum Setter {
    Plain(SetFn),
    Id(SetIdFn, i32),
    Id2(SetId2Fn, i32, i32),
}

impl Setter {
    pub(crate) fn call(self, tk: &mut Toolkit, ih: Handle, value: Option<&str>) -> SetOutcome {
        match self {
            Setter::Plain(f) => f(tk, ih, value),
            Setter::Id(f, id) => f(tk, ih, id, value),
            Setter::Id2(f, lin, col) => f(tk, ih, lin, col, value),
        }
    }
}

/// The handler that answers `name` on a class, copied out of the registry so
/// it can be called while the toolkit is borrowed mutably.
#[derive(Clone, Default)]
pub(crate) struct Resolved {
    pub(crate) get: Option<Getter>,
    pub(crate) set: Option<Setter>,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) flags: AttrFlags,
}

impl Toolkit {
    /// Find the handler for `name` on `class`, id forms first.
    ///
    /// Returns `None` for names no class in the chain knows about. Such
    /// attributes are plain stored strings and are inheritable.
    pub(crate) fn resolve_handler(&self, class: &str, name: &str) -> Option<Resolved> {
        if self.classes.has_id_attributes(class) {
            match parse_id_name(name) {
                Some(IdName::One(base, id)) => {
                    if let Some(h) = self.classes.find_id_attribute(class, base) {
                        return Some(Resolved {
                            get: h.get.map(|f| Getter::Id(f, id)),
                            set: h.set.map(|f| Setter::Id(f, id)),
                            default: None,
                            flags: h.flags,
                        });
                    }
                }
                Some(IdName::Two(base, lin, col)) => {
                    if let Some(h) = self.classes.find_id2_attribute(class, base) {
                        return Some(Resolved {
                            get: h.get.map(|f| Getter::Id2(f, lin, col)),
                            set: h.set.map(|f| Setter::Id2(f, lin, col)),
                            default: None,
                            flags: h.flags,
                        });
                    }
                }
                None => {}
            }
        }
        self.classes.find_attribute(class, name).map(|h| Resolved {
            get: h.get.map(Getter::Plain),
            set: h.set.map(Setter::Plain),
            default: h.default.clone(),
            flags: h.flags,
        })
    }

    fn resolve_for(&self, ih: Handle, name: &str) -> Option<Resolved> {
        let class = &self.objects.get(ih)?.class;
        self.resolve_handler(class, name)
    }

    pub(crate) fn default_value(&self, default: &DefaultValue) -> Option<Cow<'_, str>> {
        match default {
            DefaultValue::Literal(Cow::Borrowed(s)) => Some(Cow::Borrowed(s)),
            DefaultValue::Literal(Cow::Owned(s)) => Some(Cow::Owned(s.clone())),
            DefaultValue::Global(name) => self.globals.get(name).map(Cow::Borrowed),
        }
    }

    // -----------------------------------------------------------------------
    // Get
    // -----------------------------------------------------------------------

    /// Resolve an attribute value.
    ///
    /// Order: the class getter (when it may run and answers), the object's
    /// own table, the ancestors for inheritable names (see
    /// [`inherited_attribute`](Self::inherited_attribute)), the handler
    /// default. `None` when nothing answers.
    pub fn get_attribute(&self, ih: Handle, name: &str) -> Option<Cow<'_, str>> {
        let obj = self.objects.get(ih)?;
        if is_internal(name) {
            return obj.attrs.get(name).map(Cow::Borrowed);
        }

        let resolved = self.resolve_handler(&obj.class, name).unwrap_or_default();
        if resolved.flags.contains(AttrFlags::WRITEONLY) {
            return None;
        }
        if let Some(get) = resolved.get {
            if obj.is_mapped() || resolved.flags.allowed_unmapped() {
                if let Some(value) = get.call(self, ih) {
                    trace!(class = %obj.class, name, "Attribute answered by getter");
                    return Some(Cow::Owned(value));
                }
            }
        }
        self.stored_attribute(ih, name, resolved.flags, resolved.default.as_ref())
    }

    /// Steps after the getter: own table, ancestors, default.
    pub(crate) fn stored_attribute(
        &self,
        ih: Handle,
        name: &str,
        flags: AttrFlags,
        default: Option<&DefaultValue>,
    ) -> Option<Cow<'_, str>> {
        let obj = self.objects.get(ih)?;
        if let Some(v) = obj.attrs.get(name) {
            return Some(Cow::Borrowed(v));
        }
        if flags.is_inheritable() {
            if let Some(v) = self.inherited_attribute(ih, name) {
                return Some(v);
            }
        }
        if flags.contains(AttrFlags::NO_DEFAULT_VALUE) {
            return None;
        }
        default.and_then(|d| self.default_value(d))
    }

    /// The value `ih` inherits for `name` from its nearest ancestor.
    ///
    /// Each ancestor answers as [`get_attribute`](Self::get_attribute)
    /// would, minus inheritance and defaults: its getter first, then its own
    /// table. A value a setter applied natively is still inherited.
    pub fn inherited_attribute(&self, ih: Handle, name: &str) -> Option<Cow<'_, str>> {
        self.objects
            .ancestors(ih)
            .into_iter()
            .find_map(|a| self.local_attribute(a, name))
    }

    /// Getter answer or own-table value for `name`, nothing further.
    fn local_attribute(&self, ih: Handle, name: &str) -> Option<Cow<'_, str>> {
        let obj = self.objects.get(ih)?;
        if let Some(resolved) = self.resolve_handler(&obj.class, name) {
            if resolved.flags.contains(AttrFlags::WRITEONLY) {
                return None;
            }
            if let Some(get) = resolved.get {
                if obj.is_mapped() || resolved.flags.allowed_unmapped() {
                    if let Some(value) = get.call(self, ih) {
                        return Some(Cow::Owned(value));
                    }
                }
            }
        }
        obj.attrs.get(name).map(Cow::Borrowed)
    }

    // -----------------------------------------------------------------------
    // Set
    // -----------------------------------------------------------------------

    /// Assign an attribute. `None` resets it to its default.
    ///
    /// Never fails: a stale handle or a read-only attribute yields
    /// [`SetOutcome::Rejected`].
    pub fn set_attribute(&mut self, ih: Handle, name: &str, value: Option<&str>) -> SetOutcome {
        let Some(obj) = self.objects.get_mut(ih) else {
            return SetOutcome::Rejected;
        };
        if is_internal(name) {
            obj.attrs.set(name, value);
            return SetOutcome::Cached;
        }

        let resolved = self.resolve_for(ih, name).unwrap_or_default();
        let outcome = self.dispatch_set(ih, name, &resolved, value);
        if let Some(obj) = self.objects.get_mut(ih) {
            match outcome {
                SetOutcome::Cached => obj.attrs.set(name, value),
                // The native side holds it now; a stale copy must not answer.
                SetOutcome::Applied => {
                    obj.attrs.remove(name);
                }
                SetOutcome::Rejected => {}
            }
        }
        if outcome.is_accepted() && resolved.flags.is_inheritable() {
            self.notify_children(ih, name);
        }
        outcome
    }

    /// Run the setter policy for one assignment. Does not touch the table.
    fn dispatch_set(
        &mut self,
        ih: Handle,
        name: &str,
        resolved: &Resolved,
        value: Option<&str>,
    ) -> SetOutcome {
        let flags = resolved.flags;
        if flags.intersects(AttrFlags::READONLY | AttrFlags::NOT_SUPPORTED) {
            trace!(name, "Write to read-only or unsupported attribute ignored");
            return SetOutcome::Rejected;
        }
        let Some(set) = resolved.set else {
            return SetOutcome::Cached;
        };
        if !self.is_mapped(ih) && !flags.allowed_unmapped() {
            // Deferred: stored now, replayed through the setter on map.
            trace!(name, "Setter deferred until map");
            return SetOutcome::Cached;
        }

        let fallback;
        let value = match value {
            None if !flags.contains(AttrFlags::NO_DEFAULT_VALUE) => {
                fallback = resolved
                    .default
                    .as_ref()
                    .and_then(|d| self.default_value(d).map(Cow::into_owned));
                fallback.as_deref()
            }
            v => v,
        };

        let outcome = set.call(self, ih, value);
        match outcome {
            SetOutcome::Rejected => warn!(name, value = ?value, "Attribute value rejected"),
            SetOutcome::Cached if flags.contains(AttrFlags::NO_STRING) => {
                return SetOutcome::Applied;
            }
            _ => trace!(name, ?outcome, "Attribute set"),
        }
        outcome
    }

    /// Push an inheritable value change down to descendants that do not
    /// override it locally.
    ///
    /// Each descendant's setter receives that descendant's newly resolved
    /// value. Nothing is stored in descendant tables.
    fn notify_children(&mut self, ih: Handle, name: &str) {
        for child in self.objects.children(ih).to_vec() {
            let Some(obj) = self.objects.get(child) else {
                continue;
            };
            if obj.attrs.contains(name) {
                continue;
            }
            let mapped = obj.is_mapped();
            let resolved = self.resolve_for(child, name).unwrap_or_default();
            if !resolved.flags.is_inheritable() {
                continue;
            }
            if let Some(set) = resolved.set {
                let writable = !resolved
                    .flags
                    .intersects(AttrFlags::READONLY | AttrFlags::NOT_SUPPORTED);
                if writable && (mapped || resolved.flags.allowed_unmapped()) {
                    let value = self
                        .stored_attribute(child, name, resolved.flags, resolved.default.as_ref())
                        .map(Cow::into_owned);
                    set.call(self, child, value.as_deref());
                }
            }
            self.notify_children(child, name);
        }
    }

    /// Remove `name` from the object and all its descendants, then let
    /// mapped descendants pick up the value they now inherit.
    pub fn reset_attribute(&mut self, ih: Handle, name: &str) {
        if !self.objects.contains(ih) {
            return;
        }
        for h in self.objects.walk_depth_first(ih) {
            if let Some(obj) = self.objects.get_mut(h) {
                obj.attrs.remove(name);
            }
        }
        self.notify_children(ih, name);
    }

    /// Parse `"A=1, B=\"x y\""` and set each pair in order.
    ///
    /// Parsing happens up front, so a syntax error leaves the object
    /// unchanged.
    pub fn set_attributes(&mut self, ih: Handle, input: &str) -> Result<()> {
        for (name, value) in parse_attributes(input)? {
            self.set_attribute(ih, &name, Some(&value));
        }
        Ok(())
    }

    /// Names stored on the object itself, excluding internal ones.
    pub fn attribute_names(&self, ih: Handle) -> Vec<String> {
        self.objects
            .get(ih)
            .map(|o| o.attrs.names())
            .unwrap_or_default()
    }

    /// Copy every stored string attribute of `src` onto `dst` through
    /// `set_attribute`. Internal, read-only and `NO_SAVE` names are skipped.
    pub fn copy_attributes(&mut self, src: Handle, dst: Handle) {
        let Some(obj) = self.objects.get(src) else {
            return;
        };
        let pairs: Vec<(String, String)> = obj
            .attrs
            .iter_strings()
            .filter(|(name, _)| !is_internal(name))
            .map(|(n, v)| (n.to_owned(), v.to_owned()))
            .collect();
        for (name, value) in pairs {
            let flags = self.resolve_for(src, &name).map(|r| r.flags).unwrap_or_default();
            if flags.intersects(AttrFlags::READONLY | AttrFlags::NO_SAVE) {
                continue;
            }
            self.set_attribute(dst, &name, Some(&value));
        }
    }

    // -----------------------------------------------------------------------
    // Typed helpers
    // -----------------------------------------------------------------------

    pub fn set_str(&mut self, ih: Handle, name: &str, value: &str) -> SetOutcome {
        self.set_attribute(ih, name, Some(value))
    }

    pub fn set_int(&mut self, ih: Handle, name: &str, value: i32) -> SetOutcome {
        self.set_attribute(ih, name, Some(&value.to_string()))
    }

    pub fn get_int(&self, ih: Handle, name: &str) -> Option<i32> {
        convert::str_to_int(&self.get_attribute(ih, name)?)
    }

    pub fn set_float(&mut self, ih: Handle, name: &str, value: f64) -> SetOutcome {
        self.set_attribute(ih, name, Some(&value.to_string()))
    }

    pub fn get_float(&self, ih: Handle, name: &str) -> Option<f64> {
        convert::str_to_float(&self.get_attribute(ih, name)?)
    }

    /// `YES`, `ON`, `TRUE` and `1` are true, case-insensitively. Unset is
    /// false.
    pub fn get_bool(&self, ih: Handle, name: &str) -> bool {
        self.get_attribute(ih, name)
            .is_some_and(|v| convert::str_to_bool(&v))
    }

    pub fn set_bool(&mut self, ih: Handle, name: &str, value: bool) -> SetOutcome {
        self.set_attribute(ih, name, Some(convert::bool_to_str(value)))
    }

    pub fn set_rgb(&mut self, ih: Handle, name: &str, (r, g, b): (u8, u8, u8)) -> SetOutcome {
        self.set_attribute(ih, name, Some(&convert::rgb_to_str(r, g, b)))
    }

    pub fn get_rgb(&self, ih: Handle, name: &str) -> Option<(u8, u8, u8)> {
        convert::str_to_rgb(&self.get_attribute(ih, name)?)
    }

    /// Split a two-number value such as `"10x20"` or `"3:4"`.
    pub fn get_int_int(&self, ih: Handle, name: &str, sep: char) -> (Option<i32>, Option<i32>) {
        match self.get_attribute(ih, name) {
            Some(v) => convert::str_to_int_int(&v, sep),
            None => (None, None),
        }
    }

    pub fn set_attribute_id(&mut self, ih: Handle, base: &str, id: i32, value: Option<&str>) -> SetOutcome {
        self.set_attribute(ih, &id_name(base, id), value)
    }

    pub fn get_attribute_id(&self, ih: Handle, base: &str, id: i32) -> Option<Cow<'_, str>> {
        self.get_attribute(ih, &id_name(base, id))
    }

    pub fn set_attribute_id2(
        &mut self,
        ih: Handle,
        base: &str,
        lin: i32,
        col: i32,
        value: Option<&str>,
    ) -> SetOutcome {
        self.set_attribute(ih, &id2_name(base, lin, col), value)
    }

    pub fn get_attribute_id2(&self, ih: Handle, base: &str, lin: i32, col: i32) -> Option<Cow<'_, str>> {
        self.get_attribute(ih, &id2_name(base, lin, col))
    }

    // -----------------------------------------------------------------------
    // Pointers and handle references
    // -----------------------------------------------------------------------

    /// Store an opaque payload. Pointer attributes bypass handlers and are
    /// never inherited.
    pub fn set_pointer(&mut self, ih: Handle, name: &str, value: Option<Rc<dyn Any>>) {
        if let Some(obj) = self.objects.get_mut(ih) {
            obj.attrs.set_pointer(name, value);
        }
    }

    pub fn get_pointer(&self, ih: Handle, name: &str) -> Option<Rc<dyn Any>> {
        self.objects.get(ih)?.attrs.get_pointer(name)
    }

    /// Store a reference to `target` by name, giving it a generated name
    /// first if it has none.
    pub fn set_attribute_handle(&mut self, ih: Handle, name: &str, target: Option<Handle>) -> SetOutcome {
        let Some(target) = target else {
            return self.set_attribute(ih, name, None);
        };
        if !self.objects.contains(target) {
            return SetOutcome::Rejected;
        }
        let target_name = match self.names.name_of(target) {
            Some(n) => n.to_owned(),
            None => {
                let generated = self.names.next_auto_name(&self.config.auto_name_prefix);
                self.names.set(&generated, target);
                generated
            }
        };
        self.set_attribute(ih, name, Some(&target_name))
    }

    /// Resolve an attribute whose value names another object.
    pub fn get_attribute_handle(&self, ih: Handle, name: &str) -> Option<Handle> {
        let value = self.get_attribute(ih, name)?;
        self.get_handle(&value)
    }
}
