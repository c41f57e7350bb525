//! Attribute handlers: getter/setter function pointers, defaults and flags.
//!
//! A class's handler table is its polymorphism mechanism. Drivers override a
//! base class's generic handler by registering the same name again on their
//! own class, and resolution walks the class chain to find the nearest one.

use std::borrow::Cow;

use crate::attr::AttrFlags;
use crate::object::Handle;
use crate::toolkit::Toolkit;

/// Reads an attribute. `None` means "no answer": resolution falls through to
/// the instance table, inheritance and the default.
pub type GetFn = fn(&Toolkit, Handle) -> Option<String>;

/// Writes an attribute. The value is `None` when the attribute is being
/// reset and the handler has no default.
pub type SetFn = fn(&mut Toolkit, Handle, Option<&str>) -> SetOutcome;

pub type GetIdFn = fn(&Toolkit, Handle, i32) -> Option<String>;
pub type SetIdFn = fn(&mut Toolkit, Handle, i32, Option<&str>) -> SetOutcome;
pub type GetId2Fn = fn(&Toolkit, Handle, i32, i32) -> Option<String>;
pub type SetId2Fn = fn(&mut Toolkit, Handle, i32, i32, Option<&str>) -> SetOutcome;

/// What a setter did with a value.
///
/// Success and cache policy are separate questions: `Cached` and `Applied`
/// both mean the value was accepted, and only `Cached` asks for the string to
/// be kept in the instance table as the answer for later reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOutcome {
    /// Accepted; keep the string in the instance table.
    Cached,
    /// Accepted; the native object holds the state, do not store the string.
    Applied,
    /// The value was invalid or the attribute is not writable. Nothing
    /// changed.
    Rejected,
}

impl SetOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, SetOutcome::Rejected)
    }

    pub fn should_cache(self) -> bool {
        matches!(self, SetOutcome::Cached)
    }
}

/// Where a handler's default value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// A fixed string.
    Literal(Cow<'static, str>),
    /// The current value of a global attribute, e.g. `FONT` defaulting to the
    /// global `DEFAULTFONT`.
    Global(Cow<'static, str>),
}

impl DefaultValue {
    pub fn literal(s: impl Into<Cow<'static, str>>) -> Self {
        DefaultValue::Literal(s.into())
    }

    pub fn global(name: impl Into<Cow<'static, str>>) -> Self {
        DefaultValue::Global(name.into())
    }
}

/// A plain (non-id) attribute handler.
#[derive(Debug, Clone, Default)]
pub struct AttrHandler {
    pub get: Option<GetFn>,
    pub set: Option<SetFn>,
    pub default: Option<DefaultValue>,
    pub flags: AttrFlags,
}

impl AttrHandler {
    /// A handler with no functions: resolution uses only storage, defaults and
    /// flags.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn getter(mut self, get: GetFn) -> Self {
        self.get = Some(get);
        self
    }

    pub fn setter(mut self, set: SetFn) -> Self {
        self.set = Some(set);
        self
    }

    pub fn default_value(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(DefaultValue::literal(value));
        self
    }

    pub fn default_global(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(DefaultValue::global(name));
        self
    }

    pub fn flags(mut self, flags: AttrFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Handler for `NAME<id>` attributes. Id attributes never have defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdHandler {
    pub get: Option<GetIdFn>,
    pub set: Option<SetIdFn>,
    pub flags: AttrFlags,
}

/// Handler for `NAME<lin>:<col>` attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id2Handler {
    pub get: Option<GetId2Fn>,
    pub set: Option<SetId2Fn>,
    pub flags: AttrFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_stub(_: &Toolkit, _: Handle) -> Option<String> {
        Some("x".into())
    }

    fn set_stub(_: &mut Toolkit, _: Handle, _: Option<&str>) -> SetOutcome {
        SetOutcome::Applied
    }

    #[test]
    fn outcome_channels() {
        assert!(SetOutcome::Cached.is_accepted());
        assert!(SetOutcome::Cached.should_cache());
        assert!(SetOutcome::Applied.is_accepted());
        assert!(!SetOutcome::Applied.should_cache());
        assert!(!SetOutcome::Rejected.is_accepted());
        assert!(!SetOutcome::Rejected.should_cache());
    }

    #[test]
    fn builder() {
        let h = AttrHandler::new()
            .getter(get_stub)
            .setter(set_stub)
            .default_value("BLACK")
            .flags(AttrFlags::NOT_MAPPED);
        assert!(h.get.is_some());
        assert!(h.set.is_some());
        assert_eq!(h.default, Some(DefaultValue::Literal("BLACK".into())));
        assert_eq!(h.flags, AttrFlags::NOT_MAPPED);
    }

    #[test]
    fn global_default() {
        let h = AttrHandler::new().default_global("DEFAULTFONT");
        assert_eq!(h.default, Some(DefaultValue::Global("DEFAULTFONT".into())));
    }

    #[test]
    fn empty_handler() {
        let h = AttrHandler::new();
        assert!(h.get.is_none() && h.set.is_none() && h.default.is_none());
        assert!(h.flags.is_empty());
    }
}
