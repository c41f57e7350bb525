//! Tagged attribute values.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::object::Handle;

/// A value stored in an [`AttrTable`](super::AttrTable).
///
/// The public contract is string-valued. Handle and pointer entries exist so
/// that non-printable payloads can live under the same name space without
/// ever being read back as text.
#[derive(Clone)]
pub enum AttrValue {
    /// A printable string value.
    Str(String),
    /// A reference to another object. The table does not own it.
    Handle(Handle),
    /// An opaque payload shared with the caller.
    Ptr(Rc<dyn Any>),
}

impl AttrValue {
    /// The string payload, or `None` for handle and pointer entries.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            AttrValue::Handle(_) | AttrValue::Ptr(_) => None,
        }
    }

    /// Whether this entry carries a non-string payload.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, AttrValue::Str(_))
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            AttrValue::Handle(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_ptr(&self) -> Option<&Rc<dyn Any>> {
        match self {
            AttrValue::Ptr(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            AttrValue::Handle(h) => f.debug_tuple("Handle").field(h).finish(),
            AttrValue::Ptr(p) => write!(f, "Ptr({:p})", Rc::as_ptr(p)),
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Str(a), AttrValue::Str(b)) => a == b,
            (AttrValue::Handle(a), AttrValue::Handle(b)) => a == b,
            (AttrValue::Ptr(a), AttrValue::Ptr(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<Handle> for AttrValue {
    fn from(h: Handle) -> Self {
        AttrValue::Handle(h)
    }
}
