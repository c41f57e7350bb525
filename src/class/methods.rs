//! Class methods: the hooks a driver implements to back a class with native
//! widgets.

use std::fmt;

use crate::geometry::Size;
use crate::object::Handle;
use crate::toolkit::Toolkit;

/// The native object behind a mapped handle.
///
/// `Void` marks classes that map without creating anything native, such as
/// layout boxes. `Raw` carries the driver's own identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeHandle {
    Void,
    Raw(u64),
}

/// A positional construction parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateParam {
    /// Assigned to the class's next positional parameter attribute.
    Str(String),
    /// Appended as a child.
    Child(Handle),
}

impl From<&str> for CreateParam {
    fn from(s: &str) -> Self {
        CreateParam::Str(s.to_owned())
    }
}

impl From<Handle> for CreateParam {
    fn from(h: Handle) -> Self {
        CreateParam::Child(h)
    }
}

/// A failure reported by a driver hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError(pub String);

impl DriverError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DriverError {}

/// Per-class hooks, invoked by the toolkit at the right point of each
/// lifecycle walk.
///
/// A class without methods inherits its parent class's methods. Every hook
/// has a default, so a driver only overrides what it backs natively.
pub trait ClassMethods {
    /// Runs after construction parameters have been applied.
    fn create(
        &self,
        _tk: &mut Toolkit,
        _ih: Handle,
        _params: &[CreateParam],
    ) -> Result<(), DriverError> {
        Ok(())
    }

    /// Create the native object. The parent is already mapped.
    fn map(&self, _tk: &mut Toolkit, _ih: Handle) -> Result<NativeHandle, DriverError> {
        Ok(NativeHandle::Void)
    }

    /// Release the native object. Children are already unmapped.
    fn unmap(&self, _tk: &mut Toolkit, _ih: Handle, _native: NativeHandle) {}

    /// Release class-specific state before the object is freed.
    fn destroy(&self, _tk: &mut Toolkit, _ih: Handle) {}

    fn child_added(&self, _tk: &mut Toolkit, _ih: Handle, _child: Handle) {}

    /// `pos` is the index the child occupied before removal.
    fn child_removed(&self, _tk: &mut Toolkit, _ih: Handle, _child: Handle, _pos: usize) {}

    /// The size the object would like, before any user size is applied.
    fn natural_size(&self, _tk: &Toolkit, _ih: Handle) -> Option<Size> {
        None
    }
}

/// Methods used when no class in the chain supplies any.
#[derive(Debug, Default)]
pub struct VoidMethods;

impl ClassMethods for VoidMethods {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_error_display() {
        let e = DriverError::new("no display");
        assert_eq!(e.to_string(), "no display");
    }

    #[test]
    fn create_param_conversions() {
        assert_eq!(CreateParam::from("OK"), CreateParam::Str("OK".into()));
    }
}
