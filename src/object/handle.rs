//! Object types: Handle, Object.

use slotmap::new_key_type;

use crate::attr::AttrTable;
use crate::class::NativeHandle;
use crate::geometry::Geometry;

use super::callback::CallbackTable;

new_key_type! {
    /// Unique identifier for an object. Copy, lightweight (u64).
    ///
    /// A handle to a destroyed object stays invalid forever; it is never
    /// reused for a different object.
    pub struct Handle;
}

/// Data owned by a single object.
pub struct Object {
    /// Name of the object's class.
    pub class: String,
    /// Instance-level attribute values.
    pub attrs: AttrTable,
    pub geometry: Geometry,
    /// `Some` while mapped.
    pub native: Option<NativeHandle>,
    /// Copied from the class at creation.
    pub interactive: bool,
    pub callbacks: CallbackTable,
}

impl Object {
    /// Create an unmapped object of the given class with an empty table.
    pub fn new(class: impl Into<String>, interactive: bool) -> Self {
        Self {
            class: class.into(),
            attrs: AttrTable::new(),
            geometry: Geometry::default(),
            native: None,
            interactive,
            callbacks: CallbackTable::new(),
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.native.is_some()
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class)
            .field("attrs", &self.attrs)
            .field("geometry", &self.geometry)
            .field("native", &self.native)
            .field("interactive", &self.interactive)
            .field("callbacks", &self.callbacks.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unmapped() {
        let o = Object::new("button", true);
        assert_eq!(o.class, "button");
        assert!(!o.is_mapped());
        assert!(o.attrs.is_empty());
        assert!(o.interactive);
    }

    #[test]
    fn mapped_when_native_set() {
        let mut o = Object::new("vbox", false);
        o.native = Some(NativeHandle::Void);
        assert!(o.is_mapped());
    }

    #[test]
    fn handle_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<Handle>();
    }
}
